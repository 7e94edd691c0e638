use super::HashingAlgorithm;
use super::pipeline::execute;
use super::scan::Execution;
use super::types::RecognitionResult;
use crate::config::HashingConfig;
use crate::error::Result;
use crate::geometry::Roi;
use crate::imaging::Frame;
use crate::model::ReferenceModel;

/// Data-parallel variant: window rows are hashed on the rayon pool.
///
/// Rows are collected back in order, so results equal those of `CpuHashing`.
#[derive(Debug, Clone)]
pub struct ParallelHashing {
    config: HashingConfig,
}

impl ParallelHashing {
    pub fn new(config: HashingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HashingConfig {
        &self.config
    }
}

impl HashingAlgorithm for ParallelHashing {
    fn execute(
        &self,
        model: &ReferenceModel,
        query: &Frame,
        roi: Option<&Roi>,
    ) -> Result<Option<RecognitionResult>> {
        execute(&self.config, model, query, roi, Execution::Parallel)
    }

    fn is_accelerated(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "parallel"
    }
}
