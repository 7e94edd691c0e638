use super::HashingAlgorithm;
use super::pipeline::execute;
use super::scan::Execution;
use super::types::RecognitionResult;
use crate::config::HashingConfig;
use crate::error::Result;
use crate::geometry::Roi;
use crate::imaging::Frame;
use crate::model::ReferenceModel;

/// Sequential reference implementation.
///
/// Holds only its configuration, so one instance may serve concurrent calls.
#[derive(Debug, Clone)]
pub struct CpuHashing {
    config: HashingConfig,
}

impl CpuHashing {
    pub fn new(config: HashingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HashingConfig {
        &self.config
    }
}

impl HashingAlgorithm for CpuHashing {
    fn execute(
        &self,
        model: &ReferenceModel,
        query: &Frame,
        roi: Option<&Roi>,
    ) -> Result<Option<RecognitionResult>> {
        execute(&self.config, model, query, roi, Execution::Sequential)
    }

    fn is_accelerated(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "cpu"
    }
}
