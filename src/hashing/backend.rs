use super::HashingAlgorithm;
use super::cpu::CpuHashing;
#[cfg(feature = "parallel")]
use super::parallel::ParallelHashing;
use super::types::RecognitionResult;
use crate::config::HashingConfig;
use crate::error::{RecognitionError, Result};
use crate::geometry::Roi;
use crate::imaging::Frame;
use crate::model::ReferenceModel;
use std::str::FromStr;

/// Requested execution path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cpu,
    Parallel,
    Accelerated,
}

impl FromStr for BackendKind {
    type Err = RecognitionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(BackendKind::Cpu),
            "parallel" => Ok(BackendKind::Parallel),
            "accelerated" | "gpu" | "cuda" => Ok(BackendKind::Accelerated),
            other => Err(RecognitionError::InvalidConfig {
                description: format!("unknown backend '{other}', expected cpu, parallel or accelerated"),
            }),
        }
    }
}

/// The hashing variants shipped with this crate, selected at construction.
#[derive(Debug, Clone)]
pub enum HashingBackend {
    Cpu(CpuHashing),
    #[cfg(feature = "parallel")]
    Parallel(ParallelHashing),
}

impl HashingBackend {
    /// Build the requested variant.
    ///
    /// No device backend is compiled in, so `Accelerated` always fails with
    /// `AcceleratorUnavailable`.
    pub fn select(kind: BackendKind, config: HashingConfig) -> Result<Self> {
        match kind {
            BackendKind::Cpu => Ok(HashingBackend::Cpu(CpuHashing::new(config)?)),
            #[cfg(feature = "parallel")]
            BackendKind::Parallel => Ok(HashingBackend::Parallel(ParallelHashing::new(config)?)),
            #[cfg(not(feature = "parallel"))]
            BackendKind::Parallel => Err(RecognitionError::InvalidConfig {
                description: "built without the 'parallel' feature".to_string(),
            }),
            BackendKind::Accelerated => Err(RecognitionError::AcceleratorUnavailable {
                description: "no GPU device backend is compiled into this build".to_string(),
            }),
        }
    }

    /// Like `select`, but falls back to the CPU variant when the requested
    /// path cannot be set up.
    pub fn select_with_fallback(kind: BackendKind, config: HashingConfig) -> Result<Self> {
        match Self::select(kind, config.clone()) {
            Ok(backend) => Ok(backend),
            Err(e) if e.is_resource_failure() || kind == BackendKind::Parallel => {
                log::warn!("{e}; falling back to the CPU hashing path");
                Self::select(BackendKind::Cpu, config)
            }
            Err(e) => Err(e),
        }
    }

    pub fn config(&self) -> &HashingConfig {
        match self {
            HashingBackend::Cpu(c) => c.config(),
            #[cfg(feature = "parallel")]
            HashingBackend::Parallel(p) => p.config(),
        }
    }
}

impl HashingAlgorithm for HashingBackend {
    fn execute(
        &self,
        model: &ReferenceModel,
        query: &Frame,
        roi: Option<&Roi>,
    ) -> Result<Option<RecognitionResult>> {
        match self {
            HashingBackend::Cpu(c) => c.execute(model, query, roi),
            #[cfg(feature = "parallel")]
            HashingBackend::Parallel(p) => p.execute(model, query, roi),
        }
    }

    fn is_accelerated(&self) -> bool {
        match self {
            HashingBackend::Cpu(c) => c.is_accelerated(),
            #[cfg(feature = "parallel")]
            HashingBackend::Parallel(p) => p.is_accelerated(),
        }
    }

    fn name(&self) -> &str {
        match self {
            HashingBackend::Cpu(c) => c.name(),
            #[cfg(feature = "parallel")]
            HashingBackend::Parallel(p) => p.name(),
        }
    }
}
