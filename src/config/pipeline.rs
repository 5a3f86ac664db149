//! Analysis pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Jobs that can wait before triggers start being dropped
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Stages running at the same time
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,

    /// Request a study trail right after a diagnostic is stored
    #[serde(default)]
    pub auto_request_trail: bool,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.queue_capacity == 0 {
            return Err(ValidationError::ZeroCapacity("pipeline.queue_capacity"));
        }
        if self.max_concurrent_jobs == 0 {
            return Err(ValidationError::ZeroCapacity("pipeline.max_concurrent_jobs"));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
            auto_request_trail: false,
        }
    }
}

fn default_queue_capacity() -> usize {
    64
}

fn default_max_concurrent_jobs() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.max_concurrent_jobs, 4);
        assert!(!config.auto_request_trail);
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let config = PipelineConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            max_concurrent_jobs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
