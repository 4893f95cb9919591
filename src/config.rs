use crate::constants::{DEFAULT_MAX_DIMENSION, DEFAULT_MAX_INPUT_BYTES, MAX_WORKERS};
use crate::error::{Result, TranscodeError};

/// Limits and sizing for the transcoder. The compression parameters
/// themselves are fixed and live in `constants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    pub max_input_bytes: u64,
    pub max_dimension: u32,
    pub workers: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
            workers: num_cpus::get().max(1),
        }
    }
}

impl OptimizerConfig {
    pub fn new(
        max_input_bytes: Option<u64>,
        max_dimension: Option<u32>,
        workers: Option<usize>,
    ) -> Result<Self> {
        let defaults = Self::default();

        let max_input_bytes = max_input_bytes.unwrap_or(defaults.max_input_bytes);
        if max_input_bytes == 0 {
            return Err(TranscodeError::InvalidConfig(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }

        let max_dimension = max_dimension.unwrap_or(defaults.max_dimension);
        if max_dimension == 0 {
            return Err(TranscodeError::InvalidConfig(
                "max_dimension must be greater than zero".to_string(),
            ));
        }

        let workers = workers.unwrap_or(defaults.workers);
        if !(1..=MAX_WORKERS).contains(&workers) {
            return Err(TranscodeError::InvalidConfig(format!(
                "workers must be between 1 and {}, got {}",
                MAX_WORKERS, workers
            )));
        }

        Ok(Self {
            max_input_bytes,
            max_dimension,
            workers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OptimizerConfig::new(None, None, None).unwrap();
        assert_eq!(config.max_input_bytes, 100 * 1024 * 1024);
        assert_eq!(config.max_dimension, 16384);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_config_overrides() {
        let config = OptimizerConfig::new(Some(1024), Some(4000), Some(2)).unwrap();
        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.max_dimension, 4000);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_config_rejects_zero_values() {
        assert!(matches!(
            OptimizerConfig::new(Some(0), None, None),
            Err(TranscodeError::InvalidConfig(_))
        ));
        assert!(matches!(
            OptimizerConfig::new(None, Some(0), None),
            Err(TranscodeError::InvalidConfig(_))
        ));
        assert!(matches!(
            OptimizerConfig::new(None, None, Some(0)),
            Err(TranscodeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_too_many_workers() {
        let result = OptimizerConfig::new(None, None, Some(MAX_WORKERS + 1));
        assert!(matches!(result, Err(TranscodeError::InvalidConfig(_))));
    }
}
