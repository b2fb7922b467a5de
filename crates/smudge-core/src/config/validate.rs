//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// Public because the CLI re-validates after applying flag overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.producers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.producers must be > 0".into(),
            ));
        }
        if self.processing.consumers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.consumers must be > 0".into(),
            ));
        }
        if self.queue.capacity == 0 {
            return Err(ConfigError::ValidationError(
                "queue.capacity must be > 0".into(),
            ));
        }
        if self.filter.window_size < 3 || self.filter.window_size % 2 == 0 {
            return Err(ConfigError::ValidationError(
                "filter.window_size must be an odd integer >= 3".into(),
            ));
        }
        if self.io.input_root.is_empty() {
            return Err(ConfigError::ValidationError(
                "io.input_root must not be empty".into(),
            ));
        }
        if self.io.output_root.is_empty() {
            return Err(ConfigError::ValidationError(
                "io.output_root must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_consumers() {
        let mut config = Config::default();
        config.processing.consumers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("consumers"));
    }

    #[test]
    fn test_validate_rejects_zero_producers() {
        let mut config = Config::default();
        config.processing.producers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("producers"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.queue.capacity = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("queue.capacity"));
    }

    #[test]
    fn test_validate_rejects_even_window() {
        let mut config = Config::default();
        config.filter.window_size = 4;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn test_validate_rejects_window_of_one() {
        let mut config = Config::default();
        config.filter.window_size = 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn test_validate_rejects_empty_roots() {
        let mut config = Config::default();
        config.io.input_root = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.io.output_root = String::new();
        assert!(config.validate().is_err());
    }
}
