//! Package scanning configuration.

use globset::Glob;
use gocmd_core::UnsafePointerPolicy;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScanConfig {
    /// File-name globs left out of the package (e.g. `"zz_*.go"`).
    #[serde(default)]
    pub exclude: Vec<String>,

    /// What to do with an `unsafe.Pointer` parameter.
    #[serde(default)]
    pub unsafe_pointer: UnsafePointerPolicy,
}

impl ScanConfig {
    /// Reject exclude patterns that do not compile.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the first bad pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.exclude {
            Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                field: "scan.exclude".to_string(),
                reason: format!("'{pattern}': {e}"),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ScanConfig::default();
        assert!(config.exclude.is_empty());
        assert_eq!(config.unsafe_pointer, UnsafePointerPolicy::Truncate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_glob_is_rejected() {
        let config = ScanConfig {
            exclude: vec!["zz_*.go".to_string(), "[".to_string()],
            ..ScanConfig::default()
        };
        let err = config.validate().expect_err("unclosed class");
        let message = err.to_string();
        assert!(message.contains("scan.exclude"), "{message}");
        assert!(message.contains("'['"), "{message}");
    }
}
