//! Core error types for Benchwright.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Blueprint text is not a valid JSON record
    InvalidBlueprint {
        /// Parser diagnostic
        reason: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlueprint { reason } => write!(f, "Invalid blueprint: {}", reason),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidBlueprint {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidBlueprint {
            reason: "expected value at line 1".to_string(),
        };
        let s = format!("{}", err);
        assert!(s.contains("Invalid blueprint"));
        assert!(s.contains("line 1"));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = CoreError::from(serde_err);
        assert!(matches!(err, CoreError::InvalidBlueprint { .. }));
    }
}
