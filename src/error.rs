//! Error types for the dashboard core.
//!
//! Store actions and metric derivations never fail; these errors only come
//! out of the boundary layers (config, storage, inbound events, CLI).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CerebroError {
    /// Reading or writing the state slot / config file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state or event payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// config.toml exists but is not valid
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Inbound event envelope is structurally wrong
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CerebroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CerebroError::InvalidEvent("missing type".to_string());
        assert_eq!(err.to_string(), "Invalid event: missing type");

        let err = CerebroError::Other("boom".to_string());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: CerebroError = parse_err.into();
        assert!(matches!(err, CerebroError::Serialization(_)));
    }
}
