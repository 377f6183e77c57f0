#![forbid(unsafe_code)]

//! Error types.

/// Controller error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectError {
    /// Inspection was requested but no rendered target was supplied.
    TargetUnavailable,
    /// The inspector is disabled and ignores all input.
    Disabled,
}

impl core::fmt::Display for InspectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TargetUnavailable => write!(f, "inspection target is not rendered"),
            Self::Disabled => write!(f, "inspector is disabled"),
        }
    }
}

impl std::error::Error for InspectError {}

/// Configuration loading/validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    Parse(String),
    /// A field holds an unusable value.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid inspector config: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            InspectError::TargetUnavailable.to_string(),
            "inspection target is not rendered"
        );
        assert_eq!(
            ConfigError::Invalid {
                field: "gap",
                reason: "must be finite and non-negative"
            }
            .to_string(),
            "invalid `gap`: must be finite and non-negative"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
