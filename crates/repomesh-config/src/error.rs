//! Config-loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown built-in profile {name:?} (expected one of: baseline, open-source, regulated)")]
    UnknownBuiltinProfile { name: String },

    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
