use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension for {0}; expected .toml or .json")]
    UnknownFormat(PathBuf),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read pointer path {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pointer path: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("pointer path frame_dt must be positive, got {0}")]
    FrameDt(f32),
    #[error("pointer path tail of {seconds}s at frame_dt {frame_dt} exceeds {max} frames")]
    TailTooLong { seconds: f32, frame_dt: f32, max: u64 },
}
