use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CraneError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {} already exists", .path.display())]
    TemplateExistsError { path: PathBuf },

    /// 非 2xx 回應：訊息即為回應本文，不做任何修改
    #[error("{message}")]
    ApiError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    UsageError { message: String },

    #[error("{message}")]
    DeprecatedError { message: String },
}

impl CraneError {
    pub fn api(body: &[u8]) -> Self {
        CraneError::ApiError {
            message: String::from_utf8_lossy(body).into_owned(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CraneError::ConfigError {
            message: message.into(),
        }
    }

    /// 依錯誤類型決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            CraneError::UsageError { .. } | CraneError::DeprecatedError { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CraneError>;
