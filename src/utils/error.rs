use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML processing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("SOAP fault [{code}]: {message}")]
    SoapFault { code: String, message: String },

    #[error("Malformed SOAP envelope: {message}")]
    MalformedEnvelope { message: String },

    #[error("Property #{index} <{name}> is not an account record")]
    NotARecord { index: usize, name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// 錯誤分類，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Protocol,
    Decode,
    Config,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Http(_) | ClientError::Io(_) | ClientError::HttpStatus { .. } => {
                ErrorCategory::Transport
            }
            ClientError::Xml(_)
            | ClientError::SoapFault { .. }
            | ClientError::MalformedEnvelope { .. } => ErrorCategory::Protocol,
            ClientError::NotARecord { .. } => ErrorCategory::Decode,
            ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    /// 給終端使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => "Check that the SOAP endpoint is reachable and the URL is correct",
            ErrorCategory::Protocol => "Check that the endpoint is a SOAP 1.1 service and the namespace matches",
            ErrorCategory::Decode => "The service returned an unexpected response shape",
            ErrorCategory::Config => "Fix the configuration file or command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
