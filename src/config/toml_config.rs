use crate::adapters::http_transport::HttpSoapTransport;
use crate::core::service::AccountService;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

pub const ENV_ENDPOINT: &str = "COMPTE_SOAP_ENDPOINT";
pub const ENV_NAMESPACE: &str = "COMPTE_SOAP_NAMESPACE";
pub const ENV_SOAP_ACTION: &str = "COMPTE_SOAP_ACTION";
pub const ENV_TIMEOUT: &str = "COMPTE_SOAP_TIMEOUT";

const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service: ServiceSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    pub endpoint: String,
    pub namespace: String,
    pub soap_action: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl ServiceConfig {
    pub fn new(endpoint: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            service: ServiceSection {
                endpoint: endpoint.into(),
                namespace: namespace.into(),
                soap_action: None,
                timeout_seconds: None,
                headers: None,
            },
            logging: None,
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從環境變數載入配置
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var(ENV_ENDPOINT).ok();
        let namespace = env::var(ENV_NAMESPACE).ok();

        let mut config = Self::new(
            validate_required_field(ENV_ENDPOINT, &endpoint)?.clone(),
            validate_required_field(ENV_NAMESPACE, &namespace)?.clone(),
        );
        config.service.soap_action = env::var(ENV_SOAP_ACTION).ok();
        config.service.timeout_seconds = match env::var(ENV_TIMEOUT) {
            Ok(raw) => Some(raw.parse().map_err(|_| ClientError::InvalidConfigValueError {
                field: ENV_TIMEOUT.to_string(),
                value: raw.clone(),
                reason: "Must be a whole number of seconds".to_string(),
            })?),
            Err(_) => None,
        };

        Ok(config)
    }

    /// 替換環境變數 (例如 ${SOAP_ENDPOINT})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.service.endpoint
    }

    pub fn namespace(&self) -> &str {
        &self.service.namespace
    }

    pub fn soap_action(&self) -> &str {
        self.service.soap_action.as_deref().unwrap_or("")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.service.timeout_seconds.map(Duration::from_secs)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn build_transport(&self) -> HttpSoapTransport {
        let mut transport = HttpSoapTransport::new(self.endpoint()).with_soap_action(self.soap_action());
        if let Some(timeout) = self.timeout() {
            transport = transport.with_timeout(timeout);
        }
        if let Some(headers) = &self.service.headers {
            transport = transport.with_headers(headers.clone());
        }
        transport
    }

    pub fn build_service(&self) -> AccountService<HttpSoapTransport> {
        AccountService::new(self.build_transport(), self.namespace())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.endpoint", &self.service.endpoint)?;
        validate_non_empty_string("service.namespace", &self.service.namespace)?;

        if let Some(timeout) = self.service.timeout_seconds {
            validate_range("service.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        tracing::debug!("Service configuration validated");
        Ok(())
    }
}
