use crate::domain::soap::{SoapObject, SoapRequest};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;

/// Sends one SOAP request and returns the first element inside the response
/// `Body`. Fails on network, HTTP or SOAP-level errors.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn call(&self, request: &SoapRequest) -> Result<SoapObject>;
}

/// 接收被吞掉（fail-soft）的錯誤
pub trait ErrorReporter: Send + Sync {
    fn report(&self, operation: &str, error: &ClientError);
}

/// Default reporter, logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, operation: &str, error: &ClientError) {
        tracing::warn!(
            operation = operation,
            category = ?error.category(),
            "SOAP call failed: {}",
            error
        );
    }
}
