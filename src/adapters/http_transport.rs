use crate::adapters::envelope::{decode_response, encode_request};
use crate::domain::ports::SoapTransport;
use crate::domain::soap::{SoapObject, SoapRequest};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// SOAP 1.1 over HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpSoapTransport {
    client: Client,
    endpoint: String,
    soap_action: String,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl HttpSoapTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            soap_action: String::new(),
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_soap_action(mut self, soap_action: impl Into<String>) -> Self {
        self.soap_action = soap_action.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn call(&self, request: &SoapRequest) -> Result<SoapObject> {
        let envelope = encode_request(request)?;

        tracing::debug!(
            "POST {} operation={} ({} bytes)",
            self.endpoint,
            request.operation,
            envelope.len()
        );

        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml;charset=utf-8")
            .header("SOAPAction", format!("\"{}\"", self.soap_action));

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.body(envelope).send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("SOAP response status: {} ({} bytes)", status, text.len());

        if status.is_success() {
            return decode_response(&text);
        }

        // SOAP 1.1 會以 HTTP 500 回傳 Fault
        match decode_response(&text) {
            Err(fault @ ClientError::SoapFault { .. }) => Err(fault),
            _ => Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}
