use crate::core::decode::{decode_accounts, format_balance, FIELD_ID, FIELD_SOLDE, FIELD_TYPE};
use crate::domain::model::{Account, AccountKind};
use crate::domain::ports::{ErrorReporter, SoapTransport, TracingReporter};
use crate::domain::soap::{SoapRequest, SoapValue};
use crate::utils::error::Result;
use chrono::Local;
use std::sync::Arc;

pub const OP_GET_COMPTES: &str = "getComptes";
pub const OP_CREATE_COMPTE: &str = "createCompte";
pub const OP_DELETE_COMPTE: &str = "deleteCompte";

/// Client for the remote account ("compte") SOAP service.
///
/// `list_accounts` and `delete_account` are fail-soft: failures go to the
/// [`ErrorReporter`] and the caller gets an empty list or `false`.
/// `create_account` propagates transport failures instead.
pub struct AccountService<T: SoapTransport> {
    transport: T,
    namespace: String,
    reporter: Arc<dyn ErrorReporter>,
}

impl<T: SoapTransport> AccountService<T> {
    pub fn new(transport: T, namespace: impl Into<String>) -> Self {
        Self {
            transport,
            namespace: namespace.into(),
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn request(&self, operation: &str) -> SoapRequest {
        SoapRequest::new(self.namespace.clone(), operation)
    }

    /// 取得所有帳戶；任何錯誤都回傳空列表
    pub async fn list_accounts(&self) -> Vec<Account> {
        match self.fetch_accounts().await {
            Ok(accounts) => {
                tracing::debug!("Decoded {} accounts", accounts.len());
                accounts
            }
            Err(e) => {
                self.reporter.report(OP_GET_COMPTES, &e);
                Vec::new()
            }
        }
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>> {
        let body = self.transport.call(&self.request(OP_GET_COMPTES)).await?;
        decode_accounts(&body, Local::now().naive_local())
    }

    /// Creates an account. Both arguments are sent as strings.
    ///
    /// Returns `Ok(true)` once the call completes; the response body is not
    /// inspected. Transport errors are returned to the caller, not reported.
    pub async fn create_account(&self, balance: f64, kind: AccountKind) -> Result<bool> {
        let request = self
            .request(OP_CREATE_COMPTE)
            .with_param(FIELD_SOLDE, SoapValue::Text(format_balance(balance)))
            .with_param(FIELD_TYPE, SoapValue::Text(kind.wire_name().to_string()));

        self.transport.call(&request).await?;
        Ok(true)
    }

    /// Deletes an account by id. Returns `false` when the call fails.
    pub async fn delete_account(&self, id: i64) -> bool {
        let request = self
            .request(OP_DELETE_COMPTE)
            .with_param(FIELD_ID, SoapValue::Long(id));

        match self.transport.call(&request).await {
            Ok(_) => true,
            Err(e) => {
                self.reporter.report(OP_DELETE_COMPTE, &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::soap::SoapObject;
    use crate::utils::error::ClientError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const NS: &str = "http://ws.demo.example.com";

    /// Replays a canned body (or fails) and records every request.
    struct MockTransport {
        response: Option<SoapObject>,
        requests: Arc<Mutex<Vec<SoapRequest>>>,
    }

    impl MockTransport {
        fn ok(response: SoapObject) -> Self {
            Self {
                response: Some(response),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl SoapTransport for MockTransport {
        async fn call(&self, request: &SoapRequest) -> Result<SoapObject> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone().ok_or_else(|| ClientError::HttpStatus {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        reports: Mutex<Vec<(String, String)>>,
    }

    impl ErrorReporter for RecordingReporter {
        fn report(&self, operation: &str, error: &ClientError) {
            self.reports
                .lock()
                .unwrap()
                .push((operation.to_string(), error.to_string()));
        }
    }

    fn service(transport: MockTransport) -> (AccountService<MockTransport>, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::default());
        let service = AccountService::new(transport, NS).with_reporter(reporter.clone());
        (service, reporter)
    }

    #[tokio::test]
    async fn test_list_accounts_decodes_records() {
        let body = SoapObject::new("getComptesResponse").with_property(
            SoapObject::new("return")
                .with_property(SoapObject::leaf("id", "7"))
                .with_property(SoapObject::leaf("solde", "120.5"))
                .with_property(SoapObject::leaf("dateCreation", "2024-01-02T10:00:00"))
                .with_property(SoapObject::leaf("type", "SAVINGS")),
        );
        let transport = MockTransport::ok(body);
        let requests = transport.requests.clone();
        let (service, reporter) = service(transport);

        let accounts = service.list_accounts().await;

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, Some(7));
        assert_eq!(accounts[0].balance, 120.5);
        assert_eq!(accounts[0].kind, AccountKind::Savings);

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].operation, OP_GET_COMPTES);
        assert_eq!(requests[0].namespace, NS);
        assert!(requests[0].params.is_empty());
        assert!(reporter.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_accounts_on_failure_is_empty_and_reported() {
        let (service, reporter) = service(MockTransport::failing());

        let accounts = service.list_accounts().await;

        assert!(accounts.is_empty());
        let reports = reporter.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, OP_GET_COMPTES);
    }

    #[tokio::test]
    async fn test_list_accounts_with_non_record_property_is_empty() {
        let body = SoapObject::new("getComptesResponse")
            .with_property(SoapObject::new("return").with_property(SoapObject::leaf("id", "1")))
            .with_property(SoapObject::leaf("return", "oops"));
        let (service, reporter) = service(MockTransport::ok(body));

        assert!(service.list_accounts().await.is_empty());
        assert_eq!(reporter.reports.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_account_sends_string_arguments() {
        let transport = MockTransport::ok(SoapObject::new("createCompteResponse"));
        let requests = transport.requests.clone();
        let (service, _) = service(transport);

        let created = service.create_account(100.0, AccountKind::Savings).await.unwrap();
        assert!(created);

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].operation, OP_CREATE_COMPTE);
        assert_eq!(
            requests[0].params,
            vec![
                ("solde".to_string(), SoapValue::Text("100.0".to_string())),
                ("type".to_string(), SoapValue::Text("SAVINGS".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_account_propagates_failure_without_reporting() {
        let (service, reporter) = service(MockTransport::failing());

        let result = service.create_account(5.0, AccountKind::Checking).await;

        assert!(matches!(result, Err(ClientError::HttpStatus { status: 503, .. })));
        assert!(reporter.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_account_sends_long_id() {
        let transport = MockTransport::ok(SoapObject::new("deleteCompteResponse"));
        let requests = transport.requests.clone();
        let (service, _) = service(transport);

        assert!(service.delete_account(42).await);

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].operation, OP_DELETE_COMPTE);
        assert_eq!(requests[0].params, vec![("id".to_string(), SoapValue::Long(42))]);
    }

    #[test]
    fn test_delete_account_failure_returns_false() {
        let (service, reporter) = service(MockTransport::failing());

        let deleted = tokio_test::block_on(service.delete_account(9));

        assert!(!deleted);
        let reports = reporter.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, OP_DELETE_COMPTE);
    }
}
