pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::http_transport::HttpSoapTransport;
pub use crate::config::ServiceConfig;
pub use crate::core::service::AccountService;
pub use crate::domain::model::{Account, AccountKind};
pub use crate::domain::ports::{ErrorReporter, SoapTransport, TracingReporter};
pub use crate::utils::error::{ClientError, Result};
