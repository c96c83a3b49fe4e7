pub mod decode;
pub mod service;

pub use crate::domain::model::{Account, AccountKind, RawAccount};
pub use crate::domain::ports::{ErrorReporter, SoapTransport, TracingReporter};
pub use crate::utils::error::Result;
