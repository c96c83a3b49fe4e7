// Adapters layer: concrete implementations of the domain ports (SOAP over HTTP).

pub mod envelope;
pub mod http_transport;
