// Domain layer: account model, SOAP wire types and ports (interfaces).

pub mod model;
pub mod ports;
pub mod soap;
