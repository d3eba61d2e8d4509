// Adapters layer: concrete input sources and persistence gateways.

pub mod csv_source;
pub mod offline_gateway;
pub mod sql_gateway;
