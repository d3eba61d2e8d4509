use crate::domain::ports::{GatewayError, UserGateway};
use async_trait::async_trait;

/// Stand-in gateway for dry runs, where no database connection is opened.
/// Every call fails; a dry run never makes one.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGateway;

const OFFLINE: &str = "no database connection in dry-run mode";

#[async_trait]
impl UserGateway for OfflineGateway {
    async fn ensure_schema(&mut self) -> Result<(), GatewayError> {
        Err(GatewayError::Other(OFFLINE.to_string()))
    }

    async fn insert(&mut self, _: &str, _: &str, _: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Other(OFFLINE.to_string()))
    }
}
