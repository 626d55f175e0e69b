use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{SalesInput, SalesRecordSpecs};

#[async_trait]
pub trait SalesRepository: Send + Sync {
    fn from_input(&self, input: SalesInput) -> Result<SalesRecordSpecs, ServerError>;

    async fn from_file<P>(&self, path: P) -> Result<SalesRecordSpecs, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}
