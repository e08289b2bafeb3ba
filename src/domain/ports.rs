use crate::domain::model::{BrandModelKey, CatalogListing, SummaryPoints};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only source of per-model summary points.
pub trait SummarySource: Send + Sync {
    fn points(&self, key: &BrandModelKey) -> Option<&SummaryPoints>;
    fn listing(&self) -> CatalogListing;
}

#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn respond(&self, message: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn allowed_origins(&self) -> &[String];
    fn reply_delay_ms(&self) -> u64;
}
