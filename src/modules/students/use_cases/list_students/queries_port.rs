use async_trait::async_trait;

use crate::modules::students::core::filter::StudentQuery;
use crate::modules::students::core::student::StudentPage;

#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Page rows (newest first), total and grade counts in a single round trip.
    async fn query(&self, query: &StudentQuery) -> anyhow::Result<StudentPage>;
}
