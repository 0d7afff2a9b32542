use async_trait::async_trait;
use serde::Serialize;

use crate::modules::students::core::report::StudentReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Turns a report into a downloadable document. Rasterizing to PDF lives behind this port.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, report: &StudentReport) -> anyhow::Result<RenderedDocument>;
}
