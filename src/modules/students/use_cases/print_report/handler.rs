use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info};

use crate::modules::students::core::errors::StudentsError;
use crate::modules::students::core::filter::{StudentCriteria, StudentQuery};
use crate::modules::students::core::report::{Orientation, ReportScope, build_report};
use crate::modules::students::core::student::StudentRow;
use crate::modules::students::use_cases::list_students::handler::StudentsDashboard;
use crate::modules::students::use_cases::list_students::queries_port::StudentDirectory;
use crate::modules::students::use_cases::print_report::renderer_port::{
    DocumentRenderer, RenderedDocument,
};

const REPORT_BATCH_SIZE: u32 = 200;

pub struct PrintReportHandler {
    directory: Arc<dyn StudentDirectory>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl PrintReportHandler {
    pub fn new(directory: Arc<dyn StudentDirectory>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            directory,
            renderer,
        }
    }

    pub async fn handle(
        &self,
        dashboard: &StudentsDashboard,
        scope: ReportScope,
        orientation: Orientation,
        today: NaiveDate,
    ) -> Result<RenderedDocument, StudentsError> {
        let criteria = dashboard.criteria().await;
        let rows = match scope {
            ReportScope::Visible => dashboard.visible_rows().await,
            ReportScope::AllFiltered => self.all_matching(&criteria).await?,
        };
        if rows.is_empty() {
            return Err(StudentsError::NothingToPrint);
        }

        let report = build_report(&rows, &criteria, orientation, today);
        let document = self.renderer.render(&report).await.map_err(|err| {
            error!(error = %err, "report rendering failed");
            StudentsError::Render(err.to_string())
        })?;
        info!(file_name = %document.file_name, lines = report.lines.len(), "report rendered");
        Ok(document)
    }

    async fn all_matching(
        &self,
        criteria: &StudentCriteria,
    ) -> Result<Vec<StudentRow>, StudentsError> {
        let mut rows = Vec::new();
        let mut page = 1;
        loop {
            let query = StudentQuery {
                criteria: criteria.clone(),
                page,
                page_size: REPORT_BATCH_SIZE,
            };
            let batch = self
                .directory
                .query(&query)
                .await
                .map_err(|err| StudentsError::Query(err.to_string()))?;
            let fetched = batch.rows.len();
            rows.extend(batch.rows);
            if fetched == 0 || rows.len() as u64 >= batch.total {
                return Ok(rows);
            }
            page += 1;
        }
    }
}
