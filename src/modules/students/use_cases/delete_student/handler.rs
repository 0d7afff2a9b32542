use std::sync::Arc;
use tracing::{error, info, warn};

use crate::modules::students::core::errors::StudentsError;
use crate::modules::students::use_cases::delete_student::remover_port::RegistrationRemover;
use crate::modules::students::use_cases::list_students::handler::StudentsDashboard;

/// Removes a registration, hiding it from the dashboard before the backend confirms.
pub struct DeleteStudentHandler {
    remover: Arc<dyn RegistrationRemover>,
}

impl DeleteStudentHandler {
    pub fn new(remover: Arc<dyn RegistrationRemover>) -> Self {
        Self { remover }
    }

    pub async fn handle(
        &self,
        dashboard: &StudentsDashboard,
        registration_id: &str,
    ) -> Result<(), StudentsError> {
        let hidden = dashboard.hide_row(registration_id).await?;
        match self.remover.remove_registration(registration_id).await {
            Ok(()) => {
                info!(%registration_id, "registration deleted");
                if let Err(err) = dashboard.refresh().await {
                    warn!(error = %err, "student list refresh after delete failed");
                }
                Ok(())
            }
            Err(err) => {
                error!(%registration_id, error = %err, "registration delete failed, restoring row");
                dashboard.restore_row(hidden).await;
                Err(err.into())
            }
        }
    }
}
