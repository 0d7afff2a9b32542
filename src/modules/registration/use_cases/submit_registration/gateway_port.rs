use async_trait::async_trait;

use crate::modules::registration::core::outcome::RegistrationOutcome;
use crate::modules::registration::use_cases::submit_registration::command::RegisterStudent;
use crate::shared::infrastructure::backend::BackendError;

#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Duplicate check, capacity check and insert as one indivisible operation.
    async fn submit(&self, command: &RegisterStudent)
    -> Result<RegistrationOutcome, BackendError>;
}
