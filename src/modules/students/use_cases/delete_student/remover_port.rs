use async_trait::async_trait;

use crate::shared::infrastructure::backend::BackendError;

#[async_trait]
pub trait RegistrationRemover: Send + Sync {
    async fn remove_registration(&self, registration_id: &str) -> Result<(), BackendError>;
}
