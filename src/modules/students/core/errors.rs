use thiserror::Error;

use crate::shared::infrastructure::backend::BackendError;

#[derive(Debug, Error)]
pub enum StudentsError {
    #[error("could not load students: {0}")]
    Query(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("student {0} is not on the current page")]
    NotOnPage(String),

    #[error("there are no students to print")]
    NothingToPrint,

    #[error("could not render report: {0}")]
    Render(String),
}
