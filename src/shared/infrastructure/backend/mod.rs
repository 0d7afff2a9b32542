// The hosted relational backend: tables plus stored procedures.
//
// `in_memory` keeps every table in process and is what tests and a bare `cargo run`
// use. `rest` talks to the hosted instance over its REST gateway.

use thiserror::Error;

/// Postgres unique-violation code surfaced by the REST gateway.
pub const UNIQUE_VIOLATION: &str = "23505";
pub const NOT_FOUND: &str = "NOT_FOUND";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(String),

    #[error("unexpected backend response: {0}")]
    Decode(String),

    #[error("backend rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },
}

impl BackendError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        BackendError::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub mod in_memory;
pub mod rest;
