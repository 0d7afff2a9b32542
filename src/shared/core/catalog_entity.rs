use serde::{Deserialize, Serialize};

/// Names the backend uses for the fallback entity that receives reassigned references.
pub const FALLBACK_NAMES: [&str; 3] = ["General", "عام", "عامة"];

/// A teacher, material or center row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
        }
    }

    pub fn is_fallback(&self) -> bool {
        let name = self.name.trim();
        FALLBACK_NAMES
            .iter()
            .any(|fallback| fallback.eq_ignore_ascii_case(name))
    }
}
