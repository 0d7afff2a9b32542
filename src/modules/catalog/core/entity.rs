use serde::{Deserialize, Serialize};
use std::fmt;

use crate::modules::catalog::core::errors::CatalogError;

pub const MIN_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Teacher,
    Material,
    Center,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Teacher, CatalogKind::Material, CatalogKind::Center];

    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::Teacher => "teachers",
            CatalogKind::Material => "materials",
            CatalogKind::Center => "centers",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogKind::Teacher => "teacher",
            CatalogKind::Material => "material",
            CatalogKind::Center => "center",
        };
        f.write_str(name)
    }
}

/// Trims and length-checks a catalog name.
pub fn validate_name(name: &str) -> Result<String, CatalogError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(CatalogError::NameTooShort);
    }
    Ok(trimmed.to_string())
}

/// Catalog names compare trimmed and case-insensitively.
pub fn same_name(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}
