// A nullable reference to a material or a teacher.
//
// The backend stores "general" (available to everyone) as a null foreign key. `RefKey`
// makes that case explicit so selections never compare raw `Option<String>` values.
// On the wire it is the id itself, or the literal `general`.

use serde::{Deserialize, Serialize};

pub const GENERAL_KEY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefKey {
    General,
    Id(String),
}

impl RefKey {
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some(id) if !id.is_empty() && id != GENERAL_KEY => RefKey::Id(id.to_string()),
            _ => RefKey::General,
        }
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            RefKey::General => None,
            RefKey::Id(id) => Some(id),
        }
    }

    pub fn matches(&self, id: Option<&str>) -> bool {
        self.as_id() == id
    }
}

impl From<Option<String>> for RefKey {
    fn from(value: Option<String>) -> Self {
        RefKey::from_id(value.as_deref())
    }
}

impl From<RefKey> for Option<String> {
    fn from(value: RefKey) -> Self {
        match value {
            RefKey::General => None,
            RefKey::Id(id) => Some(id),
        }
    }
}

impl From<String> for RefKey {
    fn from(value: String) -> Self {
        RefKey::from_id(Some(value.as_str()))
    }
}

impl From<RefKey> for String {
    fn from(value: RefKey) -> Self {
        match value {
            RefKey::General => GENERAL_KEY.to_string(),
            RefKey::Id(id) => id,
        }
    }
}
