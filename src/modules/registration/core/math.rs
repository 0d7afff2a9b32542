use serde::{Deserialize, Serialize};

use crate::shared::core::grade::Grade;

/// The two paired math subjects upper grades must both book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathSubject {
    Pure,
    Applied,
}

const PURE_MARKERS: [&str; 2] = ["pure", "بحتة"];
const APPLIED_MARKERS: [&str; 2] = ["applied", "تطبيقية"];

impl MathSubject {
    pub fn detect(material_name: &str) -> Option<Self> {
        let name = material_name.to_lowercase();
        if PURE_MARKERS.iter().any(|m| name.contains(m)) {
            Some(MathSubject::Pure)
        } else if APPLIED_MARKERS.iter().any(|m| name.contains(m)) {
            Some(MathSubject::Applied)
        } else {
            None
        }
    }

    pub fn paired(self) -> Self {
        match self {
            MathSubject::Pure => MathSubject::Applied,
            MathSubject::Applied => MathSubject::Pure,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MathSubject::Pure => "Pure Math",
            MathSubject::Applied => "Applied Math",
        }
    }
}

pub fn is_math_registration(grade: Grade, material_name: &str) -> bool {
    grade.requires_math_pair() && MathSubject::detect(material_name).is_some()
}
