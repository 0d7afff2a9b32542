use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    async_graphql::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    First,
    Second,
    Third,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown grade: {0}")]
pub struct UnknownGrade(pub String);

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::First, Grade::Second, Grade::Third];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::First => "first",
            Grade::Second => "second",
            Grade::Third => "third",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Grade::First => "First Secondary",
            Grade::Second => "Second Secondary",
            Grade::Third => "Third Secondary",
        }
    }

    /// Second and third grade must book both math subjects.
    pub fn requires_math_pair(self) -> bool {
        matches!(self, Grade::Second | Grade::Third)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Grade::First),
            "second" => Ok(Grade::Second),
            "third" => Ok(Grade::Third),
            other => Err(UnknownGrade(other.to_string())),
        }
    }
}

#[cfg(test)]
mod grade_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("first", Grade::First)]
    #[case(" Second ", Grade::Second)]
    #[case("THIRD", Grade::Third)]
    fn it_should_parse_the_grade(#[case] raw: &str, #[case] expected: Grade) {
        assert_eq!(raw.parse::<Grade>(), Ok(expected));
    }

    #[rstest]
    fn it_should_reject_an_unknown_grade() {
        assert_eq!(
            "fourth".parse::<Grade>(),
            Err(UnknownGrade("fourth".to_string()))
        );
    }

    #[rstest]
    fn it_should_serialize_lowercase() {
        let json = serde_json::to_value(Grade::Second).unwrap();
        assert_eq!(json, serde_json::json!("second"));
    }

    #[rstest]
    fn only_upper_grades_require_the_math_pair() {
        assert!(!Grade::First.requires_math_pair());
        assert!(Grade::Second.requires_math_pair());
        assert!(Grade::Third.requires_math_pair());
    }
}
