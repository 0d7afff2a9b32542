use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::core::grade::Grade;

/// A registration as listed on the admin dashboard, with display names joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    pub id: String,
    pub student_name: String,
    pub student_phone: String,
    pub parent_phone: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub grade: Grade,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub material_name: Option<String>,
    pub center_id: String,
    #[serde(default)]
    pub center_name: Option<String>,
    pub group_name: String,
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub first: u64,
    pub second: u64,
    pub third: u64,
}

impl GradeCounts {
    pub fn add(&mut self, grade: Grade) {
        match grade {
            Grade::First => self.first += 1,
            Grade::Second => self.second += 1,
            Grade::Third => self.third += 1,
        }
    }

    pub fn remove(&mut self, grade: Grade) {
        let bucket = match grade {
            Grade::First => &mut self.first,
            Grade::Second => &mut self.second,
            Grade::Third => &mut self.third,
        };
        *bucket = bucket.saturating_sub(1);
    }

    pub fn get(&self, grade: Grade) -> u64 {
        match grade {
            Grade::First => self.first,
            Grade::Second => self.second,
            Grade::Third => self.third,
        }
    }

    pub fn total(&self) -> u64 {
        self.first + self.second + self.third
    }
}

/// One round trip's worth of dashboard data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPage {
    pub rows: Vec<StudentRow>,
    pub total: u64,
    pub grade_counts: GradeCounts,
}

#[cfg(test)]
mod grade_counts_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_bucket_by_grade() {
        let mut counts = GradeCounts::default();
        counts.add(Grade::First);
        counts.add(Grade::Third);
        counts.add(Grade::Third);
        assert_eq!(counts.get(Grade::First), 1);
        assert_eq!(counts.get(Grade::Second), 0);
        assert_eq!(counts.get(Grade::Third), 2);
        assert_eq!(counts.total(), 3);
        counts.remove(Grade::Third);
        counts.remove(Grade::Second);
        assert_eq!(counts.get(Grade::Third), 1);
        assert_eq!(counts.get(Grade::Second), 0);
    }
}
