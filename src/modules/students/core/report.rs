use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::students::core::filter::StudentCriteria;
use crate::modules::students::core::student::StudentRow;
use crate::shared::core::time_label::group_time_label;

pub const REPORT_TITLE: &str = "Student Report";
const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportScope {
    /// The rows on the dashboard's current page.
    #[default]
    Visible,
    /// Every row matching the current filter, across pages.
    AllFiltered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub index: usize,
    pub student_name: String,
    pub grade_name: String,
    pub group_time: String,
    pub teacher_name: String,
    pub student_phone: String,
    pub parent_phone: String,
    pub registered_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentReport {
    pub title: String,
    pub file_name: String,
    pub orientation: Orientation,
    pub printed_on: NaiveDate,
    pub lines: Vec<ReportLine>,
}

/// `Student-Report[_Grade-X][_Group]_YYYY-MM-DD.pdf`
pub fn report_file_name(criteria: &StudentCriteria, today: NaiveDate) -> String {
    let mut name = String::from("Student-Report");
    if let Some(grade) = criteria.grade {
        let raw = grade.as_str();
        let mut chars = raw.chars();
        if let Some(first) = chars.next() {
            name.push_str("_Grade-");
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    if let Some(group) = &criteria.group {
        let group_name: String = group
            .group_name
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        name.push('_');
        name.push_str(&group_name);
    }
    name.push_str(&format!("_{}.pdf", today.format("%Y-%m-%d")));
    name
}

pub fn build_report(
    rows: &[StudentRow],
    criteria: &StudentCriteria,
    orientation: Orientation,
    today: NaiveDate,
) -> StudentReport {
    let lines = rows
        .iter()
        .enumerate()
        .map(|(position, row)| ReportLine {
            index: position + 1,
            student_name: row.student_name.clone(),
            grade_name: row.grade.display_name().to_string(),
            group_time: group_time_label(&row.group_name, &row.time_slot),
            teacher_name: row
                .teacher_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| MISSING.to_string()),
            student_phone: row.student_phone.clone(),
            parent_phone: row.parent_phone.clone(),
            registered_on: row.created_at.format("%d/%m/%Y").to_string(),
        })
        .collect();
    StudentReport {
        title: REPORT_TITLE.to_string(),
        file_name: report_file_name(criteria, today),
        orientation,
        printed_on: today,
        lines,
    }
}

#[cfg(test)]
mod student_report_tests {
    use super::*;
    use crate::modules::students::core::filter::GroupSlot;
    use crate::shared::core::grade::Grade;
    use crate::tests::fixtures::students::StudentRowBuilder;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 14).unwrap()
    }

    #[rstest]
    fn it_should_name_an_unfiltered_report_by_date() {
        assert_eq!(
            report_file_name(&StudentCriteria::default(), today()),
            "Student-Report_2025-09-14.pdf"
        );
    }

    #[rstest]
    fn it_should_name_the_report_after_grade_and_group() {
        let criteria = StudentCriteria {
            grade: Some(Grade::Second),
            group: Some(GroupSlot {
                group_name: "Sat Tue".into(),
                time_slot: "14:00".into(),
            }),
            ..StudentCriteria::default()
        };
        assert_eq!(
            report_file_name(&criteria, today()),
            "Student-Report_Grade-Second_Sat-Tue_2025-09-14.pdf"
        );
    }

    #[rstest]
    fn it_should_number_the_lines_from_one() {
        let rows = vec![
            StudentRowBuilder::new().student_name("Mona").build(),
            StudentRowBuilder::new()
                .student_name("Omar")
                .teacher(None)
                .group("Sun-Wed", "16:00")
                .build(),
        ];
        let report = build_report(
            &rows,
            &StudentCriteria::default(),
            Orientation::Portrait,
            today(),
        );
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.lines[0].index, 1);
        assert_eq!(report.lines[1].index, 2);
        assert_eq!(report.lines[1].teacher_name, "-");
        assert_eq!(report.lines[1].group_time, "Sun-Wed - 4:00 PM");
        assert_eq!(report.orientation, Orientation::Portrait);
    }
}
