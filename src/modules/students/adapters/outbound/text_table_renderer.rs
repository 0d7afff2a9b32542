use async_trait::async_trait;

use crate::modules::students::core::report::{Orientation, ReportLine, StudentReport};
use crate::modules::students::use_cases::print_report::renderer_port::{
    DocumentRenderer, RenderedDocument,
};

const HEADERS: [&str; 8] = [
    "#",
    "Student",
    "Grade",
    "Group / Time",
    "Teacher",
    "Student phone",
    "Parent phone",
    "Registered",
];

/// Plain-text table renderer. Keeps the PDF file name so callers can swap renderers freely.
#[derive(Default)]
pub struct TextTableRenderer;

impl TextTableRenderer {
    pub fn new() -> Self {
        Self
    }

    fn cells(line: &ReportLine) -> [String; 8] {
        [
            line.index.to_string(),
            line.student_name.clone(),
            line.grade_name.clone(),
            line.group_time.clone(),
            line.teacher_name.clone(),
            line.student_phone.clone(),
            line.parent_phone.clone(),
            line.registered_on.clone(),
        ]
    }

    pub fn render_text(report: &StudentReport) -> String {
        let rows: Vec<[String; 8]> = report.lines.iter().map(Self::cells).collect();
        let mut widths: [usize; 8] = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let format_row = |cells: &[String]| {
            cells
                .iter()
                .zip(widths.iter())
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        let orientation = match report.orientation {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        };

        let mut out = Vec::with_capacity(rows.len() + 4);
        out.push(format!(
            "{} ({}, printed {})",
            report.title,
            orientation,
            report.printed_on.format("%Y-%m-%d")
        ));
        out.push(format_row(&header));
        out.push(rule);
        out.extend(rows.iter().map(|row| format_row(row)));
        out.join("\n") + "\n"
    }
}

#[async_trait]
impl DocumentRenderer for TextTableRenderer {
    async fn render(&self, report: &StudentReport) -> anyhow::Result<RenderedDocument> {
        Ok(RenderedDocument {
            file_name: report.file_name.clone(),
            content_type: "text/plain; charset=utf-8".to_string(),
            bytes: Self::render_text(report).into_bytes(),
        })
    }
}
