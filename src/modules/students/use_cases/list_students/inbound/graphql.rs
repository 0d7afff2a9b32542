use async_graphql::{Context, InputObject, Object, Result as GqlResult, SimpleObject};
use chrono::{DateTime, Utc};

use crate::modules::students::core::filter::{GroupSlot, StudentCriteria, StudentQuery};
use crate::modules::students::core::pagination::total_pages;
use crate::modules::students::core::student::{GradeCounts, StudentPage, StudentRow};
use crate::modules::students::use_cases::list_students::handler::DEFAULT_PAGE_SIZE;
use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;
use crate::shell::state::AppState;

/// `teacher` and `material` take an id or `general`. `group` is `name|time`.
#[derive(InputObject, Default)]
pub struct GqlStudentFilter {
    pub grade: Option<Grade>,
    pub teacher: Option<String>,
    pub material: Option<String>,
    pub center: Option<String>,
    pub group: Option<String>,
    pub search: Option<String>,
}

impl GqlStudentFilter {
    fn into_criteria(self) -> Result<StudentCriteria, async_graphql::Error> {
        let group = self
            .group
            .map(|g| g.parse::<GroupSlot>())
            .transpose()
            .map_err(async_graphql::Error::new)?;
        Ok(StudentCriteria {
            grade: self.grade,
            teacher: self.teacher.map(RefKey::from),
            material: self.material.map(RefKey::from),
            center: self.center,
            group,
            search: self.search,
        })
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlStudent {
    pub id: String,
    pub student_name: String,
    pub student_phone: String,
    pub parent_phone: String,
    pub transaction_id: Option<String>,
    pub grade: Grade,
    pub teacher_name: Option<String>,
    pub material_name: Option<String>,
    pub center_name: Option<String>,
    pub group_name: String,
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
}

#[derive(SimpleObject, Clone, Copy)]
pub struct GqlGradeCounts {
    pub first: u64,
    pub second: u64,
    pub third: u64,
}

#[derive(SimpleObject, Clone)]
pub struct GqlStudentPage {
    pub rows: Vec<GqlStudent>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    pub grade_counts: GqlGradeCounts,
}

impl From<StudentRow> for GqlStudent {
    fn from(v: StudentRow) -> Self {
        Self {
            id: v.id,
            student_name: v.student_name,
            student_phone: v.student_phone,
            parent_phone: v.parent_phone,
            transaction_id: v.transaction_id,
            grade: v.grade,
            teacher_name: v.teacher_name,
            material_name: v.material_name,
            center_name: v.center_name,
            group_name: v.group_name,
            time_slot: v.time_slot,
            created_at: v.created_at,
        }
    }
}

impl From<GradeCounts> for GqlGradeCounts {
    fn from(v: GradeCounts) -> Self {
        Self {
            first: v.first,
            second: v.second,
            third: v.third,
        }
    }
}

#[derive(Default)]
pub struct StudentsQuery;

impl StudentsQuery {
    async fn page(
        state: &AppState,
        filter: Option<GqlStudentFilter>,
        page: u32,
        page_size: u32,
    ) -> GqlResult<StudentPage> {
        let query = StudentQuery {
            criteria: filter.unwrap_or_default().into_criteria()?,
            page: page.max(1),
            page_size: page_size.max(1),
        };
        Ok(state.directory.query(&query).await?)
    }
}

#[Object]
impl StudentsQuery {
    async fn students(
        &self,
        context: &Context<'_>,
        filter: Option<GqlStudentFilter>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> GqlResult<GqlStudentPage> {
        let state = context.data_unchecked::<AppState>();
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let result = Self::page(state, filter, page, page_size).await?;
        Ok(GqlStudentPage {
            total_pages: total_pages(result.total, page_size),
            total: result.total,
            page,
            grade_counts: result.grade_counts.into(),
            rows: result.rows.into_iter().map(Into::into).collect(),
        })
    }

    /// Per-grade totals under every filter except the grade.
    async fn grade_counts(
        &self,
        context: &Context<'_>,
        filter: Option<GqlStudentFilter>,
    ) -> GqlResult<GqlGradeCounts> {
        let state = context.data_unchecked::<AppState>();
        let result = Self::page(state, filter, 1, 1).await?;
        Ok(result.grade_counts.into())
    }
}
