use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::modules::students::core::debounce::Debouncer;
use crate::modules::students::core::errors::StudentsError;
use crate::modules::students::core::filter::{
    FilterChange, StudentCriteria, StudentFilter, StudentQuery,
};
use crate::modules::students::core::pagination::{PageItem, clamp_page, page_window, total_pages};
use crate::modules::students::core::student::{GradeCounts, StudentPage, StudentRow};
use crate::modules::students::use_cases::list_students::queries_port::StudentDirectory;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub criteria: StudentCriteria,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub pages: Vec<PageItem>,
    pub rows: Vec<StudentRow>,
    pub total: u64,
    pub grade_counts: GradeCounts,
    pub loading: bool,
    pub error: Option<String>,
}

/// A row taken off the page ahead of its backend delete.
#[derive(Debug, Clone)]
pub struct HiddenRow {
    position: usize,
    row: StudentRow,
}

#[derive(Default)]
struct DashboardState {
    filter: StudentFilter,
    page: StudentPage,
    error: Option<String>,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Admin student list: filters, debounced search, clamped paging.
pub struct StudentsDashboard {
    directory: Arc<dyn StudentDirectory>,
    page_size: u32,
    debouncer: Debouncer,
    state: Mutex<DashboardState>,
    in_flight: AtomicUsize,
    latest_request: AtomicU64,
}

impl StudentsDashboard {
    pub fn new(directory: Arc<dyn StudentDirectory>, page_size: u32, debounce: Duration) -> Self {
        Self {
            directory,
            page_size: page_size.max(1),
            debouncer: Debouncer::new(debounce),
            state: Mutex::new(DashboardState::default()),
            in_flight: AtomicUsize::new(0),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// True only while a directory call is actually running.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn view(&self) -> DashboardView {
        let state = self.state.lock().await;
        let pages = total_pages(state.page.total, self.page_size);
        DashboardView {
            criteria: state.filter.criteria().clone(),
            page: state.filter.page(),
            page_size: self.page_size,
            total_pages: pages,
            pages: page_window(state.filter.page(), pages),
            rows: state.page.rows.clone(),
            total: state.page.total,
            grade_counts: state.page.grade_counts,
            loading: self.is_loading(),
            error: state.error.clone(),
        }
    }

    pub async fn criteria(&self) -> StudentCriteria {
        self.state.lock().await.filter.criteria().clone()
    }

    pub async fn visible_rows(&self) -> Vec<StudentRow> {
        self.state.lock().await.page.rows.clone()
    }

    /// Re-requests the current filter and page. A page left past the end by a shrinking
    /// result set is pulled back to the last page.
    pub async fn refresh(&self) -> Result<(), StudentsError> {
        let ticket = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.state.lock().await.filter.to_query(self.page_size);
        let mut page = self.fetch(&query).await?;

        let last_page = total_pages(page.total, self.page_size);
        let mut settled_page = query.page;
        if query.page > last_page {
            settled_page = last_page;
            let retry = StudentQuery {
                page: last_page,
                ..query
            };
            page = self.fetch(&retry).await?;
        }

        if self.latest_request.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "dropping superseded student page");
            return Ok(());
        }
        let mut state = self.state.lock().await;
        state.filter.set_page(settled_page);
        state.page = page;
        state.error = None;
        Ok(())
    }

    pub async fn apply(&self, change: FilterChange) -> Result<(), StudentsError> {
        self.state.lock().await.filter.apply(change);
        self.refresh().await
    }

    /// Debounced search. Returns `false` when a later keystroke superseded this one.
    pub async fn search(&self, text: impl Into<String>) -> Result<bool, StudentsError> {
        let text = text.into();
        if !self.debouncer.settle().await {
            return Ok(false);
        }
        let term = Some(text.trim().to_string()).filter(|t| !t.is_empty());
        self.apply(FilterChange::Search(term)).await?;
        Ok(true)
    }

    pub async fn go_to_page(&self, page: u32) -> Result<(), StudentsError> {
        {
            let mut state = self.state.lock().await;
            let clamped = clamp_page(page, state.page.total, self.page_size);
            state.filter.set_page(clamped);
        }
        self.refresh().await
    }

    pub async fn hide_row(&self, registration_id: &str) -> Result<HiddenRow, StudentsError> {
        let mut state = self.state.lock().await;
        let position = state
            .page
            .rows
            .iter()
            .position(|r| r.id == registration_id)
            .ok_or_else(|| StudentsError::NotOnPage(registration_id.to_string()))?;
        let row = state.page.rows.remove(position);
        state.page.total = state.page.total.saturating_sub(1);
        state.page.grade_counts.remove(row.grade);
        Ok(HiddenRow { position, row })
    }

    pub async fn restore_row(&self, hidden: HiddenRow) {
        let mut state = self.state.lock().await;
        let position = hidden.position.min(state.page.rows.len());
        state.page.total += 1;
        state.page.grade_counts.add(hidden.row.grade);
        state.page.rows.insert(position, hidden.row);
    }

    async fn fetch(&self, query: &StudentQuery) -> Result<StudentPage, StudentsError> {
        let result = {
            let _in_flight = InFlight::start(&self.in_flight);
            self.directory.query(query).await
        };
        match result {
            Ok(page) => Ok(page),
            Err(err) => {
                error!(error = %err, page = query.page, "student query failed");
                self.state.lock().await.error = Some(err.to_string());
                Err(StudentsError::Query(err.to_string()))
            }
        }
    }
}
