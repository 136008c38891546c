use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::archive::calendar::{CalendarGrid, WEEKDAY_LABELS};
use crate::archive::{project, ArchiveView, Page, ViewMode, ViewState};
use crate::config::Config;
use crate::error::AppError;
use crate::models::Project;
use crate::state::SharedState;

/// Query parameters shared by the archive API and the HTML archive page.
#[derive(Debug, Default, Deserialize)]
pub struct ArchiveParams {
    pub view: Option<String>,
    pub q: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub selected: Option<String>,
    pub page: Option<usize>,
}

impl ArchiveParams {
    /// Resolve into a `ViewState` for `mode`. Without a year/month the
    /// configured start month is shown.
    pub fn view_state(
        &self,
        config: &Config,
        mode: ViewMode,
        today: NaiveDate,
    ) -> Result<ViewState, AppError> {
        let mut state = ViewState::new(config.start_date, today);
        state.mode = mode;
        state.timeline_page_size = config.timeline_page_size;
        state.ledger_page_size = config.ledger_page_size;
        state.query = self.q.clone().unwrap_or_default();
        state.page = self.page.unwrap_or(1);

        match (self.year, self.month) {
            (Some(year), Some(month)) => {
                state.viewed = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                    AppError::BadRequest(format!("Invalid month: {year}-{month}"))
                })?;
            }
            (Some(year), None) => state.set_year(year),
            (None, Some(_)) => {
                return Err(AppError::BadRequest("month requires year".to_string()));
            }
            (None, None) => {}
        }

        if let Some(raw) = self.selected.as_deref().filter(|s| !s.is_empty()) {
            let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("Invalid selected date: '{raw}'")))?;
            state.selected = Some(day);
        }

        Ok(state)
    }
}

#[derive(Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    fn of(date: NaiveDate) -> Self {
        MonthRef {
            year: date.year(),
            month: date.month(),
        }
    }
}

#[derive(Serialize)]
struct DayResponse<'a> {
    date: NaiveDate,
    in_month: bool,
    is_today: bool,
    is_selected: bool,
    total: usize,
    overflow: usize,
    projects: &'a [&'a Project],
}

#[derive(Serialize)]
struct CalendarResponse<'a> {
    year: i32,
    month: u32,
    month_name: String,
    rows: usize,
    weekdays: [&'static str; 7],
    prev: MonthRef,
    next: MonthRef,
    days: Vec<DayResponse<'a>>,
}

#[derive(Serialize)]
struct PageResponse<T> {
    items: Vec<T>,
    page: usize,
    page_count: usize,
    page_size: usize,
    total: usize,
    has_prev: bool,
    has_next: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        PageResponse {
            has_prev: page.has_prev(),
            has_next: page.has_next(),
            page: page.page,
            page_count: page.page_count,
            page_size: page.page_size,
            total: page.total,
            items: page.items,
        }
    }
}

#[derive(Serialize)]
struct TimelineItem<'a> {
    side: &'static str,
    launch_at: String,
    project: &'a Project,
}

fn calendar_response<'a>(grid: &'a CalendarGrid<'a>, state: &ViewState) -> CalendarResponse<'a> {
    let mut prev = state.clone();
    prev.prev_month();
    let mut next = state.clone();
    next.next_month();

    CalendarResponse {
        year: grid.year(),
        month: MonthRef::of(grid.month).month,
        month_name: grid.month_name(),
        rows: grid.rows(),
        weekdays: WEEKDAY_LABELS,
        prev: MonthRef::of(prev.viewed),
        next: MonthRef::of(next.viewed),
        days: grid
            .cells
            .iter()
            .map(|cell| DayResponse {
                date: cell.date,
                in_month: cell.in_month,
                is_today: cell.is_today,
                is_selected: cell.is_selected,
                total: cell.projects.len(),
                overflow: cell.overflow(),
                projects: cell.visible(),
            })
            .collect(),
    }
}

pub async fn calendar(
    State(state): State<SharedState>,
    Query(params): Query<ArchiveParams>,
) -> Result<Response, AppError> {
    let view = params.view_state(&state.config, ViewMode::Calendar, Utc::now().date_naive())?;
    let store = state.archive.read().await;
    let ArchiveView::Calendar(grid) = project(store.projects(), &view) else {
        return Err(AppError::Internal("calendar projection mismatch".to_string()));
    };
    Ok(Json(calendar_response(&grid, &view)).into_response())
}

pub async fn timeline(
    State(state): State<SharedState>,
    Query(params): Query<ArchiveParams>,
) -> Result<Response, AppError> {
    let view = params.view_state(&state.config, ViewMode::Timeline, Utc::now().date_naive())?;
    let store = state.archive.read().await;
    let ArchiveView::Timeline(page) = project(store.projects(), &view) else {
        return Err(AppError::Internal("timeline projection mismatch".to_string()));
    };
    let page = page.map(|entry| TimelineItem {
        side: entry.side.as_str(),
        launch_at: entry.project.launch_date.clone(),
        project: entry.project,
    });
    Ok(Json(PageResponse::from(page)).into_response())
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ArchiveParams>,
) -> Result<Response, AppError> {
    let view = params.view_state(&state.config, ViewMode::List, Utc::now().date_naive())?;
    let store = state.archive.read().await;
    let ArchiveView::List(page) = project(store.projects(), &view) else {
        return Err(AppError::Internal("list projection mismatch".to_string()));
    };
    Ok(Json(PageResponse::from(page)).into_response())
}
