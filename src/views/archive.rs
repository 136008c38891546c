use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{Datelike, NaiveDate, Utc};

use crate::archive::calendar::{CalendarGrid, GridTarget, WEEKDAY_LABELS};
use crate::archive::{project, ArchiveEvent, ArchiveView, Page, TimelineEntry, ViewMode, ViewState};
use crate::error::AppError;
use crate::models::Project;
use crate::routes::archive::ArchiveParams;
use crate::state::SharedState;
use crate::views::render;

const YEAR_MIN: i32 = 2020;
const YEAR_MAX: i32 = 2040;

pub(crate) struct ChipRow {
    pub href: String,
    pub logo: String,
    pub name: String,
}

impl ChipRow {
    pub fn of(project: &Project) -> Self {
        ChipRow {
            href: format!("/projects/{}", project.id),
            logo: project.logo.clone(),
            name: project.name.clone(),
        }
    }
}

struct DayRow {
    day_number: String,
    href: String,
    in_month: bool,
    is_today: bool,
    is_selected: bool,
    projects: Vec<ChipRow>,
    more: Option<usize>,
}

struct CalendarPanel {
    month_name: String,
    year: i32,
    month: u32,
    weekdays: Vec<&'static str>,
    weeks: Vec<Vec<DayRow>>,
    prev_href: String,
    next_href: String,
    today_href: String,
}

struct SelectedDay {
    label: String,
    projects: Vec<ChipRow>,
}

struct TimelineRow {
    id: String,
    logo: String,
    name: String,
    network: String,
    category: String,
    notes: String,
    date_label: String,
    time_label: String,
    side: &'static str,
    hash: String,
}

/// Row of the ledger table, also used by the admin project list.
pub(crate) struct LedgerRow {
    pub id: String,
    pub logo: String,
    pub name: String,
    pub category: String,
    pub status: &'static str,
    pub network: String,
    pub date_label: String,
    pub short_id: String,
}

impl LedgerRow {
    pub fn of(project: &Project) -> Self {
        let short_id: String = project.id.chars().take(16).collect();
        LedgerRow {
            id: project.id.clone(),
            logo: project.logo.clone(),
            name: project.name.clone(),
            category: project.category.clone(),
            status: project.status_or_default().as_str(),
            network: project.network.clone(),
            date_label: date_label(project),
            short_id: short_id.to_uppercase(),
        }
    }
}

struct Pager {
    page: usize,
    page_count: usize,
    prev_href: Option<String>,
    next_href: Option<String>,
    range_label: Option<String>,
}

#[derive(Template)]
#[template(path = "archive/index.html")]
struct ArchiveTemplate {
    view: &'static str,
    query: String,
    year: i32,
    month: u32,
    years: Vec<i32>,
    calendar_href: String,
    timeline_href: String,
    list_href: String,
    calendar: Option<CalendarPanel>,
    selected_day: Option<SelectedDay>,
    timeline: Vec<TimelineRow>,
    ledger: Vec<LedgerRow>,
    pager: Option<Pager>,
    total: usize,
}

/// Link back to the archive page keeping the search and month.
pub(crate) fn archive_href(
    mode: ViewMode,
    query: &str,
    viewed: NaiveDate,
    selected: Option<NaiveDate>,
    page: Option<usize>,
) -> String {
    let mut qs = form_urlencoded::Serializer::new(String::new());
    qs.append_pair("view", mode.as_str());
    if !query.is_empty() {
        qs.append_pair("q", query);
    }
    qs.append_pair("year", &viewed.year().to_string());
    qs.append_pair("month", &viewed.month().to_string());
    if let Some(day) = selected {
        qs.append_pair("selected", &day.format("%Y-%m-%d").to_string());
    }
    if let Some(page) = page {
        qs.append_pair("page", &page.to_string());
    }
    format!("/?{}", qs.finish())
}

pub(crate) fn date_label(project: &Project) -> String {
    project
        .launch_at()
        .map(|at| at.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

fn calendar_panel(grid: &CalendarGrid<'_>, view: &ViewState) -> CalendarPanel {
    let mut prev = view.clone();
    prev.prev_month();
    let mut next = view.clone();
    next.next_month();
    let mut today = view.clone();
    today.reset_to_today();

    let weeks = grid
        .weeks()
        .map(|week| {
            week.iter()
                .map(|cell| DayRow {
                    day_number: cell.date.format("%d").to_string(),
                    href: archive_href(
                        ViewMode::Calendar,
                        &view.query,
                        grid.month,
                        Some(cell.date),
                        None,
                    ),
                    in_month: cell.in_month,
                    is_today: cell.is_today,
                    is_selected: cell.is_selected,
                    projects: cell
                        .visible()
                        .iter()
                        .filter_map(|p| {
                            match grid.click(GridTarget::Project { day: cell.date, id: &p.id }) {
                                Some(ArchiveEvent::ProjectOpened(project)) => {
                                    Some(ChipRow::of(project))
                                }
                                _ => None,
                            }
                        })
                        .collect(),
                    more: (cell.overflow() > 0).then(|| cell.overflow()),
                })
                .collect()
        })
        .collect();

    CalendarPanel {
        month_name: grid.month_name(),
        year: grid.year(),
        month: grid.month.month(),
        weekdays: WEEKDAY_LABELS.to_vec(),
        weeks,
        prev_href: archive_href(ViewMode::Calendar, &view.query, prev.viewed, None, None),
        next_href: archive_href(ViewMode::Calendar, &view.query, next.viewed, None, None),
        today_href: archive_href(ViewMode::Calendar, &view.query, today.viewed, None, None),
    }
}

fn pager<T>(page: &Page<T>, view: &ViewState) -> Pager {
    let href = |p: usize| archive_href(view.mode, &view.query, view.viewed, None, Some(p));
    Pager {
        page: page.page,
        page_count: page.page_count,
        prev_href: page.prev_page().map(&href),
        next_href: page.next_page().map(&href),
        range_label: page
            .range()
            .map(|(first, last)| format!("Showing {first} - {last} of {}", page.total)),
    }
}

fn timeline_row(entry: &TimelineEntry<'_>) -> TimelineRow {
    let project = entry.project;
    TimelineRow {
        id: project.id.clone(),
        logo: project.logo.clone(),
        name: project.name.clone(),
        network: project.network.clone(),
        category: project.category.clone(),
        notes: project.notes.clone(),
        date_label: entry.launch_at.format("%b %d, %Y").to_string(),
        time_label: entry.launch_at.format("%H:%M").to_string(),
        side: entry.side.as_str(),
        hash: project.id.to_uppercase(),
    }
}

pub async fn index(
    State(state): State<SharedState>,
    Query(params): Query<ArchiveParams>,
) -> Result<Response, AppError> {
    let mode = match params.view.as_deref() {
        None | Some("") => ViewMode::Calendar,
        Some("admin") => return Ok(Redirect::to("/admin").into_response()),
        Some(other) => ViewMode::parse(other)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown view: {other}")))?,
    };
    let view = params.view_state(&state.config, mode, Utc::now().date_naive())?;

    let mut template = ArchiveTemplate {
        view: mode.as_str(),
        query: view.query.clone(),
        year: view.viewed.year(),
        month: view.viewed.month(),
        years: (YEAR_MIN..=YEAR_MAX).collect(),
        calendar_href: archive_href(ViewMode::Calendar, &view.query, view.viewed, None, None),
        timeline_href: archive_href(ViewMode::Timeline, &view.query, view.viewed, None, None),
        list_href: archive_href(ViewMode::List, &view.query, view.viewed, None, None),
        calendar: None,
        selected_day: None,
        timeline: Vec::new(),
        ledger: Vec::new(),
        pager: None,
        total: 0,
    };

    let store = state.archive.read().await;
    match project(store.projects(), &view) {
        ArchiveView::Calendar(grid) => {
            template.calendar = Some(calendar_panel(&grid, &view));
            if let Some(ArchiveEvent::DaySelected { date, projects }) =
                view.selected.and_then(|day| grid.click(GridTarget::Day(day)))
            {
                template.selected_day = Some(SelectedDay {
                    label: date.format("%B %d, %Y").to_string(),
                    projects: projects.iter().map(|p| ChipRow::of(p)).collect(),
                });
            }
        }
        ArchiveView::Timeline(page) => {
            template.pager = Some(pager(&page, &view));
            template.total = page.total;
            template.timeline = page.items.iter().map(timeline_row).collect();
        }
        ArchiveView::List(page) => {
            template.pager = Some(pager(&page, &view));
            template.total = page.total;
            template.ledger = page.items.iter().map(|p| LedgerRow::of(p)).collect();
        }
    }
    drop(store);

    Ok(render(&template)?.into_response())
}
