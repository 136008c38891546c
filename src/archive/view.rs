use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::archive::calendar::{self, CalendarGrid};
use crate::archive::filter::filter;
use crate::archive::ledger::{self, LEDGER_PAGE_SIZE};
use crate::archive::pagination::Page;
use crate::archive::timeline::{self, TimelineEntry, TIMELINE_PAGE_SIZE};
use crate::models::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Calendar,
    Timeline,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Calendar => "calendar",
            ViewMode::Timeline => "timeline",
            ViewMode::List => "list",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "calendar" => Some(ViewMode::Calendar),
            "timeline" => Some(ViewMode::Timeline),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

/// Everything a projection depends on besides the projects themselves.
/// `today` is carried explicitly so projections stay pure.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Any day inside the month the calendar shows.
    pub viewed: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub query: String,
    /// 1-based page for the timeline and ledger.
    pub page: usize,
    pub today: NaiveDate,
    pub timeline_page_size: usize,
    pub ledger_page_size: usize,
}

impl ViewState {
    pub fn new(viewed: NaiveDate, today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::default(),
            viewed,
            selected: None,
            query: String::new(),
            page: 1,
            today,
            timeline_page_size: TIMELINE_PAGE_SIZE,
            ledger_page_size: LEDGER_PAGE_SIZE,
        }
    }

    /// Move forward one calendar month. The day-of-month clamps to the
    /// target month's length (Jan 31 becomes Feb 28 or 29).
    pub fn next_month(&mut self) {
        if let Some(next) = self.viewed.checked_add_months(Months::new(1)) {
            self.viewed = next;
        }
    }

    /// Move back one calendar month, clamping like [`ViewState::next_month`].
    pub fn prev_month(&mut self) {
        if let Some(prev) = self.viewed.checked_sub_months(Months::new(1)) {
            self.viewed = prev;
        }
    }

    pub fn reset_to_today(&mut self) {
        self.viewed = self.today;
    }

    /// Jump to `year`, keeping the month and clamping the day.
    pub fn set_year(&mut self, year: i32) {
        let month = self.viewed.month();
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return;
        };
        let last = calendar::last_of_month(first);
        self.viewed = NaiveDate::from_ymd_opt(year, month, self.viewed.day()).unwrap_or(last);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveView<'a> {
    Calendar(CalendarGrid<'a>),
    Timeline(Page<TimelineEntry<'a>>),
    List(Page<&'a Project>),
}

impl<'a> ArchiveView<'a> {
    pub fn mode(&self) -> ViewMode {
        match self {
            ArchiveView::Calendar(_) => ViewMode::Calendar,
            ArchiveView::Timeline(_) => ViewMode::Timeline,
            ArchiveView::List(_) => ViewMode::List,
        }
    }

    /// Detail intent for a project rendered by this view.
    pub fn open(&self, id: &str) -> Option<ArchiveEvent<'a>> {
        let found = match self {
            ArchiveView::Calendar(grid) => grid
                .cells
                .iter()
                .flat_map(|cell| cell.projects.iter().copied())
                .find(|project| project.id == id),
            ArchiveView::Timeline(page) => page
                .items
                .iter()
                .map(|entry| entry.project)
                .find(|project| project.id == id),
            ArchiveView::List(page) => page.items.iter().copied().find(|project| project.id == id),
        };
        found.map(ArchiveEvent::ProjectOpened)
    }
}

/// Signals a view raises back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveEvent<'a> {
    DaySelected {
        date: NaiveDate,
        projects: Vec<&'a Project>,
    },
    ProjectOpened(&'a Project),
}

/// Filter `projects` by the state's query and render the state's view mode.
pub fn project<'a>(projects: &'a [Project], state: &ViewState) -> ArchiveView<'a> {
    let filtered = filter(projects, &state.query);
    match state.mode {
        ViewMode::Calendar => ArchiveView::Calendar(calendar::project_calendar(&filtered, state)),
        ViewMode::Timeline => ArchiveView::Timeline(timeline::project_timeline(
            &filtered,
            state.timeline_page_size,
            state.page,
        )),
        ViewMode::List => ArchiveView::List(ledger::project_ledger(
            &filtered,
            state.ledger_page_size,
            state.page,
        )),
    }
}
