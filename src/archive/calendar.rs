use chrono::{Datelike, Days, Months, NaiveDate};

use crate::archive::index::DateIndex;
use crate::archive::view::{ArchiveEvent, ViewState};
use crate::models::Project;

/// Projects shown directly in a day cell; the rest collapse into a count.
pub const VISIBLE_PER_DAY: usize = 3;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// Every project launching this day, in index order.
    pub projects: Vec<&'a Project>,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl<'a> DayCell<'a> {
    pub fn visible(&self) -> &[&'a Project] {
        &self.projects[..self.projects.len().min(VISIBLE_PER_DAY)]
    }

    pub fn overflow(&self) -> usize {
        self.projects.len().saturating_sub(VISIBLE_PER_DAY)
    }
}

/// What a click on the grid landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTarget<'t> {
    Day(NaiveDate),
    Project { day: NaiveDate, id: &'t str },
}

/// A month laid out as whole Sunday-first weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid<'a> {
    /// First day of the reference month.
    pub month: NaiveDate,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn month_name(&self) -> String {
        self.month.format("%B").to_string()
    }

    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    /// Resolve a click to a single event. A click on a project inside a day
    /// opens that project and never also selects the day.
    pub fn click(&self, target: GridTarget<'_>) -> Option<ArchiveEvent<'a>> {
        match target {
            GridTarget::Day(date) => self.cell(date).map(|cell| ArchiveEvent::DaySelected {
                date,
                projects: cell.projects.clone(),
            }),
            GridTarget::Project { day, id } => self
                .cell(day)?
                .projects
                .iter()
                .find(|project| project.id == id)
                .map(|project| ArchiveEvent::ProjectOpened(*project)),
        }
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// First and last day shown for the month containing `reference`.
pub fn grid_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(reference);
    let last = last_of_month(reference);

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());

    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);
    (start, end)
}

/// Lay out the month of `state.viewed`, bucketing `projects` by launch day.
pub fn project_calendar<'a>(projects: &[&'a Project], state: &ViewState) -> CalendarGrid<'a> {
    let index = DateIndex::build(projects.iter().copied());
    let month = first_of_month(state.viewed);
    let (start, end) = grid_bounds(month);

    let cells = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| DayCell {
            date,
            projects: index.get(date).to_vec(),
            in_month: date.year() == month.year() && date.month() == month.month(),
            is_today: date == state.today,
            is_selected: state.selected == Some(date),
        })
        .collect();

    CalendarGrid { month, cells }
}
