use chrono::{DateTime, Utc};

use crate::archive::pagination::{paginate, Page};
use crate::models::Project;

pub const TIMELINE_PAGE_SIZE: usize = 4;

/// Which side of the timeline spine an entry renders on. Layout only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub project: &'a Project,
    pub launch_at: DateTime<Utc>,
    pub side: Side,
}

/// Chronological page of launches. Sorting is stable on the full timestamp,
/// so same-instant launches keep their input order. Undated projects are
/// logged and left out.
pub fn project_timeline<'a>(
    projects: &[&'a Project],
    page_size: usize,
    page: usize,
) -> Page<TimelineEntry<'a>> {
    let mut dated: Vec<(&'a Project, DateTime<Utc>)> = projects
        .iter()
        .filter_map(|project| match project.launch_at() {
            Some(at) => Some((*project, at)),
            None => {
                tracing::error!(
                    project_id = %project.id,
                    launch_date = %project.launch_date,
                    "Invalid project launch date, leaving it off the timeline"
                );
                None
            }
        })
        .collect();
    dated.sort_by_key(|(_, at)| *at);

    let mut position = 0usize;
    paginate(dated, page_size, page).map(|(project, launch_at)| {
        let side = if position % 2 == 0 { Side::Left } else { Side::Right };
        position += 1;
        TimelineEntry {
            project,
            launch_at,
            side,
        }
    })
}
