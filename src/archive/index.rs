use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::Project;

/// Projects grouped by the UTC calendar day of their launch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateIndex<'a> {
    buckets: BTreeMap<NaiveDate, Vec<&'a Project>>,
}

impl<'a> DateIndex<'a> {
    /// Bucket `projects` by launch day. Order within a day follows the input.
    /// Projects whose launch date does not parse are logged and skipped.
    pub fn build<I>(projects: I) -> Self
    where
        I: IntoIterator<Item = &'a Project>,
    {
        let mut buckets: BTreeMap<NaiveDate, Vec<&'a Project>> = BTreeMap::new();
        for project in projects {
            match project.launch_day() {
                Some(day) => buckets.entry(day).or_default().push(project),
                None => tracing::error!(
                    project_id = %project.id,
                    launch_date = %project.launch_date,
                    "Invalid project launch date, skipping"
                ),
            }
        }
        Self { buckets }
    }

    /// Projects launching on `day`; empty when none do.
    pub fn get(&self, day: NaiveDate) -> &[&'a Project] {
        self.buckets.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    /// Number of distinct days with at least one launch.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn project_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
