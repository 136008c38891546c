use crate::archive::pagination::{paginate, Page};
use crate::models::Project;

pub const LEDGER_PAGE_SIZE: usize = 8;

/// Page of the ledger table. Input order is kept as-is.
pub fn project_ledger<'a>(projects: &[&'a Project], page_size: usize, page: usize) -> Page<&'a Project> {
    paginate(projects.to_vec(), page_size, page)
}
