use crate::models::Project;

/// Case-insensitive substring match on name or symbol. An empty query keeps
/// every project, in order.
pub fn filter<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|project| matches(project, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches(project: &Project, needle: &str) -> bool {
    project.name.to_lowercase().contains(needle) || project.logo.to_lowercase().contains(needle)
}
