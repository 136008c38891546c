pub mod project;

pub use project::{LaunchType, Project, ProjectStatus, VerificationStatus};
