//! Launch archive core: the project store, the date index and the calendar,
//! timeline and ledger projections over it.

pub mod calendar;
pub mod draft;
pub mod filter;
pub mod index;
pub mod ledger;
pub mod pagination;
pub mod service;
pub mod source;
pub mod store;
pub mod timeline;
pub mod view;

pub use calendar::{CalendarGrid, DayCell, GridTarget};
pub use draft::{ProjectDraft, ValidationError};
pub use index::DateIndex;
pub use pagination::{paginate, Page};
pub use service::{ArchiveError, ArchiveService};
pub use source::{PgProjectSource, ProjectSource, SourceError};
pub use store::{ProjectStore, StoreError, UpsertOutcome};
pub use timeline::{Side, TimelineEntry};
pub use view::{project, ArchiveEvent, ArchiveView, ViewMode, ViewState};
