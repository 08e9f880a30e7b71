pub mod catalog;
pub mod domain;
pub mod list_query;
pub mod ports;
pub mod profile;
pub mod reader;
pub mod routes;

pub use domain::{
    Achievement, BookCategory, CatalogEntry, ChartPoint, DashboardOverview, Difficulty,
    NotificationSettings, ProfileRecord, ReadingLevel, ReadingSession, ReadingStatus,
    SessionSummary,
};
pub use list_query::{derive_view, ListQueryModel, Partitions, SortKey};
pub use ports::{KeyValueStore, PortError, PortResult};
pub use profile::{
    AvatarFile, AvatarUploadToken, LoadSource, NotificationToggle, ProfileError, ProfileField,
    ProfileFormModel, ValidationError, ValidationIssue,
};
pub use reader::{PaginatedReaderModel, ReaderDocument, ReaderError};
pub use routes::Route;
