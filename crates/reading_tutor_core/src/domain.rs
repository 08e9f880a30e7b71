//! crates/reading_tutor_core/src/domain.rs
//!
//! Defines the core data structures shared by the dashboard view-models.
//! Catalog data is read-only for the lifetime of a view; only the profile
//! record is ever mutated and persisted.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Catalog
//=========================================================================================

/// The small fixed set of difficulty labels a book can carry, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// The library's category filter groups genres into four shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookCategory {
    #[default]
    Fiction,
    NonFiction,
    Science,
    History,
}

impl BookCategory {
    /// The shelf a genre lands on when a book does not name one.
    pub fn from_genre(genre: &str) -> Self {
        match genre.to_ascii_lowercase().as_str() {
            "science" => BookCategory::Science,
            "history" => BookCategory::History,
            "biography" | "memoir" | "nature" | "non-fiction" => BookCategory::NonFiction,
            _ => BookCategory::Fiction,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            BookCategory::Fiction => "fiction",
            BookCategory::NonFiction => "non-fiction",
            BookCategory::Science => "science",
            BookCategory::History => "history",
        }
    }
}

/// Reading status, always derived from a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ReadingStatus {
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0 => ReadingStatus::NotStarted,
            p if p >= 100 => ReadingStatus::Completed,
            _ => ReadingStatus::InProgress,
        }
    }
}

/// A single book in the reading list or library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub category: BookCategory,
    pub difficulty: Difficulty,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    pub last_read: Option<NaiveDate>,
    pub rating: Option<f32>,
    pub time_spent_minutes: Option<u32>,
    pub synopsis: Option<String>,
    pub cover_url: Option<String>,
}

impl CatalogEntry {
    /// Builds an entry with no optional display metadata.
    pub fn new(
        id: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        difficulty: Difficulty,
        progress: u8,
        last_read: Option<NaiveDate>,
    ) -> Self {
        let genre = genre.into();
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: BookCategory::from_genre(&genre),
            genre,
            difficulty,
            progress: progress.min(100),
            last_read,
            rating: None,
            time_spent_minutes: None,
            synopsis: None,
            cover_url: None,
        }
    }

    /// Files the entry on a shelf other than the one its genre implies.
    pub fn in_category(mut self, category: BookCategory) -> Self {
        self.category = category;
        self
    }

    pub fn status(&self) -> ReadingStatus {
        ReadingStatus::from_progress(self.progress)
    }
}

//=========================================================================================
// Profile
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Named notification toggles on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email: bool,
    pub app: bool,
    pub achievements: bool,
    #[serde(default)]
    pub daily_reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            app: true,
            achievements: true,
            daily_reminders: false,
        }
    }
}

/// The user's editable profile, persisted as a single key-value record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub reading_level: ReadingLevel,
    pub daily_goal_minutes: u32,
    pub dark_mode: bool,
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Either a plain URL or an inline `data:` URL from an upload.
    pub avatar: Option<String>,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            bio: "I love reading science fiction and fantasy novels. \
                  Always looking to improve my reading skills!"
                .to_string(),
            reading_level: ReadingLevel::Intermediate,
            daily_goal_minutes: 30,
            dark_mode: false,
            notifications: NotificationSettings::default(),
            interests: vec![
                "science-fiction".to_string(),
                "fantasy".to_string(),
                "mystery".to_string(),
            ],
            avatar: None,
        }
    }
}

//=========================================================================================
// Session history
//=========================================================================================

/// One finished reading session shown on the history page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSession {
    pub id: u32,
    pub book_title: String,
    pub started_at: NaiveDateTime,
    pub duration_minutes: u32,
    pub pages_read: u32,
    /// Comprehension score, 0 to 100.
    pub comprehension: u8,
}

/// Aggregates over a set of reading sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_count: usize,
    pub total_minutes: u32,
    pub total_pages: u32,
    pub average_comprehension: Option<f64>,
}

impl SessionSummary {
    pub fn from_sessions(sessions: &[ReadingSession]) -> Self {
        let total_minutes = sessions.iter().map(|s| s.duration_minutes).sum();
        let total_pages = sessions.iter().map(|s| s.pages_read).sum();
        let average_comprehension = if sessions.is_empty() {
            None
        } else {
            let sum: u32 = sessions.iter().map(|s| u32::from(s.comprehension)).sum();
            Some(f64::from(sum) / sessions.len() as f64)
        };

        Self {
            session_count: sessions.len(),
            total_minutes,
            total_pages,
            average_comprehension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub unlocked_on: Option<NaiveDate>,
    /// Percent of the way to unlocking; 100 once unlocked.
    pub progress: u8,
}

impl Achievement {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_on.is_some()
    }
}

//=========================================================================================
// Dashboard overview
//=========================================================================================

/// A labelled data point for the overview charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub pages_per_day: Vec<ChartPoint>,
    pub comprehension_per_week: Vec<ChartPoint>,
    pub in_progress: Vec<CatalogEntry>,
    pub completed: Vec<CatalogEntry>,
}
