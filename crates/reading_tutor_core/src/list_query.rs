//! crates/reading_tutor_core/src/list_query.rs
//!
//! The reading-list view-model: a fixed set of catalog entries, a free-text
//! query and a sort key. Every view is recomputed from those three inputs; the
//! entries themselves are never reordered or mutated.

use std::cell::OnceCell;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogEntry, ReadingStatus};

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recently read first; entries never read go last.
    #[default]
    ByLastRead,
    /// Highest completion percentage first.
    ByProgress,
    /// Alphabetical by title, ignoring case.
    ByTitle,
    /// Alphabetical by author, ignoring case.
    ByAuthor,
    /// Easiest reading level first.
    ByLevel,
}

/// Returns `true` if `query` is a case-insensitive substring of the entry's
/// title or author. An empty query matches everything.
pub fn matches_query(entry: &CatalogEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    entry.title.to_lowercase().contains(&needle) || entry.author.to_lowercase().contains(&needle)
}

fn compare(a: &CatalogEntry, b: &CatalogEntry, sort: SortKey) -> Ordering {
    match sort {
        SortKey::ByLastRead => match (a.last_read, b.last_read) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::ByProgress => b.progress.cmp(&a.progress),
        SortKey::ByTitle => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::ByAuthor => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        SortKey::ByLevel => a.difficulty.cmp(&b.difficulty),
    }
}

/// Filters then sorts `entries`. The sort is stable, so ties keep the
/// original relative order.
pub fn derive_view<'a>(
    entries: &'a [CatalogEntry],
    query: &str,
    sort: SortKey,
) -> Vec<&'a CatalogEntry> {
    let mut view: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| matches_query(entry, query))
        .collect();
    view.sort_by(|a, b| compare(a, b, sort));
    view
}

//=========================================================================================
// ListQueryModel
//=========================================================================================

#[derive(Debug, Clone)]
pub struct ListQueryModel {
    entries: Vec<CatalogEntry>,
    query: String,
    sort: SortKey,
}

impl ListQueryModel {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            query: String::new(),
            sort: SortKey::default(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort = key;
    }

    pub fn derived_view(&self) -> Vec<&CatalogEntry> {
        derive_view(&self.entries, &self.query, self.sort)
    }

    /// Runs one filter+sort pass and hands out the tab partitions over it.
    pub fn partitions(&self) -> Partitions<'_> {
        Partitions::new(self.derived_view())
    }
}

//=========================================================================================
// Partitions
//=========================================================================================

/// The "all", "in progress" and "completed" tabs of the reading list.
///
/// Status partitions are computed on first access and are always
/// sub-sequences of `all`.
#[derive(Debug)]
pub struct Partitions<'a> {
    all: Vec<&'a CatalogEntry>,
    in_progress: OnceCell<Vec<&'a CatalogEntry>>,
    completed: OnceCell<Vec<&'a CatalogEntry>>,
}

impl<'a> Partitions<'a> {
    fn new(all: Vec<&'a CatalogEntry>) -> Self {
        Self {
            all,
            in_progress: OnceCell::new(),
            completed: OnceCell::new(),
        }
    }

    pub fn all(&self) -> &[&'a CatalogEntry] {
        &self.all
    }

    pub fn in_progress(&self) -> &[&'a CatalogEntry] {
        self.in_progress
            .get_or_init(|| self.with_status(ReadingStatus::InProgress))
    }

    pub fn completed(&self) -> &[&'a CatalogEntry] {
        self.completed
            .get_or_init(|| self.with_status(ReadingStatus::Completed))
    }

    fn with_status(&self, status: ReadingStatus) -> Vec<&'a CatalogEntry> {
        self.all
            .iter()
            .copied()
            .filter(|entry| entry.status() == status)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;
    use chrono::NaiveDate;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    fn entry(
        id: u32,
        title: &str,
        author: &str,
        progress: u8,
        last_read: Option<NaiveDate>,
    ) -> CatalogEntry {
        CatalogEntry::new(id, title, author, "Fiction", Difficulty::Advanced, progress, last_read)
    }

    fn titles(view: &[&CatalogEntry]) -> Vec<String> {
        view.iter().map(|e| e.title.clone()).collect()
    }

    fn sample() -> Vec<CatalogEntry> {
        vec![
            entry(1, "1984", "George Orwell", 100, date("2024-03-25")),
            entry(2, "Gatsby", "F. Scott Fitzgerald", 75, date("2024-03-28")),
            entry(3, "Hobbit", "J.R.R. Tolkien", 0, None),
        ]
    }

    #[test]
    fn last_read_puts_recent_first_and_undated_last() {
        let mut model = ListQueryModel::new(sample());
        model.set_sort_key(SortKey::ByLastRead);
        assert_eq!(titles(&model.derived_view()), vec!["Gatsby", "1984", "Hobbit"]);
    }

    #[test]
    fn undated_entries_keep_original_order() {
        let entries = vec![
            entry(1, "A", "x", 10, None),
            entry(2, "B", "x", 20, date("2024-01-01")),
            entry(3, "C", "x", 30, None),
        ];
        let view = derive_view(&entries, "", SortKey::ByLastRead);
        assert_eq!(titles(&view), vec!["B", "A", "C"]);
    }

    #[test]
    fn progress_sort_is_non_increasing_and_stable() {
        let entries = vec![
            entry(1, "A", "x", 50, None),
            entry(2, "B", "x", 90, None),
            entry(3, "C", "x", 50, None),
            entry(4, "D", "x", 0, None),
        ];
        let view = derive_view(&entries, "", SortKey::ByProgress);
        assert_eq!(titles(&view), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let entries = vec![
            entry(1, "zebra", "x", 0, None),
            entry(2, "Apple", "x", 0, None),
            entry(3, "mango", "x", 0, None),
        ];
        let view = derive_view(&entries, "", SortKey::ByTitle);
        assert_eq!(titles(&view), vec!["Apple", "mango", "zebra"]);
    }

    #[test]
    fn author_and_level_sorts() {
        let entries = vec![
            CatalogEntry::new(1, "A", "sagan", "Science", Difficulty::Advanced, 0, None),
            CatalogEntry::new(2, "B", "Christie", "Mystery", Difficulty::Intermediate, 0, None),
            CatalogEntry::new(3, "C", "Stine", "Mystery", Difficulty::Beginner, 0, None),
            CatalogEntry::new(4, "D", "brown", "Thriller", Difficulty::Intermediate, 0, None),
        ];
        let view = derive_view(&entries, "", SortKey::ByAuthor);
        assert_eq!(titles(&view), vec!["D", "B", "A", "C"]);

        let view = derive_view(&entries, "", SortKey::ByLevel);
        assert_eq!(titles(&view), vec!["C", "B", "D", "A"]);
    }

    #[test]
    fn query_matches_title_or_author_ignoring_case() {
        let mut model = ListQueryModel::new(sample());
        model.set_query("ORWELL");
        assert_eq!(titles(&model.derived_view()), vec!["1984"]);

        model.set_query("hob");
        assert_eq!(titles(&model.derived_view()), vec!["Hobbit"]);

        model.set_query("nothing like this");
        assert!(model.derived_view().is_empty());
    }

    #[test]
    fn query_and_sort_leave_entries_untouched() {
        let original = sample();
        let mut model = ListQueryModel::new(original.clone());
        model.set_query("g");
        model.set_sort_key(SortKey::ByProgress);
        let _ = model.derived_view();
        assert_eq!(model.entries(), original.as_slice());
    }

    #[test]
    fn partitions_follow_the_all_ordering() {
        let entries = vec![
            entry(1, "A", "x", 40, date("2024-03-01")),
            entry(2, "B", "x", 100, date("2024-03-05")),
            entry(3, "C", "x", 60, date("2024-03-10")),
            entry(4, "D", "x", 100, date("2024-02-01")),
            entry(5, "E", "x", 0, None),
        ];
        let model = ListQueryModel::new(entries);
        let parts = model.partitions();

        assert_eq!(titles(parts.all()), vec!["C", "B", "A", "D", "E"]);
        assert_eq!(titles(parts.in_progress()), vec!["C", "A"]);
        assert_eq!(titles(parts.completed()), vec!["B", "D"]);
    }

    #[test]
    fn partitions_respect_the_query() {
        let mut model = ListQueryModel::new(sample());
        model.set_query("gatsby");
        let parts = model.partitions();
        assert_eq!(parts.all().len(), 1);
        assert_eq!(parts.in_progress().len(), 1);
        assert!(parts.completed().is_empty());
    }
}
