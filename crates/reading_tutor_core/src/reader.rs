//! crates/reading_tutor_core/src/reader.rs
//!
//! The paginated reader: a pre-chunked document, a current page and a font-size
//! preference. Progress is a pure function of the current page, so it can never
//! drift from the position.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 24;
pub const DEFAULT_FONT_SIZE: u8 = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Document {0} has no pages")]
    EmptyDocument(u32),
}

/// A document split into rich-text pages, addressed 1..=total_pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderDocument {
    pub id: u32,
    pub title: String,
    pub author: String,
    pages: Vec<String>,
}

impl ReaderDocument {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        pages: Vec<String>,
    ) -> Result<Self, ReaderError> {
        if pages.is_empty() {
            return Err(ReaderError::EmptyDocument(id));
        }
        Ok(Self {
            id,
            title: title.into(),
            author: author.into(),
            pages,
        })
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Content of a 1-based page, if it exists.
    pub fn page(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(String::as_str)
    }
}

/// Groups HTML blocks into pages of at most `blocks_per_page` blocks.
pub fn paginate<S: AsRef<str>>(blocks: &[S], blocks_per_page: usize) -> Vec<String> {
    let per_page = blocks_per_page.max(1);
    blocks
        .chunks(per_page)
        .map(|chunk| {
            chunk
                .iter()
                .map(|block| block.as_ref())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

//=========================================================================================
// PaginatedReaderModel
//=========================================================================================

#[derive(Debug, Clone)]
pub struct PaginatedReaderModel {
    document: ReaderDocument,
    current_page: usize,
    font_size: u8,
}

impl PaginatedReaderModel {
    /// Opens the document on its first page. Reading position is not restored
    /// from earlier sessions.
    pub fn new(document: ReaderDocument) -> Self {
        Self {
            document,
            current_page: 1,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn document(&self) -> &ReaderDocument {
        &self.document
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.document.total_pages()
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    pub fn current_content(&self) -> &str {
        self.document.page(self.current_page).unwrap_or_default()
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last_page()
    }

    pub fn can_go_previous(&self) -> bool {
        !self.is_first_page()
    }

    /// Advances one page. Returns `false` and does nothing on the last page.
    pub fn next(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.current_page += 1;
        debug!(document_id = self.document.id, page = self.current_page, "Reader advanced");
        true
    }

    /// Goes back one page. Returns `false` and does nothing on the first page.
    pub fn previous(&mut self) -> bool {
        if self.is_first_page() {
            return false;
        }
        self.current_page -= 1;
        debug!(document_id = self.document.id, page = self.current_page, "Reader went back");
        true
    }

    /// Jumps to `page`, clamped into the document.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    /// Sets the font size, clamped to the supported range. Returns the applied size.
    pub fn set_font_size(&mut self, px: u8) -> u8 {
        self.font_size = px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.font_size
    }

    /// Completion percentage for the current page.
    pub fn progress(&self) -> f64 {
        self.current_page as f64 / self.total_pages() as f64 * 100.0
    }

    /// `progress()` rounded to one decimal place, for display only.
    pub fn progress_display(&self) -> f64 {
        (self.progress() * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(pages: usize) -> ReaderDocument {
        let pages = (1..=pages).map(|n| format!("<p>Page {n}</p>")).collect();
        ReaderDocument::new(7, "The Adventure Begins", "J.K. Rowling", pages).unwrap()
    }

    #[test]
    fn empty_document_is_rejected() {
        let result = ReaderDocument::new(3, "Blank", "Nobody", Vec::new());
        assert_eq!(result.unwrap_err(), ReaderError::EmptyDocument(3));
    }

    #[test]
    fn progress_is_derived_from_the_page() {
        let mut reader = PaginatedReaderModel::new(document(24));
        assert!((reader.progress() - 4.1666).abs() < 0.01);
        assert_eq!(reader.progress_display(), 4.2);

        reader.go_to(24);
        assert_eq!(reader.progress(), 100.0);
    }

    #[test]
    fn navigation_stops_at_the_bounds() {
        let mut reader = PaginatedReaderModel::new(document(3));
        assert!(reader.is_first_page());
        assert!(!reader.can_go_previous());
        assert!(!reader.previous());
        assert_eq!(reader.current_page(), 1);

        assert!(reader.next());
        assert!(reader.next());
        assert!(reader.is_last_page());
        assert!(!reader.can_go_next());
        assert!(!reader.next());
        assert_eq!(reader.current_page(), 3);
    }

    #[test]
    fn next_then_previous_restores_the_page() {
        let mut reader = PaginatedReaderModel::new(document(10));
        for start in 2..10 {
            reader.go_to(start);
            reader.next();
            reader.previous();
            assert_eq!(reader.current_page(), start);
        }
    }

    #[test]
    fn single_page_document_is_both_first_and_last() {
        let reader = PaginatedReaderModel::new(document(1));
        assert!(reader.is_first_page());
        assert!(reader.is_last_page());
        assert_eq!(reader.progress(), 100.0);
    }

    #[test]
    fn go_to_clamps_into_the_document() {
        let mut reader = PaginatedReaderModel::new(document(5));
        reader.go_to(0);
        assert_eq!(reader.current_page(), 1);
        reader.go_to(99);
        assert_eq!(reader.current_page(), 5);
        assert_eq!(reader.current_content(), "<p>Page 5</p>");
    }

    #[test]
    fn font_size_is_clamped() {
        let mut reader = PaginatedReaderModel::new(document(2));
        assert_eq!(reader.font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(reader.set_font_size(8), MIN_FONT_SIZE);
        assert_eq!(reader.set_font_size(40), MAX_FONT_SIZE);
        assert_eq!(reader.set_font_size(18), 18);
    }

    #[test]
    fn paginate_groups_blocks() {
        let blocks = ["<h1>One</h1>", "<p>a</p>", "<p>b</p>"];
        let pages = paginate(&blocks, 2);
        assert_eq!(pages, vec!["<h1>One</h1>\n<p>a</p>".to_string(), "<p>b</p>".to_string()]);
        assert_eq!(paginate(&blocks, 0).len(), 3);
    }
}
