//! crates/reading_tutor_core/src/catalog.rs
//!
//! Static sample data backing the dashboard screens.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    Achievement, BookCategory, CatalogEntry, ChartPoint, DashboardOverview, Difficulty,
    ReadingSession, ReadingStatus,
};
use crate::reader::{paginate, ReaderDocument};

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> Option<NaiveDateTime> {
    day(y, m, d).and_then(|date| date.and_hms_opt(hour, min, 0))
}

fn with_details(
    mut entry: CatalogEntry,
    rating: f32,
    time_spent_minutes: u32,
    synopsis: &str,
) -> CatalogEntry {
    entry.rating = Some(rating);
    entry.time_spent_minutes = Some(time_spent_minutes);
    entry.synopsis = Some(synopsis.to_string());
    entry.cover_url = Some(format!("/books/{}.jpg", entry.id));
    entry
}

/// Books on the user's reading list.
pub fn reading_list() -> Vec<CatalogEntry> {
    vec![
        with_details(
            CatalogEntry::new(
                1,
                "The Great Gatsby",
                "F. Scott Fitzgerald",
                "Classic",
                Difficulty::Advanced,
                75,
                day(2024, 3, 28),
            ),
            4.5,
            320,
            "A portrait of the Jazz Age told through the mysterious Jay Gatsby.",
        ),
        with_details(
            CatalogEntry::new(
                2,
                "1984",
                "George Orwell",
                "Dystopian",
                Difficulty::Advanced,
                100,
                day(2024, 3, 25),
            ),
            4.8,
            540,
            "Winston Smith struggles against the all-seeing Party.",
        ),
        with_details(
            CatalogEntry::new(
                3,
                "To Kill a Mockingbird",
                "Harper Lee",
                "Classic",
                Difficulty::Intermediate,
                30,
                day(2024, 3, 27),
            ),
            4.7,
            150,
            "Scout Finch grows up in a town divided by a trial.",
        ),
        CatalogEntry::new(
            4,
            "The Hobbit",
            "J.R.R. Tolkien",
            "Fantasy",
            Difficulty::Intermediate,
            0,
            None,
        ),
    ]
}

/// Books in the personal library.
pub fn library() -> Vec<CatalogEntry> {
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        CatalogEntry::new(
            1,
            "The Adventure Begins",
            "J.K. Rowling",
            "Fantasy",
            Intermediate,
            12,
            day(2024, 3, 29),
        ),
        CatalogEntry::new(2, "Mystery at Midnight", "R.L. Stine", "Mystery", Beginner, 0, None),
        CatalogEntry::new(
            3,
            "Science Explorers",
            "Neil deGrasse Tyson",
            "Science",
            Intermediate,
            0,
            None,
        ),
        CatalogEntry::new(
            4,
            "The Hidden Key",
            "Dan Brown",
            "Thriller",
            Advanced,
            45,
            day(2024, 3, 26),
        ),
        CatalogEntry::new(
            5,
            "Ocean Adventures",
            "Jacques Cousteau",
            "Adventure",
            Beginner,
            72,
            day(2024, 3, 27),
        )
        .in_category(BookCategory::NonFiction),
        CatalogEntry::new(
            6,
            "The Last Chapter",
            "Agatha Christie",
            "Mystery",
            Intermediate,
            100,
            day(2023, 3, 15),
        ),
        CatalogEntry::new(
            7,
            "Stars Above",
            "Carl Sagan",
            "Science",
            Advanced,
            100,
            day(2023, 2, 28),
        ),
        CatalogEntry::new(
            8,
            "Historical Journeys",
            "Doris Kearns Goodwin",
            "History",
            Intermediate,
            0,
            None,
        ),
    ]
}

/// Keeps entries on one shelf, matched by category slug (`fiction`, `non-fiction`,
/// `science`, `history`) or by genre name, ignoring case. `"all"` keeps everything.
pub fn filter_by_category<'a>(
    entries: &'a [CatalogEntry],
    category: &str,
) -> Vec<&'a CatalogEntry> {
    entries
        .iter()
        .filter(|entry| {
            category.eq_ignore_ascii_case("all")
                || entry.category.slug().eq_ignore_ascii_case(category)
                || entry.genre.eq_ignore_ascii_case(category)
        })
        .collect()
}

const STORY: [&str; 24] = [
    "<h1>Chapter 1: The Beginning</h1>",
    "<p>It was a bright, sunny morning when Alex woke up. Today was going to be different, \
        they could feel it. The air seemed charged with possibility, and a gentle breeze \
        carried the scent of adventure through the open window.</p>",
    "<p>Alex had been waiting for this day for months. The letter had arrived exactly one week \
        ago, sealed with red wax and addressed in flowing script. It contained an invitation, \
        more than that, a summons to a place they had only dreamed about.</p>",
    "<p>\"The Academy welcomes those with curious minds and brave hearts,\" the letter had \
        said. \"Your journey begins now.\"</p>",
    "<p>As Alex packed the last of their belongings, they couldn't help but wonder what \
        challenges awaited. Would there be tests of knowledge? Feats of courage? Or perhaps \
        something entirely unexpected?</p>",
    "<p>The clock on the wall chimed nine times. It was time to go. With one last look at the \
        room that had been their sanctuary for so many years, Alex picked up their bag and \
        stepped out into the unknown.</p>",
    "<p>The path to the Academy was not a straight one. It wound through dense forests and \
        across babbling brooks. At times, it seemed to disappear altogether, only to reappear \
        when Alex least expected it.</p>",
    "<p>Along the way, they encountered others who had received similar letters. There was \
        Maya, whose quick wit and quicker reflexes had saved her from many scrapes. Then there \
        was Eliot, quiet and thoughtful, with an uncanny ability to solve puzzles that left \
        others baffled.</p>",
    "<p>Together, the three travelers shared stories and supplies, forming a bond that grew \
        stronger with each step of their journey.</p>",
    "<p>As the sun began to set on their third day of travel, they crested a hill and gasped \
        in unison. There, nestled in a valley and bathed in the golden light of dusk, stood \
        the Academy.</p>",
    "<p>Its towers reached toward the sky like fingers stretching to touch the clouds. Windows \
        glinted like jewels, and the massive wooden doors stood open in welcome.</p>",
    "<p>\"We made it,\" whispered Maya, her voice filled with awe.</p>",
    "<p>\"This is just the beginning,\" replied Eliot with a smile.</p>",
    "<p>Alex nodded, heart racing with anticipation. \"Let's go meet our destiny.\"</p>",
    "<p>And with that, the three friends descended the hill, ready to embark on the greatest \
        adventure of their lives.</p>",
    "<h1>Chapter 2: The Great Hall</h1>",
    "<p>Inside, the great hall was warmer than they expected. Lanterns floated overhead, and \
        long tables stretched from one end of the room to the other.</p>",
    "<p>A tall woman in a grey cloak greeted them at the door. \"Names, please,\" she said, \
        running a finger down a list that seemed far longer than the hall could hold.</p>",
    "<p>Maya answered first, then Eliot. When Alex gave their name, the woman paused and \
        looked up with an expression that was hard to read.</p>",
    "<p>\"You're expected,\" she said at last. \"The Headmaster asked to see you before \
        supper.\"</p>",
    "<p>Eliot raised an eyebrow. Maya grinned. Alex simply swallowed and followed the woman \
        toward a narrow staircase at the back of the hall.</p>",
    "<p>The steps spiraled upward for what felt like an hour. Portraits lined the walls, and \
        more than once Alex was sure a painted eye had followed them.</p>",
    "<p>At the top waited a single door carved with the same seal that had closed their \
        letter. Alex raised a hand, hesitated, and knocked.</p>",
    "<p>\"Come in,\" said a voice from within. \"I've been waiting a long time to meet you.\"</p>",
];

/// Opens a library book in the reader.
///
/// Every library book currently shares the same sample story, one block per page.
pub fn document(id: u32) -> Option<ReaderDocument> {
    let entry = library().into_iter().find(|entry| entry.id == id)?;
    ReaderDocument::new(entry.id, entry.title, entry.author, paginate(&STORY, 1)).ok()
}

/// The session history, most recent first.
pub fn recent_sessions() -> Vec<ReadingSession> {
    [
        (1, "The Adventure Begins", at(2024, 3, 29, 14, 30), 45, 32, 92),
        (2, "Mystery at Midnight", at(2024, 3, 28, 19, 15), 30, 24, 88),
        (3, "Science Explorers", at(2024, 3, 25, 16, 0), 75, 45, 95),
    ]
    .into_iter()
    .filter_map(|(id, title, started_at, duration, pages, comprehension)| {
        Some(ReadingSession {
            id,
            book_title: title.to_string(),
            started_at: started_at?,
            duration_minutes: duration,
            pages_read: pages,
            comprehension,
        })
    })
    .collect()
}

pub fn achievements() -> Vec<Achievement> {
    [
        (1, "Bookworm", "Read for 10 days in a row", day(2023, 3, 20), 100),
        (2, "Speed Reader", "Read at a pace of 300 words per minute", None, 80),
        (3, "Vocabulary Master", "Learn 200 new words", None, 65),
        (4, "Genre Explorer", "Read books from 5 different genres", day(2023, 2, 15), 100),
        (5, "Deep Thinker", "Answer 50 comprehension questions correctly", None, 72),
        (6, "Literary Journey", "Complete 10 books", None, 70),
    ]
    .into_iter()
    .map(|(id, title, description, unlocked_on, progress)| Achievement {
        id,
        title: title.to_string(),
        description: description.to_string(),
        unlocked_on,
        progress,
    })
    .collect()
}

fn points(values: &[(&str, u32)]) -> Vec<ChartPoint> {
    values
        .iter()
        .map(|(label, value)| ChartPoint {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}

/// The dashboard landing view. Shelves use the same status rule as the reading list.
pub fn overview() -> DashboardOverview {
    let books = library();
    let shelf = |status: ReadingStatus| -> Vec<CatalogEntry> {
        books
            .iter()
            .filter(|entry| entry.status() == status)
            .cloned()
            .collect()
    };

    DashboardOverview {
        pages_per_day: points(&[
            ("Mon", 20),
            ("Tue", 35),
            ("Wed", 15),
            ("Thu", 45),
            ("Fri", 30),
            ("Sat", 25),
            ("Sun", 40),
        ]),
        comprehension_per_week: points(&[
            ("Week 1", 75),
            ("Week 2", 82),
            ("Week 3", 78),
            ("Week 4", 85),
            ("Week 5", 88),
        ]),
        in_progress: shelf(ReadingStatus::InProgress),
        completed: shelf(ReadingStatus::Completed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionSummary;
    use crate::list_query::{ListQueryModel, SortKey};

    #[test]
    fn ids_are_unique() {
        for entries in [reading_list(), library()] {
            let mut ids: Vec<u32> = entries.iter().map(|e| e.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), entries.len());
        }
    }

    #[test]
    fn reading_list_sorts_by_last_read() {
        let model = ListQueryModel::new(reading_list());
        assert_eq!(model.sort_key(), SortKey::ByLastRead);
        let titles: Vec<&str> = model.derived_view().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["The Great Gatsby", "To Kill a Mockingbird", "1984", "The Hobbit"]
        );
    }

    #[test]
    fn sample_document_has_24_pages() {
        let doc = document(1).unwrap();
        assert_eq!(doc.total_pages(), 24);
        assert_eq!(doc.title, "The Adventure Begins");
        assert_eq!(doc.page(1), Some("<h1>Chapter 1: The Beginning</h1>"));
        assert!(document(99).is_none());
    }

    #[test]
    fn category_filter() {
        let books = library();
        let titles = |category: &str| -> Vec<&str> {
            filter_by_category(&books, category)
                .iter()
                .map(|e| e.title.as_str())
                .collect()
        };

        assert_eq!(titles("fiction").len(), 4);
        assert_eq!(titles("Non-Fiction"), vec!["Ocean Adventures"]);
        assert_eq!(titles("science"), vec!["Science Explorers", "Stars Above"]);
        assert_eq!(titles("history"), vec!["Historical Journeys"]);
        assert_eq!(titles("mystery").len(), 2);
        assert_eq!(titles("ALL").len(), books.len());
        assert!(titles("Poetry").is_empty());
    }

    #[test]
    fn overview_shelves_follow_status() {
        let overview = overview();
        assert_eq!(overview.pages_per_day.len(), 7);
        assert!(overview.in_progress.iter().all(|e| e.status() == ReadingStatus::InProgress));
        let completed: Vec<&str> = overview.completed.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(completed, vec!["The Last Chapter", "Stars Above"]);
    }

    #[test]
    fn session_summary_over_history() {
        let sessions = recent_sessions();
        assert_eq!(sessions.len(), 3);
        let summary = SessionSummary::from_sessions(&sessions);
        assert_eq!(summary.total_minutes, 150);
        assert_eq!(summary.total_pages, 101);
        let avg = summary.average_comprehension.unwrap();
        assert!((avg - 91.666).abs() < 0.01);
    }

    #[test]
    fn achievement_unlock_state() {
        let all = achievements();
        let (unlocked, locked): (Vec<_>, Vec<_>) = all.iter().partition(|a| a.is_unlocked());
        assert_eq!(unlocked.len(), 2);
        assert!(unlocked.iter().all(|a| a.progress == 100));
        assert!(locked.iter().all(|a| a.progress < 100));
    }
}
