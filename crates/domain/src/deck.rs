use thinklink_core::{AppError, AppResult};

use crate::question::Question;

/// Display page sizes offered by the game screen.
pub const DISPLAY_PAGE_SIZES: &[usize] = &[1, 5, 10, 20];

/// Display page size used when none is chosen.
pub const DEFAULT_DISPLAY_PAGE_SIZE: usize = 1;

/// Aggregated search results walked page by page during a game.
///
/// The display page size is independent of the size used to fetch pages
/// from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDeck {
    questions: Vec<Question>,
    display_page_size: usize,
    current_page: usize,
}

impl QuestionDeck {
    /// Creates a deck positioned on its first page.
    pub fn new(questions: Vec<Question>, display_page_size: usize) -> AppResult<Self> {
        if display_page_size == 0 {
            return Err(AppError::Validation(
                "display page size must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            questions,
            display_page_size,
            current_page: 1,
        })
    }

    /// Returns whether the deck holds no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns the number of questions in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns the display page size.
    #[must_use]
    pub fn display_page_size(&self) -> usize {
        self.display_page_size
    }

    /// Returns the number of display pages, never less than one.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.questions.len().div_ceil(self.display_page_size).max(1)
    }

    /// Returns the 1-indexed current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the questions on the current page.
    #[must_use]
    pub fn current_page_questions(&self) -> &[Question] {
        let start = (self.current_page - 1) * self.display_page_size;
        let end = (start + self.display_page_size).min(self.questions.len());
        self.questions.get(start..end).unwrap_or_default()
    }

    /// Returns the 1-based position in the whole deck of a question on the
    /// current page.
    #[must_use]
    pub fn question_number(&self, index_in_page: usize) -> usize {
        (self.current_page - 1) * self.display_page_size + index_in_page + 1
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current_page >= self.total_pages() {
            return false;
        }

        self.current_page += 1;
        true
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }

        self.current_page -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::QuestionDeck;
    use crate::question::Question;

    fn questions(count: usize) -> Vec<Question> {
        (1..=count)
            .map(|index| Question {
                id: format!("q-{index}"),
                title: format!("Question {index}"),
                answer: format!("Answer {index}"),
                category: "General".to_owned(),
                level: "Easy".to_owned(),
                created_at: None,
                updated_at: None,
            })
            .collect()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(QuestionDeck::new(questions(3), 0).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let deck = QuestionDeck::new(questions(11), 5);
        assert_eq!(deck.map(|deck| deck.total_pages()).ok(), Some(3));
    }

    #[test]
    fn empty_deck_has_one_page() {
        let deck = QuestionDeck::new(Vec::new(), 5);
        assert!(deck.is_ok());
        let deck = deck.ok();
        assert_eq!(deck.as_ref().map(QuestionDeck::total_pages), Some(1));
        assert_eq!(
            deck.as_ref().map(|deck| deck.current_page_questions().len()),
            Some(0)
        );
    }

    #[test]
    fn paging_walks_and_stops_at_bounds() {
        let Ok(mut deck) = QuestionDeck::new(questions(7), 5) else {
            panic!("deck construction failed");
        };

        assert!(!deck.previous_page());
        assert_eq!(deck.current_page_questions().len(), 5);

        assert!(deck.next_page());
        assert_eq!(deck.current_page(), 2);
        assert_eq!(deck.current_page_questions().len(), 2);
        assert_eq!(deck.current_page_questions()[0].id, "q-6");
        assert_eq!(deck.question_number(1), 7);

        assert!(!deck.next_page());
        assert!(deck.previous_page());
        assert_eq!(deck.current_page(), 1);
    }
}
