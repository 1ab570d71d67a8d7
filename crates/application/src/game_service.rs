//! Game setup: filter choices and the aggregated question deck.

use std::sync::Arc;

use thinklink_core::AppResult;
use thinklink_domain::{ALL_CATEGORIES, ALL_LEVELS, ApiResponse, QuestionDeck, QuestionFilter};
use tracing::warn;

use crate::{AggregationStatus, CancellationFlag, PageAggregator, QuestionGateway};

/// Categories offered when the backend cannot list them.
const FALLBACK_CATEGORIES: &[&str] = &["JavaScript", "Python", "React", "Database"];

/// Levels offered when the backend cannot list them.
const FALLBACK_LEVELS: &[&str] = &["Easy", "Medium", "Hard"];

/// Filter choices shown on the game screen, each led by its "all" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameChoices {
    /// Category names, starting with [`ALL_CATEGORIES`].
    pub categories: Vec<String>,
    /// Level names, starting with [`ALL_LEVELS`].
    pub levels: Vec<String>,
    /// Whether the built-in defaults were used.
    pub from_fallback: bool,
}

/// A started game: the deck and how the search aggregation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRound {
    /// Questions walked page by page.
    pub deck: QuestionDeck,
    /// Why the aggregation stopped.
    pub status: AggregationStatus,
}

/// Application service behind the game screen.
#[derive(Clone)]
pub struct GameService {
    questions: Arc<dyn QuestionGateway>,
    aggregator: PageAggregator,
}

impl GameService {
    /// Creates a game service.
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionGateway>, aggregator: PageAggregator) -> Self {
        Self {
            questions,
            aggregator,
        }
    }

    /// Loads category and level choices, falling back to built-in defaults
    /// when either listing fails.
    pub async fn load_choices(&self) -> GameChoices {
        let categories = self.questions.question_categories().await;
        let levels = self.questions.question_levels().await;

        match (categories, levels) {
            (Ok(ApiResponse::Success(categories)), Ok(ApiResponse::Success(levels))) => {
                GameChoices {
                    categories: with_leading(ALL_CATEGORIES, categories),
                    levels: with_leading(ALL_LEVELS, levels),
                    from_fallback: false,
                }
            }
            _ => {
                warn!("failed to load categories and levels, using defaults");
                GameChoices {
                    categories: with_leading(ALL_CATEGORIES, owned(FALLBACK_CATEGORIES)),
                    levels: with_leading(ALL_LEVELS, owned(FALLBACK_LEVELS)),
                    from_fallback: true,
                }
            }
        }
    }

    /// Aggregates every matching question and returns a deck positioned on
    /// its first display page.
    pub async fn start_round(
        &self,
        filter: &QuestionFilter,
        display_page_size: usize,
        cancellation: &CancellationFlag,
    ) -> AppResult<GameRound> {
        let aggregation = self
            .aggregator
            .aggregate_with_cancel(filter, cancellation)
            .await?;
        let deck = QuestionDeck::new(aggregation.items, display_page_size)?;

        Ok(GameRound {
            deck,
            status: aggregation.status,
        })
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn with_leading(first: &str, rest: Vec<String>) -> Vec<String> {
    std::iter::once(first.to_owned()).chain(rest).collect()
}

#[cfg(test)]
mod tests;
