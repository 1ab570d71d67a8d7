//! Client-side aggregation of the paginated question search.
//!
//! Pages are requested one at a time, starting at page 1, and concatenated
//! in backend order until the backend reports no further page. Unlike a
//! plain list, the result records why the loop stopped, so callers can tell
//! an empty search from a run truncated by a backend failure, the page cap
//! or cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thinklink_core::{AppError, AppResult};
use thinklink_domain::{ApiResponse, Question, QuestionFilter, QuestionQuery};
use tracing::{debug, info, warn};

use crate::QuestionGateway;

/// Largest page size the search endpoint serves.
pub const MAX_FETCH_PAGE_SIZE: u32 = 100;

/// Default upper bound on page requests per aggregation.
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Tuning for [`PageAggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    fetch_page_size: u32,
    max_pages: u32,
}

impl AggregatorSettings {
    /// Creates validated settings. Both values must be non-zero.
    pub fn new(fetch_page_size: u32, max_pages: u32) -> AppResult<Self> {
        if fetch_page_size == 0 {
            return Err(AppError::Validation(
                "fetch page size must be greater than zero".to_owned(),
            ));
        }

        if max_pages == 0 {
            return Err(AppError::Validation(
                "max pages must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            fetch_page_size,
            max_pages,
        })
    }

    /// Page size requested from the backend on every call.
    #[must_use]
    pub fn fetch_page_size(&self) -> u32 {
        self.fetch_page_size
    }

    /// Maximum number of page requests per aggregation.
    #[must_use]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            fetch_page_size: MAX_FETCH_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Cooperative cancellation shared between a running aggregation and its
/// owner. Checked before each page request; an in-flight request is never
/// interrupted.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Creates a flag that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why an aggregation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationStatus {
    /// Every page was fetched and at least one item was returned.
    Complete,
    /// Every page was fetched and the search matched nothing.
    Empty,
    /// The backend answered `success: false` for a page.
    Partial {
        /// 1-indexed page that failed.
        failed_page: u32,
        /// Message supplied by the backend.
        message: String,
    },
    /// The backend still reported more pages when the cap was reached.
    PageLimitReached {
        /// Number of pages fetched before stopping.
        pages_fetched: u32,
    },
    /// The owner cancelled the run between two page requests.
    Cancelled {
        /// Number of pages fetched before stopping.
        pages_fetched: u32,
    },
}

impl AggregationStatus {
    /// Returns a short stable label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Empty => "empty",
            Self::Partial { .. } => "partial",
            Self::PageLimitReached { .. } => "page_limit_reached",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// Items collected across pages and the reason the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation<T> {
    /// Items in page order, then backend order within a page.
    pub items: Vec<T>,
    /// Number of page requests issued, including a failed one.
    pub pages_requested: u32,
    /// Why the loop stopped.
    pub status: AggregationStatus,
}

impl<T> Aggregation<T> {
    /// Returns whether every page was fetched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(
            self.status,
            AggregationStatus::Complete | AggregationStatus::Empty
        )
    }

    /// Returns whether the loop stopped before the backend ran out of pages.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        !self.is_complete()
    }
}

/// Fetches every page of a question search into one ordered list.
#[derive(Clone)]
pub struct PageAggregator {
    gateway: Arc<dyn QuestionGateway>,
    settings: AggregatorSettings,
}

impl PageAggregator {
    /// Creates an aggregator over a question gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn QuestionGateway>, settings: AggregatorSettings) -> Self {
        Self { gateway, settings }
    }

    /// Returns the aggregator settings.
    #[must_use]
    pub fn settings(&self) -> AggregatorSettings {
        self.settings
    }

    /// Fetches all pages for the filter.
    ///
    /// Transport errors from the gateway propagate unchanged; items fetched
    /// before the error are discarded.
    pub async fn aggregate(&self, filter: &QuestionFilter) -> AppResult<Aggregation<Question>> {
        self.aggregate_with_cancel(filter, &CancellationFlag::new())
            .await
    }

    /// Fetches all pages for the filter, stopping early once `cancellation`
    /// is set.
    pub async fn aggregate_with_cancel(
        &self,
        filter: &QuestionFilter,
        cancellation: &CancellationFlag,
    ) -> AppResult<Aggregation<Question>> {
        let mut items = Vec::new();
        let mut page = 1_u32;
        let mut pages_requested = 0_u32;

        let status = loop {
            if cancellation.is_cancelled() {
                break AggregationStatus::Cancelled {
                    pages_fetched: pages_requested,
                };
            }

            if pages_requested >= self.settings.max_pages {
                warn!(
                    max_pages = self.settings.max_pages,
                    collected = items.len(),
                    "question search still reports more pages at the page cap"
                );
                break AggregationStatus::PageLimitReached {
                    pages_fetched: pages_requested,
                };
            }

            let query = QuestionQuery::page(filter.clone(), page, self.settings.fetch_page_size);
            debug!(page, limit = self.settings.fetch_page_size, "fetching question search page");

            let response = self.gateway.search_questions(&query).await?;
            pages_requested = pages_requested.saturating_add(1);

            match response {
                ApiResponse::Success(result) => {
                    let has_next = result.has_next();
                    items.extend(result.items);

                    if !has_next {
                        break if items.is_empty() {
                            AggregationStatus::Empty
                        } else {
                            AggregationStatus::Complete
                        };
                    }

                    page = page.saturating_add(1);
                }
                ApiResponse::Failure { message } => {
                    warn!(
                        failed_page = page,
                        collected = items.len(),
                        message = %message,
                        "question search page failed, returning partial results"
                    );
                    break AggregationStatus::Partial {
                        failed_page: page,
                        message,
                    };
                }
            }
        };

        info!(
            status = status.as_str(),
            pages_requested,
            items = items.len(),
            "question search aggregation finished"
        );

        Ok(Aggregation {
            items,
            pages_requested,
            status,
        })
    }
}
