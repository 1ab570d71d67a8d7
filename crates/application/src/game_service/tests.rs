use std::sync::Arc;

use async_trait::async_trait;
use thinklink_core::{AppError, AppResult};
use thinklink_domain::{
    ApiResponse, NewQuestion, Page, PageMeta, Question, QuestionFilter, QuestionQuery,
    QuestionStats, QuestionUpdate,
};

use super::GameService;
use crate::{
    AggregationStatus, AggregatorSettings, CancellationFlag, PageAggregator, QuestionGateway,
};

struct FakeQuestionGateway {
    levels_available: bool,
    question_count: usize,
}

#[async_trait]
impl QuestionGateway for FakeQuestionGateway {
    async fn search_questions(
        &self,
        query: &QuestionQuery,
    ) -> AppResult<ApiResponse<Page<Question>>> {
        let page = query.page.unwrap_or(1);
        let items = (0..self.question_count)
            .map(|index| Question {
                id: format!("q-{index}"),
                title: format!("Question {index}"),
                answer: "Answer".to_owned(),
                category: "General".to_owned(),
                level: "Medium".to_owned(),
                created_at: None,
                updated_at: None,
            })
            .collect();

        Ok(ApiResponse::Success(Page::new(
            items,
            PageMeta::last(page, u64::try_from(self.question_count).unwrap_or(u64::MAX)),
        )))
    }

    async fn question_stats(&self) -> AppResult<ApiResponse<QuestionStats>> {
        Ok(ApiResponse::Success(QuestionStats::default()))
    }

    async fn question_levels(&self) -> AppResult<ApiResponse<Vec<String>>> {
        if self.levels_available {
            Ok(ApiResponse::Success(vec!["Easy".to_owned(), "Hard".to_owned()]))
        } else {
            Err(AppError::Transport("timed out".to_owned()))
        }
    }

    async fn question_categories(&self) -> AppResult<ApiResponse<Vec<String>>> {
        Ok(ApiResponse::Success(vec!["Science".to_owned()]))
    }

    async fn create_question(&self, _question: &NewQuestion) -> AppResult<ApiResponse<Question>> {
        Ok(ApiResponse::failure("unused"))
    }

    async fn update_question(
        &self,
        _question_id: &str,
        _update: &QuestionUpdate,
    ) -> AppResult<ApiResponse<Question>> {
        Ok(ApiResponse::failure("unused"))
    }

    async fn delete_question(&self, _question_id: &str) -> AppResult<ApiResponse<()>> {
        Ok(ApiResponse::failure("unused"))
    }
}

fn service(gateway: FakeQuestionGateway) -> GameService {
    let gateway = Arc::new(gateway);
    let aggregator = PageAggregator::new(gateway.clone(), AggregatorSettings::default());
    GameService::new(gateway, aggregator)
}

#[tokio::test]
async fn choices_lead_with_all_entries() {
    let service = service(FakeQuestionGateway {
        levels_available: true,
        question_count: 0,
    });

    let choices = service.load_choices().await;
    assert!(!choices.from_fallback);
    assert_eq!(choices.categories, vec!["All Categories", "Science"]);
    assert_eq!(choices.levels, vec!["All", "Easy", "Hard"]);
}

#[tokio::test]
async fn choices_fall_back_when_a_listing_fails() {
    let service = service(FakeQuestionGateway {
        levels_available: false,
        question_count: 0,
    });

    let choices = service.load_choices().await;
    assert!(choices.from_fallback);
    assert_eq!(choices.categories.len(), 5);
    assert_eq!(choices.levels, vec!["All", "Easy", "Medium", "Hard"]);
}

#[tokio::test]
async fn round_builds_deck_with_display_page_size() {
    let service = service(FakeQuestionGateway {
        levels_available: true,
        question_count: 12,
    });

    let round = service
        .start_round(&QuestionFilter::default(), 5, &CancellationFlag::new())
        .await;

    let Ok(round) = round else {
        panic!("round should start");
    };
    assert_eq!(round.status, AggregationStatus::Complete);
    assert_eq!(round.deck.len(), 12);
    assert_eq!(round.deck.total_pages(), 3);
}

#[tokio::test]
async fn zero_display_page_size_is_rejected() {
    let service = service(FakeQuestionGateway {
        levels_available: true,
        question_count: 3,
    });

    let round = service
        .start_round(&QuestionFilter::default(), 0, &CancellationFlag::new())
        .await;
    assert!(matches!(round, Err(AppError::Validation(_))));
}
