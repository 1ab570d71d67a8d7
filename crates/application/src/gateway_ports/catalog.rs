use async_trait::async_trait;
use thinklink_core::AppResult;
use thinklink_domain::{
    ApiResponse, Category, CategoryQuery, CategoryUpdate, NewCategory, NewQuestion, Page,
    Question, QuestionQuery, QuestionStats, QuestionUpdate,
};

/// Remote question endpoints, including the paginated search.
#[async_trait]
pub trait QuestionGateway: Send + Sync {
    /// Fetches one page of search results.
    async fn search_questions(&self, query: &QuestionQuery)
    -> AppResult<ApiResponse<Page<Question>>>;

    /// Fetches aggregate statistics.
    async fn question_stats(&self) -> AppResult<ApiResponse<QuestionStats>>;

    /// Lists the difficulty levels known to the backend.
    async fn question_levels(&self) -> AppResult<ApiResponse<Vec<String>>>;

    /// Lists the names of all categories.
    async fn question_categories(&self) -> AppResult<ApiResponse<Vec<String>>>;

    /// Creates a question.
    async fn create_question(&self, question: &NewQuestion) -> AppResult<ApiResponse<Question>>;

    /// Applies a partial update to a question.
    async fn update_question(
        &self,
        question_id: &str,
        update: &QuestionUpdate,
    ) -> AppResult<ApiResponse<Question>>;

    /// Deletes a question.
    async fn delete_question(&self, question_id: &str) -> AppResult<ApiResponse<()>>;
}

/// Remote category endpoints.
#[async_trait]
pub trait CategoryGateway: Send + Sync {
    /// Fetches one page of categories.
    async fn list_categories(&self, query: &CategoryQuery)
    -> AppResult<ApiResponse<Page<Category>>>;

    /// Lists active categories.
    async fn active_categories(&self) -> AppResult<ApiResponse<Vec<Category>>>;

    /// Lists categories with their question counts.
    async fn categories_with_counts(&self) -> AppResult<ApiResponse<Vec<Category>>>;

    /// Creates a category.
    async fn create_category(&self, category: &NewCategory) -> AppResult<ApiResponse<Category>>;

    /// Applies a partial update to a category.
    async fn update_category(
        &self,
        category_id: &str,
        update: &CategoryUpdate,
    ) -> AppResult<ApiResponse<Category>>;

    /// Deletes a category.
    async fn delete_category(&self, category_id: &str) -> AppResult<ApiResponse<()>>;

    /// Flips the active flag of a category.
    async fn toggle_category_status(&self, category_id: &str) -> AppResult<ApiResponse<Category>>;
}
