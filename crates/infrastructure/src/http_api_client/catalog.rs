use async_trait::async_trait;
use reqwest::Method;
use thinklink_application::{CategoryGateway, QuestionGateway};
use thinklink_core::AppResult;
use thinklink_domain::{
    ApiResponse, Category, CategoryQuery, CategoryUpdate, NewCategory, NewQuestion, Page,
    Question, QuestionQuery, QuestionStats, QuestionUpdate,
};

use super::HttpApiClient;
use super::envelope::ListPayload;
use super::query_params::{category_pairs, question_pairs, with_query};

#[async_trait]
impl QuestionGateway for HttpApiClient {
    async fn search_questions(
        &self,
        query: &QuestionQuery,
    ) -> AppResult<ApiResponse<Page<Question>>> {
        let url = with_query(self.endpoint(&["questions"])?, &question_pairs(query));
        Ok(self
            .call::<ListPayload<Question>>(Method::GET, url, "search questions")
            .await?
            .map(Page::from))
    }

    async fn question_stats(&self) -> AppResult<ApiResponse<QuestionStats>> {
        let url = self.endpoint(&["questions", "stats"])?;
        self.call(Method::GET, url, "question stats").await
    }

    async fn question_levels(&self) -> AppResult<ApiResponse<Vec<String>>> {
        let url = self.endpoint(&["questions", "levels"])?;
        self.call(Method::GET, url, "question levels").await
    }

    async fn question_categories(&self) -> AppResult<ApiResponse<Vec<String>>> {
        let url = self.endpoint(&["categories"])?;
        Ok(self
            .call::<ListPayload<Category>>(Method::GET, url, "question categories")
            .await?
            .map(|payload| {
                payload
                    .into_items()
                    .into_iter()
                    .map(|category| category.name)
                    .collect()
            }))
    }

    async fn create_question(&self, question: &NewQuestion) -> AppResult<ApiResponse<Question>> {
        let url = self.endpoint(&["questions"])?;
        self.call_with_body(Method::POST, url, question, "create question")
            .await
    }

    async fn update_question(
        &self,
        question_id: &str,
        update: &QuestionUpdate,
    ) -> AppResult<ApiResponse<Question>> {
        let url = self.endpoint(&["questions", question_id])?;
        self.call_with_body(Method::PUT, url, update, "update question")
            .await
    }

    async fn delete_question(&self, question_id: &str) -> AppResult<ApiResponse<()>> {
        let url = self.endpoint(&["questions", question_id])?;
        self.call_discarding(Method::DELETE, url, "delete question")
            .await
    }
}

#[async_trait]
impl CategoryGateway for HttpApiClient {
    async fn list_categories(
        &self,
        query: &CategoryQuery,
    ) -> AppResult<ApiResponse<Page<Category>>> {
        let url = with_query(self.endpoint(&["categories"])?, &category_pairs(query));
        Ok(self
            .call::<ListPayload<Category>>(Method::GET, url, "list categories")
            .await?
            .map(Page::from))
    }

    async fn active_categories(&self) -> AppResult<ApiResponse<Vec<Category>>> {
        let url = self.endpoint(&["categories", "active"])?;
        self.call(Method::GET, url, "active categories").await
    }

    async fn categories_with_counts(&self) -> AppResult<ApiResponse<Vec<Category>>> {
        let url = self.endpoint(&["categories", "with-counts"])?;
        self.call(Method::GET, url, "categories with counts").await
    }

    async fn create_category(&self, category: &NewCategory) -> AppResult<ApiResponse<Category>> {
        let url = self.endpoint(&["categories"])?;
        self.call_with_body(Method::POST, url, category, "create category")
            .await
    }

    async fn update_category(
        &self,
        category_id: &str,
        update: &CategoryUpdate,
    ) -> AppResult<ApiResponse<Category>> {
        let url = self.endpoint(&["categories", category_id])?;
        self.call_with_body(Method::PUT, url, update, "update category")
            .await
    }

    async fn delete_category(&self, category_id: &str) -> AppResult<ApiResponse<()>> {
        let url = self.endpoint(&["categories", category_id])?;
        self.call_discarding(Method::DELETE, url, "delete category")
            .await
    }

    async fn toggle_category_status(&self, category_id: &str) -> AppResult<ApiResponse<Category>> {
        let url = self.endpoint(&["categories", category_id, "toggle-status"])?;
        self.call(Method::PATCH, url, "toggle category status")
            .await
    }
}
