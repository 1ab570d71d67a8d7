use thinklink_domain::{
    Category, CategoryQuery, CategoryUpdate, NewCategory, NewQuestion, Page, Question,
    QuestionQuery, QuestionStats, QuestionUpdate,
};

use super::*;

impl AdminService {
    /// Lists one page of questions for the management screen.
    pub async fn list_questions(
        &self,
        actor: Option<&User>,
        query: &QuestionQuery,
    ) -> AppResult<Page<Question>> {
        Self::require_capability(actor, Capability::CanViewAdminPanel)?;
        accepted(
            self.questions.search_questions(query).await?,
            "load questions",
        )
    }

    /// Returns question statistics for the admin dashboard.
    pub async fn question_stats(&self, actor: Option<&User>) -> AppResult<QuestionStats> {
        Self::require_capability(actor, Capability::CanViewAdminPanel)?;
        accepted(
            self.questions.question_stats().await?,
            "load question statistics",
        )
    }

    /// Creates a question.
    pub async fn create_question(
        &self,
        actor: Option<&User>,
        question: &NewQuestion,
    ) -> AppResult<Question> {
        Self::require_capability(actor, Capability::CanCreateQuestions)?;
        accepted(
            self.questions.create_question(question).await?,
            "create question",
        )
    }

    /// Updates a question.
    pub async fn update_question(
        &self,
        actor: Option<&User>,
        question_id: &str,
        update: &QuestionUpdate,
    ) -> AppResult<Question> {
        Self::require_capability(actor, Capability::CanEditQuestions)?;
        accepted(
            self.questions.update_question(question_id, update).await?,
            "update question",
        )
    }

    /// Deletes a question.
    pub async fn delete_question(&self, actor: Option<&User>, question_id: &str) -> AppResult<()> {
        Self::require_capability(actor, Capability::CanDeleteQuestions)?;
        accepted(
            self.questions.delete_question(question_id).await?,
            "delete question",
        )
    }

    /// Lists one page of categories for the management screen.
    pub async fn list_categories(
        &self,
        actor: Option<&User>,
        query: &CategoryQuery,
    ) -> AppResult<Page<Category>> {
        Self::require_capability(actor, Capability::CanViewAdminPanel)?;
        accepted(
            self.categories.list_categories(query).await?,
            "load categories",
        )
    }

    /// Lists categories with their question counts.
    pub async fn categories_with_counts(&self, actor: Option<&User>) -> AppResult<Vec<Category>> {
        Self::require_capability(actor, Capability::CanViewAdminPanel)?;
        accepted(
            self.categories.categories_with_counts().await?,
            "load category counts",
        )
    }

    /// Creates a category.
    pub async fn create_category(
        &self,
        actor: Option<&User>,
        category: &NewCategory,
    ) -> AppResult<Category> {
        Self::require_capability(actor, Capability::CanCreateCategories)?;
        accepted(
            self.categories.create_category(category).await?,
            "create category",
        )
    }

    /// Updates a category.
    pub async fn update_category(
        &self,
        actor: Option<&User>,
        category_id: &str,
        update: &CategoryUpdate,
    ) -> AppResult<Category> {
        Self::require_capability(actor, Capability::CanEditCategories)?;
        accepted(
            self.categories.update_category(category_id, update).await?,
            "update category",
        )
    }

    /// Flips a category between active and inactive.
    pub async fn toggle_category_status(
        &self,
        actor: Option<&User>,
        category_id: &str,
    ) -> AppResult<Category> {
        Self::require_capability(actor, Capability::CanEditCategories)?;
        accepted(
            self.categories.toggle_category_status(category_id).await?,
            "toggle category status",
        )
    }

    /// Deletes a category.
    pub async fn delete_category(&self, actor: Option<&User>, category_id: &str) -> AppResult<()> {
        Self::require_capability(actor, Capability::CanDeleteCategories)?;
        accepted(
            self.categories.delete_category(category_id).await?,
            "delete category",
        )
    }
}
