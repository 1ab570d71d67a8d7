use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thinklink_core::{AppError, AppResult, NonEmptyString};

/// Trivia question with its revealed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Question text shown to players.
    pub title: String,
    /// Answer revealed on demand.
    pub answer: String,
    /// Category name.
    pub category: String,
    /// Difficulty level such as `Easy`.
    pub level: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Count of questions grouped by one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBucket {
    /// Grouping key, for example a category name.
    #[serde(rename = "_id")]
    pub key: String,
    /// Number of questions in the group.
    pub count: u64,
}

/// Aggregate question statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    /// Total number of questions.
    pub total_questions: u64,
    /// Questions per category.
    #[serde(default)]
    pub category_stats: Vec<StatBucket>,
    /// Questions per level.
    #[serde(default)]
    pub level_stats: Vec<StatBucket>,
}

/// Payload for creating a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    title: NonEmptyString,
    answer: NonEmptyString,
    category: NonEmptyString,
    level: NonEmptyString,
}

impl NewQuestion {
    /// Creates a validated question payload. Every field is required.
    pub fn new(
        title: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
        level: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            title: required("question title", title)?,
            answer: required("answer", answer)?,
            category: required("category", category)?,
            level: required("difficulty level", level)?,
        })
    }

    /// Returns the question title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the category name.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }
}

/// Partial question update. Only provided fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<NonEmptyString>,
}

impl QuestionUpdate {
    /// Creates a validated partial update; provided values must not be blank.
    pub fn new(
        title: Option<String>,
        answer: Option<String>,
        category: Option<String>,
        level: Option<String>,
    ) -> AppResult<Self> {
        let update = Self {
            title: title.map(|value| required("question title", value)).transpose()?,
            answer: answer.map(|value| required("answer", value)).transpose()?,
            category: category.map(|value| required("category", value)).transpose()?,
            level: level
                .map(|value| required("difficulty level", value))
                .transpose()?,
        };

        if update == Self::default() {
            return Err(AppError::Validation(
                "question update must change at least one field".to_owned(),
            ));
        }

        Ok(update)
    }
}

fn required(field: &str, value: impl Into<String>) -> AppResult<NonEmptyString> {
    NonEmptyString::new(value)
        .map_err(|_| AppError::Validation(format!("{field} must not be empty")))
}

#[cfg(test)]
mod tests {
    use super::{NewQuestion, Question, QuestionStats, QuestionUpdate};

    #[test]
    fn new_question_requires_every_field() {
        assert!(NewQuestion::new("What is 2+2?", "4", "Math", "Easy").is_ok());
        assert!(NewQuestion::new("  ", "4", "Math", "Easy").is_err());
        assert!(NewQuestion::new("What is 2+2?", "", "Math", "Easy").is_err());
        assert!(NewQuestion::new("What is 2+2?", "4", "Math", " ").is_err());
    }

    #[test]
    fn blank_title_error_names_the_field() {
        let error = NewQuestion::new("", "4", "Math", "Easy").err();
        assert_eq!(
            error.map(|error| error.to_string()).unwrap_or_default(),
            "validation error: question title must not be empty"
        );
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(QuestionUpdate::new(None, None, None, None).is_err());
    }

    #[test]
    fn update_serializes_only_provided_fields() {
        let update = QuestionUpdate::new(None, Some("42".to_owned()), None, None);
        let value = update
            .ok()
            .and_then(|update| serde_json::to_value(&update).ok())
            .unwrap_or_default();

        assert_eq!(value, serde_json::json!({ "answer": "42" }));
    }

    #[test]
    fn question_decodes_backend_shape() {
        let payload = r#"{
            "_id": "q-1",
            "title": "Largest planet?",
            "answer": "Jupiter",
            "category": "Science",
            "level": "Easy",
            "createdAt": "2025-01-14T10:00:00.000Z",
            "updatedAt": "2025-01-14T10:00:00.000Z"
        }"#;
        let question: Result<Question, _> = serde_json::from_str(payload);
        assert!(question.is_ok());
        assert_eq!(
            question.map(|question| question.answer).unwrap_or_default(),
            "Jupiter"
        );
    }

    #[test]
    fn stats_decode_buckets() {
        let payload = r#"{
            "totalQuestions": 3,
            "categoryStats": [{"_id": "Science", "count": 2}, {"_id": "Math", "count": 1}],
            "levelStats": [{"_id": "Easy", "count": 3}]
        }"#;
        let stats: Result<QuestionStats, _> = serde_json::from_str(payload);
        assert!(stats.is_ok());

        let stats = stats.unwrap_or_default();
        assert_eq!(stats.total_questions, 3);
        assert_eq!(stats.category_stats.len(), 2);
        assert_eq!(stats.level_stats[0].key, "Easy");
    }
}
