//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{ProblemStatus, ProgressRecord, TopicProgress};

/// Problem as rendered inside a topic, with the caller's completion flag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResponse {
    pub id: i32,
    pub title: String,
    pub difficulty: String,
    pub is_completed: bool,
    pub leetcode_link: Option<String>,
    pub youtube_link: Option<String>,
    pub article_link: Option<String>,
}

impl From<ProblemStatus> for ProblemResponse {
    fn from(status: ProblemStatus) -> Self {
        Self {
            id: status.problem.id.value(),
            title: status.problem.title,
            difficulty: status.problem.difficulty.as_str().to_owned(),
            is_completed: status.is_completed,
            leetcode_link: status.problem.leetcode_link,
            youtube_link: status.problem.youtube_link,
            article_link: status.problem.article_link,
        }
    }
}

/// Topic with problems and derived progress counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResponse {
    pub id: i32,
    pub name: String,
    pub level: String,
    pub completed: usize,
    pub total: usize,
    pub problems: Vec<ProblemResponse>,
}

impl From<TopicProgress> for TopicResponse {
    fn from(view: TopicProgress) -> Self {
        let completed = view.completed_count();
        let total = view.total_count();

        Self {
            id: view.topic.id.value(),
            name: view.topic.name,
            level: view.topic.level.as_str().to_owned(),
            completed,
            total,
            problems: view.problems.into_iter().map(ProblemResponse::from).collect(),
        }
    }
}

/// Result of a progress toggle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub problem_id: i32,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<ProgressRecord> for ProgressResponse {
    fn from(record: ProgressRecord) -> Self {
        Self {
            problem_id: record.problem_id.value(),
            is_completed: record.is_completed,
            updated_at: record.updated_at,
        }
    }
}
