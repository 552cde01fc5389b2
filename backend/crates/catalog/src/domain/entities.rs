//! Domain Entities
//!
//! Core business entities for the catalog domain.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_objects::{Difficulty, ProblemId, TopicId};

/// Topic entity - a curriculum unit grouping related problems
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub level: Difficulty,
    pub position: i32,
}

/// Problem entity - a single practice problem in the curriculum
#[derive(Debug, Clone)]
pub struct Problem {
    pub id: ProblemId,
    pub topic_id: TopicId,
    pub title: String,
    pub difficulty: Difficulty,
    pub leetcode_link: Option<String>,
    pub youtube_link: Option<String>,
    pub article_link: Option<String>,
    pub position: i32,
}

/// ProgressRecord entity - one user's completion state for one problem
#[derive(Debug, Clone)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub is_completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// A problem together with the requesting user's completion flag
#[derive(Debug, Clone)]
pub struct ProblemStatus {
    pub problem: Problem,
    pub is_completed: bool,
}

/// A topic with its problems, viewed through one user's progress ledger
///
/// Counts are derived from the problem list on demand; they are never
/// persisted, so they cannot drift from the ledger.
#[derive(Debug, Clone)]
pub struct TopicProgress {
    pub topic: Topic,
    pub problems: Vec<ProblemStatus>,
}

impl TopicProgress {
    /// Number of problems the user has completed in this topic
    pub fn completed_count(&self) -> usize {
        self.problems.iter().filter(|p| p.is_completed).count()
    }

    /// Total number of problems in this topic
    pub fn total_count(&self) -> usize {
        self.problems.len()
    }
}
