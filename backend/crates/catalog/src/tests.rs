//! Unit tests for catalog crate

use chrono::Utc;
use kernel::id::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::application::{GetTopicUseCase, ListTopicsUseCase, ToggleProgressUseCase};
use crate::domain::entities::{Problem, ProblemStatus, ProgressRecord, Topic, TopicProgress};
use crate::domain::repository::{CatalogRepository, ProgressRepository};
use crate::domain::value_objects::{Difficulty, ProblemId, TopicId};
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone)]
struct MemoryCatalog {
    topics: Vec<Topic>,
    problems: Vec<Problem>,
    progress: Arc<Mutex<HashMap<(Uuid, i32), ProgressRecord>>>,
}

impl MemoryCatalog {
    fn seeded() -> Self {
        let topics = vec![
            Topic {
                id: TopicId::new(1),
                name: "Arrays".into(),
                level: Difficulty::Easy,
                position: 1,
            },
            Topic {
                id: TopicId::new(2),
                name: "Graphs".into(),
                level: Difficulty::Hard,
                position: 2,
            },
        ];

        let problems = vec![
            problem(1, 1, "Two Sum", Difficulty::Easy),
            problem(2, 1, "Best Time to Buy and Sell Stock", Difficulty::Easy),
            problem(3, 2, "Course Schedule", Difficulty::Medium),
        ];

        Self {
            topics,
            problems,
            progress: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn status_for(&self, user_id: &UserId, p: &Problem) -> ProblemStatus {
        let key = (*user_id.as_uuid(), p.id.value());
        let is_completed = self
            .progress
            .lock()
            .unwrap()
            .get(&key)
            .map(|r| r.is_completed)
            .unwrap_or(false);

        ProblemStatus {
            problem: p.clone(),
            is_completed,
        }
    }
}

fn problem(id: i32, topic_id: i32, title: &str, difficulty: Difficulty) -> Problem {
    Problem {
        id: ProblemId::new(id),
        topic_id: TopicId::new(topic_id),
        title: title.into(),
        difficulty,
        leetcode_link: None,
        youtube_link: None,
        article_link: None,
        position: id,
    }
}

impl CatalogRepository for MemoryCatalog {
    async fn list_topics(&self, user_id: &UserId) -> CatalogResult<Vec<TopicProgress>> {
        Ok(self
            .topics
            .iter()
            .map(|t| TopicProgress {
                topic: t.clone(),
                problems: self
                    .problems
                    .iter()
                    .filter(|p| p.topic_id == t.id)
                    .map(|p| self.status_for(user_id, p))
                    .collect(),
            })
            .collect())
    }

    async fn find_topic(
        &self,
        user_id: &UserId,
        topic_id: TopicId,
    ) -> CatalogResult<Option<TopicProgress>> {
        let all = self.list_topics(user_id).await?;
        Ok(all.into_iter().find(|v| v.topic.id == topic_id))
    }

    async fn problem_exists(&self, problem_id: ProblemId) -> CatalogResult<bool> {
        Ok(self.problems.iter().any(|p| p.id == problem_id))
    }
}

impl ProgressRepository for MemoryCatalog {
    async fn toggle(
        &self,
        user_id: &UserId,
        problem_id: ProblemId,
    ) -> CatalogResult<ProgressRecord> {
        let key = (*user_id.as_uuid(), problem_id.value());
        let mut progress = self.progress.lock().unwrap();

        let record = progress
            .entry(key)
            .and_modify(|r| {
                r.is_completed = !r.is_completed;
                r.updated_at = Utc::now();
            })
            .or_insert_with(|| ProgressRecord {
                user_id: *user_id,
                problem_id,
                is_completed: true,
                updated_at: Utc::now(),
            });

        Ok(record.clone())
    }
}

// ============================================================================
// Toggle semantics
// ============================================================================

#[tokio::test]
async fn test_first_toggle_marks_completed() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let use_case = ToggleProgressUseCase::new(repo);
    let record = use_case.execute(&user, ProblemId::new(1)).await.unwrap();

    assert!(record.is_completed);
    assert_eq!(record.problem_id, ProblemId::new(1));
}

#[tokio::test]
async fn test_second_toggle_reverts_to_incomplete() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let use_case = ToggleProgressUseCase::new(repo);
    use_case.execute(&user, ProblemId::new(1)).await.unwrap();
    let record = use_case.execute(&user, ProblemId::new(1)).await.unwrap();

    assert!(!record.is_completed);
}

#[tokio::test]
async fn test_toggle_unknown_problem_is_not_found() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let use_case = ToggleProgressUseCase::new(repo.clone());
    let err = use_case
        .execute(&user, ProblemId::new(999))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::ProblemNotFound));
    // The failed toggle must not have created a ledger row
    assert!(repo.progress.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggles_are_isolated_per_user() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let alice = UserId::new();
    let bob = UserId::new();

    let toggle = ToggleProgressUseCase::new(repo.clone());
    toggle.execute(&alice, ProblemId::new(1)).await.unwrap();

    let list = ListTopicsUseCase::new(repo);
    let alice_view = list.execute(&alice).await.unwrap();
    let bob_view = list.execute(&bob).await.unwrap();

    assert_eq!(alice_view[0].completed_count(), 1);
    assert_eq!(bob_view[0].completed_count(), 0);
}

// ============================================================================
// Topic views
// ============================================================================

#[tokio::test]
async fn test_list_topics_derives_counts() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let toggle = ToggleProgressUseCase::new(repo.clone());
    toggle.execute(&user, ProblemId::new(1)).await.unwrap();
    toggle.execute(&user, ProblemId::new(2)).await.unwrap();

    let list = ListTopicsUseCase::new(repo);
    let views = list.execute(&user).await.unwrap();

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].topic.name, "Arrays");
    assert_eq!(views[0].completed_count(), 2);
    assert_eq!(views[0].total_count(), 2);
    assert_eq!(views[1].completed_count(), 0);
    assert_eq!(views[1].total_count(), 1);
}

#[tokio::test]
async fn test_get_topic_returns_problems_with_flags() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let toggle = ToggleProgressUseCase::new(repo.clone());
    toggle.execute(&user, ProblemId::new(3)).await.unwrap();

    let get = GetTopicUseCase::new(repo);
    let view = get.execute(&user, TopicId::new(2)).await.unwrap();

    assert_eq!(view.topic.name, "Graphs");
    assert_eq!(view.problems.len(), 1);
    assert!(view.problems[0].is_completed);
}

#[tokio::test]
async fn test_get_unknown_topic_is_not_found() {
    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let get = GetTopicUseCase::new(repo);
    let err = get.execute(&user, TopicId::new(42)).await.unwrap_err();

    assert!(matches!(err, CatalogError::TopicNotFound));
}

// ============================================================================
// DTO mapping
// ============================================================================

#[tokio::test]
async fn test_topic_response_mapping() {
    use crate::presentation::dto::TopicResponse;

    let repo = Arc::new(MemoryCatalog::seeded());
    let user = UserId::new();

    let toggle = ToggleProgressUseCase::new(repo.clone());
    toggle.execute(&user, ProblemId::new(1)).await.unwrap();

    let list = ListTopicsUseCase::new(repo);
    let views = list.execute(&user).await.unwrap();
    let response = TopicResponse::from(views[0].clone());

    assert_eq!(response.id, 1);
    assert_eq!(response.level, "Easy");
    assert_eq!(response.completed, 1);
    assert_eq!(response.total, 2);
    assert!(response.problems[0].is_completed);
    assert!(!response.problems[1].is_completed);

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("isCompleted").is_none());
    assert_eq!(json["problems"][0]["isCompleted"], true);
    assert_eq!(json["completed"], 1);
}
