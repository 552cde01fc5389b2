//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Problem, ProblemStatus, ProgressRecord, Topic, TopicProgress};
use crate::domain::repository::{CatalogRepository, ProgressRepository};
use crate::domain::value_objects::{Difficulty, ProblemId, TopicId};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TopicRow {
    topic_id: i32,
    name: String,
    level: String,
    position: i32,
}

impl TopicRow {
    fn into_topic(self) -> CatalogResult<Topic> {
        let level = Difficulty::parse(&self.level).ok_or_else(|| {
            CatalogError::Internal(format!("unknown topic level in database: {}", self.level))
        })?;

        Ok(Topic {
            id: TopicId::new(self.topic_id),
            name: self.name,
            level,
            position: self.position,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProblemRow {
    problem_id: i32,
    topic_id: i32,
    title: String,
    difficulty: String,
    leetcode_link: Option<String>,
    youtube_link: Option<String>,
    article_link: Option<String>,
    position: i32,
    // NULL when the user has no ledger row for this problem
    is_completed: Option<bool>,
}

impl ProblemRow {
    fn into_status(self) -> CatalogResult<(TopicId, ProblemStatus)> {
        let difficulty = Difficulty::parse(&self.difficulty).ok_or_else(|| {
            CatalogError::Internal(format!(
                "unknown problem difficulty in database: {}",
                self.difficulty
            ))
        })?;

        let topic_id = TopicId::new(self.topic_id);

        let status = ProblemStatus {
            problem: Problem {
                id: ProblemId::new(self.problem_id),
                topic_id,
                title: self.title,
                difficulty,
                leetcode_link: self.leetcode_link,
                youtube_link: self.youtube_link,
                article_link: self.article_link,
                position: self.position,
            },
            is_completed: self.is_completed.unwrap_or(false),
        };

        Ok((topic_id, status))
    }
}

#[derive(sqlx::FromRow)]
struct ProgressRow {
    user_id: Uuid,
    problem_id: i32,
    is_completed: bool,
    updated_at: DateTime<Utc>,
}

impl ProgressRow {
    fn into_record(self) -> ProgressRecord {
        ProgressRecord {
            user_id: UserId::from_uuid(self.user_id),
            problem_id: ProblemId::new(self.problem_id),
            is_completed: self.is_completed,
            updated_at: self.updated_at,
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

const SELECT_PROBLEMS_WITH_PROGRESS: &str = r#"
    SELECT
        p.problem_id,
        p.topic_id,
        p.title,
        p.difficulty,
        p.leetcode_link,
        p.youtube_link,
        p.article_link,
        p.position,
        pp.is_completed
    FROM problems p
    LEFT JOIN problem_progress pp
        ON pp.problem_id = p.problem_id
       AND pp.user_id = $1
"#;

impl PgCatalogRepository {
    /// Attach an ordered problem list to each topic
    fn assemble(
        topics: Vec<TopicRow>,
        problems: Vec<ProblemRow>,
    ) -> CatalogResult<Vec<TopicProgress>> {
        let mut views: Vec<TopicProgress> = topics
            .into_iter()
            .map(|row| {
                Ok(TopicProgress {
                    topic: row.into_topic()?,
                    problems: Vec::new(),
                })
            })
            .collect::<CatalogResult<_>>()?;

        for row in problems {
            let (topic_id, status) = row.into_status()?;
            // Problem rows carry a FK to topics, so the lookup only misses
            // if the two queries raced a reseed; drop such rows
            if let Some(view) = views.iter_mut().find(|v| v.topic.id == topic_id) {
                view.problems.push(status);
            }
        }

        Ok(views)
    }
}

// ============================================================================
// Catalog Repository Implementation
// ============================================================================

impl CatalogRepository for PgCatalogRepository {
    async fn list_topics(&self, user_id: &UserId) -> CatalogResult<Vec<TopicProgress>> {
        let topics = sqlx::query_as::<_, TopicRow>(
            "SELECT topic_id, name, level, position FROM topics ORDER BY position, topic_id",
        )
        .fetch_all(&self.pool)
        .await?;

        let problems = sqlx::query_as::<_, ProblemRow>(&format!(
            "{SELECT_PROBLEMS_WITH_PROGRESS} ORDER BY p.topic_id, p.position, p.problem_id"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Self::assemble(topics, problems)
    }

    async fn find_topic(
        &self,
        user_id: &UserId,
        topic_id: TopicId,
    ) -> CatalogResult<Option<TopicProgress>> {
        let topic = sqlx::query_as::<_, TopicRow>(
            "SELECT topic_id, name, level, position FROM topics WHERE topic_id = $1",
        )
        .bind(topic_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(topic) = topic else {
            return Ok(None);
        };

        let problems = sqlx::query_as::<_, ProblemRow>(&format!(
            "{SELECT_PROBLEMS_WITH_PROGRESS} WHERE p.topic_id = $2 ORDER BY p.position, p.problem_id"
        ))
        .bind(user_id.as_uuid())
        .bind(topic_id.value())
        .fetch_all(&self.pool)
        .await?;

        let views = Self::assemble(vec![topic], problems)?;

        Ok(views.into_iter().next())
    }

    async fn problem_exists(&self, problem_id: ProblemId) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM problems WHERE problem_id = $1)",
        )
        .bind(problem_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Progress Repository Implementation
// ============================================================================

impl ProgressRepository for PgCatalogRepository {
    async fn toggle(
        &self,
        user_id: &UserId,
        problem_id: ProblemId,
    ) -> CatalogResult<ProgressRecord> {
        // Single upsert so concurrent toggles serialize on the row lock
        // instead of losing updates
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
            INSERT INTO problem_progress (user_id, problem_id, is_completed, updated_at)
            VALUES ($1, $2, TRUE, now())
            ON CONFLICT (user_id, problem_id) DO UPDATE
                SET is_completed = NOT problem_progress.is_completed,
                    updated_at = now()
            RETURNING user_id, problem_id, is_completed, updated_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(problem_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // 23503: the problem (or user) vanished between the existence
            // check and the insert
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                CatalogError::ProblemNotFound
            }
            _ => CatalogError::Database(e),
        })?;

        Ok(row.into_record())
    }
}
