//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entities::{ProgressRecord, TopicProgress};
use crate::domain::value_objects::{ProblemId, TopicId};
use crate::error::CatalogResult;

/// Catalog read repository trait
///
/// Every read is scoped to a user so the completion flags come back
/// joined in; catalog content itself is identical for all users.
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    /// List all topics with their problems, in curriculum order
    async fn list_topics(&self, user_id: &UserId) -> CatalogResult<Vec<TopicProgress>>;

    /// Find a single topic with its problems
    async fn find_topic(
        &self,
        user_id: &UserId,
        topic_id: TopicId,
    ) -> CatalogResult<Option<TopicProgress>>;

    /// Check whether a problem exists in the curriculum
    async fn problem_exists(&self, problem_id: ProblemId) -> CatalogResult<bool>;
}

/// Progress ledger repository trait
#[trait_variant::make(ProgressRepository: Send)]
pub trait LocalProgressRepository {
    /// Flip the completion flag for (user, problem) atomically
    ///
    /// A missing ledger row counts as not-completed, so the first toggle
    /// creates it as completed. Returns the resulting record.
    async fn toggle(&self, user_id: &UserId, problem_id: ProblemId)
    -> CatalogResult<ProgressRecord>;
}
