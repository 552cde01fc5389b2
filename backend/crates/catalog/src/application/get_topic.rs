//! Get Topic Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::TopicProgress;
use crate::domain::repository::CatalogRepository;
use crate::domain::value_objects::TopicId;
use crate::error::{CatalogError, CatalogResult};

/// Returns one topic with its problems and the caller's progress
pub struct GetTopicUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> GetTopicUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        topic_id: TopicId,
    ) -> CatalogResult<TopicProgress> {
        self.repo
            .find_topic(user_id, topic_id)
            .await?
            .ok_or(CatalogError::TopicNotFound)
    }
}
