//! List Topics Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::TopicProgress;
use crate::domain::repository::CatalogRepository;
use crate::error::CatalogResult;

/// Returns the whole curriculum annotated with the caller's progress
pub struct ListTopicsUseCase<R>
where
    R: CatalogRepository,
{
    repo: Arc<R>,
}

impl<R> ListTopicsUseCase<R>
where
    R: CatalogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> CatalogResult<Vec<TopicProgress>> {
        self.repo.list_topics(user_id).await
    }
}
