//! Toggle Progress Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::ProgressRecord;
use crate::domain::repository::{CatalogRepository, ProgressRepository};
use crate::domain::value_objects::ProblemId;
use crate::error::{CatalogError, CatalogResult};

/// Flips the caller's completion flag for one problem
pub struct ToggleProgressUseCase<R>
where
    R: CatalogRepository + ProgressRepository,
{
    repo: Arc<R>,
}

impl<R> ToggleProgressUseCase<R>
where
    R: CatalogRepository + ProgressRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        problem_id: ProblemId,
    ) -> CatalogResult<ProgressRecord> {
        // Existence check up front so an unknown id is a clean 404; the
        // upsert's FK constraint still backstops the race with a reseed
        if !self.repo.problem_exists(problem_id).await? {
            return Err(CatalogError::ProblemNotFound);
        }

        let record = self.repo.toggle(user_id, problem_id).await?;

        tracing::info!(
            user_id = %user_id,
            problem_id = %problem_id,
            is_completed = record.is_completed,
            "Progress toggled"
        );

        Ok(record)
    }
}
