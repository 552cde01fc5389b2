//! HTTP Handlers
//!
//! All catalog routes sit behind the bearer-token middleware, so every
//! handler can rely on the [`CurrentUser`] extractor.

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use kernel::principal::CurrentUser;

use crate::application::{GetTopicUseCase, ListTopicsUseCase, ToggleProgressUseCase};
use crate::domain::repository::{CatalogRepository, ProgressRepository};
use crate::domain::value_objects::{ProblemId, TopicId};
use crate::error::CatalogResult;
use crate::presentation::dto::{ProgressResponse, TopicResponse};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/dsa/topics
pub async fn list_topics<R>(
    State(state): State<CatalogAppState<R>>,
    current_user: CurrentUser,
) -> CatalogResult<Json<Vec<TopicResponse>>>
where
    R: CatalogRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListTopicsUseCase::new(state.repo.clone());

    let views = use_case.execute(&current_user.user_id).await?;

    Ok(Json(views.into_iter().map(TopicResponse::from).collect()))
}

/// GET /api/dsa/topics/{id}
pub async fn get_topic<R>(
    State(state): State<CatalogAppState<R>>,
    current_user: CurrentUser,
    Path(topic_id): Path<i32>,
) -> CatalogResult<Json<TopicResponse>>
where
    R: CatalogRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetTopicUseCase::new(state.repo.clone());

    let view = use_case
        .execute(&current_user.user_id, TopicId::new(topic_id))
        .await?;

    Ok(Json(TopicResponse::from(view)))
}

/// POST /api/dsa/progress/{problemId}
pub async fn toggle_progress<R>(
    State(state): State<CatalogAppState<R>>,
    current_user: CurrentUser,
    Path(problem_id): Path<i32>,
) -> CatalogResult<Json<ProgressResponse>>
where
    R: CatalogRepository + ProgressRepository + Clone + Send + Sync + 'static,
{
    let use_case = ToggleProgressUseCase::new(state.repo.clone());

    let record = use_case
        .execute(&current_user.user_id, ProblemId::new(problem_id))
        .await?;

    Ok(Json(ProgressResponse::from(record)))
}
