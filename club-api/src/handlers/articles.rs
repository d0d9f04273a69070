use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use club_core::{ArticleKind, RegulationArticle, Repository};
use club_storage::ArticleFilter;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    response::{paginate, ListQuery, PaginatedResponse, PaginationParams},
    security::ValidatedForm,
    AppState,
};

fn filter_from(query: &ArticleQuery) -> ArticleFilter {
    ArticleFilter {
        active_only: query.active_only.unwrap_or(true),
        kind: query.kind,
    }
}

/// Regulation articles in display order, searchable by number, title and text.
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: PaginationParams,
    Query(query): Query<ListQuery>,
    Query(filter): Query<ArticleQuery>,
) -> ApiResult<PaginatedResponse<RegulationArticle>> {
    let articles = state.store.articles.list_filtered(filter_from(&filter)).await?;
    paginate(articles, &query, &params, state.default_page_size, None, &uri)
}

/// Active sanctionable articles, for linking fine causes.
pub async fn sanctionable(State(state): State<AppState>) -> ApiResult<Json<Vec<RegulationArticle>>> {
    let filter = ArticleFilter {
        active_only: true,
        kind: Some(ArticleKind::Sanctionable),
    };
    Ok(Json(state.store.articles.list_filtered(filter).await?))
}

pub async fn count(
    State(state): State<AppState>,
    Query(filter): Query<ArticleQuery>,
) -> ApiResult<Json<ArticleCount>> {
    let count = state.store.articles.count(filter_from(&filter)).await;
    Ok(Json(ArticleCount { count }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleDetail>> {
    let article = find_article(&state, &id).await?;
    let causes = state.store.fine_causes.list_by_article(&id).await?;
    Ok(Json(ArticleDetail { article, causes }))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreateArticleRequest>,
) -> ApiResult<(StatusCode, Json<RegulationArticle>)> {
    let article = payload.into_article();
    article.validate()?;

    let article = state.store.articles.upsert(&article).await?;
    tracing::info!(article_id = %article.id, number = %article.number, "Regulation article created");
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedForm(payload): ValidatedForm<UpdateArticleRequest>,
) -> ApiResult<Json<RegulationArticle>> {
    let mut article = find_article(&state, &id).await?;
    let demoted = payload.kind == Some(ArticleKind::Informative) && article.is_sanctionable();
    if demoted && state.store.fine_causes.any_with_article(&id).await {
        return Err(ApiError::Conflict(
            "article is linked to fine causes and must stay sanctionable".to_string(),
        ));
    }

    payload.apply(&mut article);
    article.validate()?;

    let article = state.store.articles.upsert(&article).await?;
    tracing::info!(article_id = %id, "Regulation article updated");
    Ok(Json(article))
}

/// Articles still referenced by fine causes are deactivated instead of removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleRemoval>> {
    find_article(&state, &id).await?;

    let outcome = if state.store.fine_causes.any_with_article(&id).await {
        state.store.articles.set_active(&id, false).await?;
        RemovalOutcome::Deactivated
    } else {
        state.store.articles.delete(&id).await?;
        RemovalOutcome::Deleted
    };

    tracing::info!(article_id = %id, ?outcome, "Regulation article removed");
    Ok(Json(ArticleRemoval { id, outcome }))
}

pub async fn reorder(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<ReorderArticlesRequest>,
) -> ApiResult<Json<Vec<RegulationArticle>>> {
    let orders: Vec<(Uuid, u32)> = payload
        .orders
        .iter()
        .map(|o| (o.id, o.display_order))
        .collect();

    let articles = state.store.articles.reorder(&orders).await?;
    tracing::info!(count = articles.len(), "Regulation articles reordered");
    Ok(Json(articles))
}

pub async fn duplicate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DuplicateArticleQuery>,
) -> ApiResult<(StatusCode, Json<RegulationArticle>)> {
    let number = query.new_number.trim();
    if number.is_empty() || number.chars().count() > 20 {
        return Err(ApiError::field("new_number", "Must be between 1 and 20 characters"));
    }

    let copy = state.store.articles.duplicate(&id, number).await?;
    tracing::info!(article_id = %id, copy_id = %copy.id, "Regulation article duplicated");
    Ok((StatusCode::CREATED, Json(copy)))
}

async fn find_article(state: &AppState, id: &Uuid) -> ApiResult<RegulationArticle> {
    state
        .store
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Article {} not found", id)))
}
