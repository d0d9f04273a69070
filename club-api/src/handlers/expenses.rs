use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use club_core::{expense_summary, CategorySummary, Expense, ExpenseCategory, Period, Repository};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::*,
    error::{ApiError, ApiResult},
    response::{paginate, CsvFile, ListQuery, PaginatedResponse, PaginationParams},
    security::ValidatedForm,
    AppState,
};

pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: PaginationParams,
    Query(query): Query<ListQuery>,
    Query(filter): Query<ExpenseFilter>,
) -> ApiResult<PaginatedResponse<ExpenseDetail>> {
    let mut expenses = state.store.expenses.list().await?;
    if let Some(category) = filter.category {
        expenses.retain(|e| e.category_id == category);
    }

    let details = join_categories(&state, expenses).await?;
    paginate(details, &query, &params, state.default_page_size, None, &uri)
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseDetail>)> {
    let category = state
        .store
        .expense_categories
        .find_by_id(&payload.category_id)
        .await?
        .ok_or_else(|| ApiError::field("category_id", "Expense category not found"))?;

    let expense = payload.into_expense();
    expense.validate()?;

    let expense = state.store.expenses.save(&expense).await?;
    tracing::info!(expense_id = %expense.id, amount = %expense.amount, "Expense recorded");
    Ok((
        StatusCode::CREATED,
        Json(ExpenseDetail::new(expense, Some(&category))),
    ))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    state.store.expenses.delete(&id).await?;
    tracing::info!(expense_id = %id, "Expense deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ExpenseCategory>>> {
    Ok(Json(state.store.expense_categories.list().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    ValidatedForm(payload): ValidatedForm<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseCategory>)> {
    let category = ExpenseCategory::new(payload.name.trim().to_string(), payload.description);
    category.validate()?;

    let category = state.store.expense_categories.create(&category).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Expense category created");
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ExpenseCategory>> {
    Ok(Json(find_category(&state, &id).await?))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedForm(payload): ValidatedForm<CreateCategoryRequest>,
) -> ApiResult<Json<ExpenseCategory>> {
    let mut category = find_category(&state, &id).await?;
    category.name = payload.name.trim().to_string();
    category.description = payload.description;
    category.validate()?;

    let category = state.store.expense_categories.update(&category).await?;
    tracing::info!(category_id = %id, name = %category.name, "Expense category updated");
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.store.expenses.any_in_category(&id).await {
        return Err(ApiError::Conflict(
            "expense category has recorded expenses".to_string(),
        ));
    }

    state.store.expense_categories.delete(&id).await?;
    tracing::info!(category_id = %id, "Expense category deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Totals per category, largest first, optionally within a date range.
pub async fn summary(
    State(state): State<AppState>,
    Query(range): Query<StatementQuery>,
) -> ApiResult<Json<Vec<CategorySummary>>> {
    let period = Period::between(range.from, range.to)?;
    let categories = state.store.expense_categories.list().await?;
    let mut expenses = state.store.expenses.list().await?;
    expenses.retain(|e| period.contains(e.date));
    Ok(Json(expense_summary(&categories, &expenses)))
}

pub async fn export_csv(State(state): State<AppState>) -> ApiResult<CsvFile> {
    let expenses = state.store.expenses.list().await?;
    let details = join_categories(&state, expenses).await?;
    Ok(CsvFile::new("expenses.csv", &details))
}

async fn find_category(state: &AppState, id: &Uuid) -> ApiResult<ExpenseCategory> {
    state
        .store
        .expense_categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Expense category {} not found", id)))
}

async fn join_categories(state: &AppState, expenses: Vec<Expense>) -> ApiResult<Vec<ExpenseDetail>> {
    let categories: HashMap<Uuid, ExpenseCategory> = state
        .store
        .expense_categories
        .list()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(expenses
        .into_iter()
        .map(|e| {
            let category = categories.get(&e.category_id);
            ExpenseDetail::new(e, category)
        })
        .collect())
}
