//! REST API for the club: roster, regulations, fines, payments, expenses,
//! settings, finance reports and the dashboard.
//!
//! [`routes`] returns a router meant to be nested under `/api/v1`. Every
//! route except login and password recovery requires a bearer token; routes
//! outside the member set also require the admin role.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notify;
pub mod response;
pub mod security;

pub use dto::*;
pub use error::{ApiError, ApiResult};
pub use middleware::{AuthConfig, AuthUser};
pub use notify::{LogNotifier, ResetNotifier};

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post, put},
    Router,
};
use club_core::{view::DEFAULT_ITEMS_PER_PAGE, Role};
use club_storage::ClubStore;
use std::sync::Arc;

use crate::handlers::{
    articles, auth, dashboard, expenses, finance, fines, payments, players, settings,
};
use crate::middleware::auth_middleware;
use crate::security::require_role;

#[derive(Clone)]
pub struct AppState {
    pub store: ClubStore,
    pub auth: AuthConfig,
    /// Page size for list endpoints when the request does not give one.
    pub default_page_size: usize,
    pub reset_notifier: Arc<dyn ResetNotifier>,
}

impl AppState {
    pub fn new(store: ClubStore, auth: AuthConfig) -> Self {
        Self {
            store,
            auth,
            default_page_size: DEFAULT_ITEMS_PER_PAGE,
            reset_notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    pub fn with_reset_notifier(mut self, notifier: Arc<dyn ResetNotifier>) -> Self {
        self.reset_notifier = notifier;
        self
    }
}

pub fn routes(state: AppState) -> Router {
    let admin = Router::new()
        .route("/players", get(players::list).post(players::create))
        .route("/players/export/csv", get(players::export_csv))
        .route("/players/:id", put(players::update))
        .route("/players/:id/status", patch(players::set_status))
        .route("/fines", post(fines::create))
        .route("/fines/:id", put(fines::update).delete(fines::delete))
        .route("/fines/causes", get(fines::list_causes).post(fines::create_cause))
        .route(
            "/fines/causes/:id",
            put(fines::update_cause).delete(fines::delete_cause),
        )
        .route("/fines/group", get(fines::list_groups).post(fines::create_group))
        .route("/fines/group/:id", get(fines::group_detail))
        .route("/payments", post(payments::create))
        .route("/payments/combined", post(payments::create_combined))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/:id", delete(expenses::delete))
        .route(
            "/expenses/categories",
            get(expenses::list_categories).post(expenses::create_category),
        )
        .route(
            "/expenses/categories/:id",
            get(expenses::get_category)
                .put(expenses::update_category)
                .delete(expenses::delete_category),
        )
        .route("/expenses/summary", get(expenses::summary))
        .route("/expenses/export/csv", get(expenses::export_csv))
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/fine-ranking", get(dashboard::fine_ranking_list))
        .route("/dashboard/payment-status", get(dashboard::payment_status_grid))
        .route("/finance/statement", get(finance::statement))
        .route("/finance/statement/period", get(finance::period_statement))
        .route("/finance/monthly-summary", get(finance::monthly_summary))
        .route("/finance/balance", get(finance::balance))
        .route("/articles", post(articles::create))
        .route("/articles/reorder", post(articles::reorder))
        .route(
            "/articles/:id",
            put(articles::update).delete(articles::delete),
        )
        .route("/articles/:id/duplicate", post(articles::duplicate))
        .route("/settings", get(settings::list).post(settings::create))
        .route(
            "/settings/:key",
            get(settings::get).put(settings::update).delete(settings::delete),
        )
        .route_layer(from_fn(require_role(Role::Admin)));

    // Players reach these for their own records; handlers enforce the scope.
    let member = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/preferences", put(auth::update_preferences))
        .route("/players/:id", get(players::get))
        .route("/players/:id/account", get(players::account))
        .route("/fines", get(fines::list))
        .route("/payments", get(payments::list))
        .route("/articles", get(articles::list))
        .route("/articles/sanctionable", get(articles::sanctionable))
        .route("/articles/count", get(articles::count))
        .route("/articles/:id", get(articles::get));

    let protected = admin
        .merge(member)
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/password/recover", post(auth::recover_password))
        .route("/auth/password/reset", post(auth::reset_password))
        .merge(protected)
        .with_state(state)
}
