use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use club_core::view::{FormValidator, ValidationRules};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Request bodies that declare field rules for the form validation engine.
pub trait FormRules {
    fn rules() -> ValidationRules;
}

/// JSON body checked against [`FormRules`] before deserialization.
///
/// Rule failures reject with 422 and the field-to-message map; a body that
/// passes the rules but does not fit `T` rejects with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + FormRules,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body): Json<serde_json::Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        validate_body::<T>(body).map(ValidatedForm)
    }
}

/// Run the form rules for `T` over `body`, then deserialize it.
pub fn validate_body<T>(body: serde_json::Value) -> Result<T, ApiError>
where
    T: DeserializeOwned + FormRules,
{
    let mut form = FormValidator::from_json(&body, T::rules());
    if !form.validate_all() {
        return Err(ApiError::FieldErrors(form.into_errors()));
    }

    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}
