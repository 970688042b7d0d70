//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::{AppError, FieldError};
use domain::validation::field_messages;

/// JSON extractor that validates the payload before the handler runs.
///
/// Malformed JSON becomes a plain validation error; rule failures are
/// reported per field.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value.validate().map_err(|e| {
            let fields = field_messages(&e)
                .into_iter()
                .map(|(field, message)| FieldError::new(field, message))
                .collect();
            AppError::InvalidFields(fields)
        })?;

        Ok(ValidatedJson(value))
    }
}
