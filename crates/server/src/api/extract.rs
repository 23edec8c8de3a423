use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;

use crate::error::ServerError;

/// JSON body extractor that reports every rejection as a 400
/// [`ServerError::BadRequest`] with a JSON body.
///
/// Covers malformed JSON, a missing or wrong `Content-Type`, and bodies that
/// do not match the request type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServerError::BadRequest(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "expected a JSON body with Content-Type: application/json".to_owned()
        }
        other => format!("invalid request body: {}", other.body_text()),
    }
}
