use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};

use crate::{schema::ValidationErrors, utils::truncate};

/// Longest message echoed back to clients on a 500.
const DETAIL_LIMIT: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Db(#[from] sea_orm::DbErr),
  #[error("Validation failed: {0}")]
  Validation(#[from] ValidationErrors),
  #[error("Database not available")]
  Unavailable,
  #[error("Unknown schema `{0}`")]
  UnknownSchema(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Error::UnknownSchema(_) => StatusCode::NOT_FOUND,
      Error::Db(_) | Error::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self {
      Error::Validation(errors) => json::json!({ "detail": errors }),
      Error::UnknownSchema(_) => json::json!({ "detail": self.to_string() }),
      other => {
        tracing::error!("Request failed: {other}");
        json::json!({ "detail": truncate(&other.to_string(), DETAIL_LIMIT) })
      }
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_maps_to_unprocessable() {
    let mut errors = ValidationErrors::default();
    errors.push("price", "must be >= 0");
    assert_eq!(
      Error::Validation(errors).status(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
  }

  #[test]
  fn store_failures_map_to_internal() {
    let err = Error::Db(sea_orm::DbErr::Custom("disk full".into()));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(Error::Unavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
