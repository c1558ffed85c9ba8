//! Errors surfaced to registry callers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error returned by [`SellerRegistry::update_seller_profile`](crate::SellerRegistry::update_seller_profile).
///
/// Storage and parse failures are not represented here: reads degrade to the
/// seed dataset and write failures are recorded in the registry status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another seller already holds this company name (trimmed, case-insensitive).
    #[error("Company name already taken: {name}")]
    DuplicateName {
        /// The rejected name, as submitted.
        name: String,
    },
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateName { .. } => StatusCode::CONFLICT,
        };

        let body = match &self {
            Self::DuplicateName { name } => json!({
                "error": "duplicate_company_name",
                "message": self.to_string(),
                "companyName": name,
            }),
        };

        (status, Json(body)).into_response()
    }
}
