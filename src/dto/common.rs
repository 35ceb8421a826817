//! Response envelope and query parameters shared by every resource.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::dao::sqlite::ListFilter;

/// Envelope returned by single-entity operations: a success flag, the entity
/// when there is one, and a human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The affected entity, when the operation yields one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable outcome description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying an entity.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Successful response carrying an entity and no message.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Successful response with only a message (deletes).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

fn default_limit() -> i64 {
    100
}

/// Pagination and visibility query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip.
    #[serde(default)]
    pub skip: i64,
    /// Maximum rows to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Include soft-deleted and deactivated rows.
    #[serde(default)]
    pub include_inactive: bool,
}

impl From<ListParams> for ListFilter {
    fn from(params: ListParams) -> Self {
        ListFilter {
            skip: params.skip.max(0),
            limit: params.limit.clamp(0, 1000),
            include_inactive: params.include_inactive,
        }
    }
}

/// Visibility query parameter for get endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VisibilityParams {
    /// Include soft-deleted and deactivated rows.
    #[serde(default)]
    pub include_inactive: bool,
}

/// The version the caller last observed, required on update and delete.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VersionParams {
    /// Expected current version of the record.
    pub version: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_clamp_into_filter() {
        let filter: ListFilter = ListParams {
            skip: -5,
            limit: 100_000,
            include_inactive: false,
        }
        .into();
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 1000);
    }

    #[test]
    fn envelope_skips_empty_fields() {
        let json = serde_json::to_value(ApiResponse::<u32>::message("Team deleted successfully"))
            .unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
        assert_eq!(json["message"], "Team deleted successfully");
    }
}
