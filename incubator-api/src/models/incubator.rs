use serde::{Deserialize, Serialize};

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncubatorRequest {
    /// Incubator name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncubatorResponse {
    /// Incubator identifier
    pub id: Id,
    /// Incubator name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
}
