use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeModel {
    /// display name of the producing vertex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// display name of the consuming vertex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
