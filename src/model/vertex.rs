use serde::{Deserialize, Serialize};

use crate::dag::VertexKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexModel {
    /// positional display name
    pub name: String,
    pub kind: VertexKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
