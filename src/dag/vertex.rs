use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque vertex identity, stable across placeholder insertions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) u64);

impl fmt::Display for VertexId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VertexKind {
    /// Computational task.
    Task,
    /// Stream operator.
    Operator,
    /// Origin of data with no upstream.
    Source,
    /// Synthesized endpoint with no stage behind it.
    Placeholder,
}

/// A stage of the pipeline.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// vertex identity
    pub id: VertexId,
    /// vertex kind
    pub kind: VertexKind,
    /// human-readable description, absent for placeholders
    pub label: Option<String>,
}

impl Vertex {
    pub(crate) fn new(
        id: VertexId,
        kind: VertexKind,
        label: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            label,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == VertexKind::Placeholder
    }
}

/// Vertex reference carried by errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VertexRef {
    pub id: VertexId,
    /// kind, label and display name rendered at the time of the error
    pub name: String,
}

impl fmt::Display for VertexRef {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.name)
    }
}
