use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    dag::Dag,
    model::{EdgeModel, VertexModel},
};

/// Frozen, serializable view of a graph for rendering collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagModel {
    pub vertices: Vec<VertexModel>,
    pub edges: Vec<EdgeModel>,
}

impl DagModel {
    pub fn vertex(
        &self,
        name: &str,
    ) -> Option<&VertexModel> {
        self.vertices.iter().find(|v| v.name == name)
    }
}

impl From<&Dag> for DagModel {
    fn from(dag: &Dag) -> Self {
        let prefix = &dag.config().vertex_prefix;
        let names: HashMap<_, _> = dag.vertices().iter().enumerate().map(|(idx, v)| (v.id, format!("{}{}", prefix, idx))).collect();

        let vertices = dag
            .vertices()
            .iter()
            .enumerate()
            .map(|(idx, v)| VertexModel {
                name: format!("{}{}", prefix, idx),
                kind: v.kind,
                label: v.label.clone(),
            })
            .collect();
        let edges = dag
            .edges()
            .iter()
            .map(|e| EdgeModel {
                from: e.from.and_then(|id| names.get(&id).cloned()),
                to: e.to.and_then(|id| names.get(&id).cloned()),
                label: e.label.clone(),
            })
            .collect();

        Self {
            vertices,
            edges,
        }
    }
}

impl Dag {
    /// Snapshot of the graph with positional names resolved.
    pub fn snapshot(&self) -> DagModel {
        DagModel::from(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::dag::{ChannelHandle, Dag, VertexKind};

    #[test]
    fn test_snapshot() {
        let mut dag = Dag::new();
        let ch = ChannelHandle::queue();
        let dangling = ChannelHandle::queue();

        dag.register_source("src", &ch).unwrap();
        dag.register_operator("view", &ch, &dangling).unwrap();

        let before = dag.snapshot();
        assert_eq!(before.edges[1].to, None);

        dag.normalize().unwrap();
        let model = dag.snapshot();

        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.vertex("p2").map(|v| v.kind), Some(VertexKind::Placeholder));
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "vertices": [
                    {"name": "p0", "kind": "source", "label": "src"},
                    {"name": "p1", "kind": "operator", "label": "view"},
                    {"name": "p2", "kind": "placeholder"},
                ],
                "edges": [
                    {"from": "p0", "to": "p1"},
                    {"from": "p1", "to": "p2"},
                ],
            })
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let model = Dag::new().snapshot();
        assert!(model.vertices.is_empty());
        assert!(model.edges.is_empty());
    }
}
