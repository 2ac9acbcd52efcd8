//! petgraph view of a normalized graph.

use std::collections::HashMap;

use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
};

use crate::{
    DagflowError, Result,
    dag::{Dag, edge::Edge, vertex::Vertex},
};

impl Dag {
    /// Borrows the graph as a petgraph `DiGraph`, nodes in display order.
    ///
    /// Fails if an edge is still dangling, i.e. the graph was not normalized.
    pub fn to_graph(&self) -> Result<DiGraph<&Vertex, &Edge>> {
        let mut graph = DiGraph::with_capacity(self.vertices.len(), self.edges.len());

        let mut nodes: HashMap<_, NodeIndex> = HashMap::new();
        for vertex in self.vertices.iter() {
            nodes.insert(vertex.id, graph.add_node(vertex));
        }
        for (idx, edge) in self.edges.iter().enumerate() {
            let (Some(from), Some(to)) = (edge.from, edge.to) else {
                return Err(DagflowError::Config(format!("edge #{} is dangling, normalize the graph first", idx)));
            };
            let source = nodes.get(&from).ok_or(DagflowError::Config(format!("source vertex {} not found", from)))?;
            let target = nodes.get(&to).ok_or(DagflowError::Config(format!("target vertex {} not found", to)))?;
            graph.add_edge(*source, *target, edge);
        }

        Ok(graph)
    }

    /// Checks that the graph is acyclic.
    pub fn validate(&self) -> Result<()> {
        let graph = self.to_graph()?;
        toposort(&graph, None).map(|_| ()).map_err(|cycle| {
            let vertex = graph[cycle.node_id()];
            DagflowError::Cycle(self.vertex_name(vertex.id).unwrap_or_else(|| vertex.id.to_string()))
        })
    }

    /// Vertices nothing flows into.
    pub fn roots(&self) -> Result<Vec<&Vertex>> {
        let graph = self.to_graph()?;
        Ok(graph.externals(Direction::Incoming).map(|idx| graph[idx]).collect())
    }

    /// Vertices nothing flows out of.
    pub fn leaves(&self) -> Result<Vec<&Vertex>> {
        let graph = self.to_graph()?;
        Ok(graph.externals(Direction::Outgoing).map(|idx| graph[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        DagflowError,
        dag::{ChannelHandle, Channels, Dag, InParam, OutParam},
    };

    fn diamond() -> Dag {
        let mut dag = Dag::new();
        let input = ChannelHandle::value();
        let left = ChannelHandle::queue();
        let right = ChannelHandle::queue();

        dag.register_source("src", &input).unwrap();
        dag.register_task("l", &[InParam::named("in", input.clone())], &[OutParam::named("out", vec![left.clone()])]).unwrap();
        dag.register_task("r", &[InParam::named("in", input.clone())], &[OutParam::named("out", vec![right.clone()])]).unwrap();
        dag.register_operator("join", vec![left, right], Channels::None).unwrap();
        dag.normalize().unwrap();
        dag
    }

    #[test]
    fn test_to_graph() {
        let dag = diamond();
        let graph = dag.to_graph().unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(dag.validate().is_ok());
    }

    #[test]
    fn test_to_graph_requires_normalize() {
        let mut dag = Dag::new();
        dag.register_source("src", ChannelHandle::queue()).unwrap();

        assert!(matches!(dag.to_graph(), Err(DagflowError::Config(_))));
    }

    #[test]
    fn test_roots_and_leaves() {
        let dag = diamond();

        let roots: Vec<_> = dag.roots().unwrap().iter().map(|v| v.label.clone()).collect();
        let leaves: Vec<_> = dag.leaves().unwrap().iter().map(|v| v.label.clone()).collect();
        assert_eq!(roots, vec![Some("src".to_string())]);
        assert_eq!(leaves, vec![Some("join".to_string())]);
    }

    #[test]
    fn test_cycle_detected() {
        let mut dag = Dag::new();
        let a = ChannelHandle::queue();
        let b = ChannelHandle::queue();

        dag.register_operator("left", &a, &b).unwrap();
        dag.register_operator("right", &b, &a).unwrap();
        dag.normalize().unwrap();

        let err = dag.validate().unwrap_err();
        assert!(matches!(err, DagflowError::Cycle(ref name) if name == "p0" || name == "p1"));
    }
}
