//! Post-declaration normalization.
//!
//! Completes every dangling edge with a placeholder vertex, then labels edges
//! with the names their channels are bound to in the name table.

use tracing::debug;

use crate::{DagflowError, Result, dag::Dag};

impl Dag {
    /// Finalizes the graph once all stages are registered.
    ///
    /// Edges that already have both endpoints are left untouched, so calling
    /// this again only re-applies channel names.
    pub fn normalize(&mut self) -> Result<()> {
        let synthesized = self.normalize_missing_vertices()?;
        let resolved = self.normalize_edge_names();
        debug!("dag::normalize() synthesized {} placeholders, resolved {} edge names", synthesized, resolved);

        if self.config.check_cycles {
            self.validate()?;
        }

        self.normalized = true;
        Ok(())
    }

    fn normalize_missing_vertices(&mut self) -> Result<usize> {
        let mut count = 0;
        for idx in 0..self.edges.len() {
            match (self.edges[idx].from, self.edges[idx].to) {
                (Some(_), Some(_)) => continue,
                (None, Some(to)) => {
                    let position = self.position(to)?;
                    let origin = self.insert_placeholder(position);
                    self.edges[idx].from = Some(origin);
                }
                (Some(from), None) => {
                    let position = self.position(from)?;
                    let target = self.insert_placeholder(position + 1);
                    self.edges[idx].to = Some(target);
                }
                (None, None) => {
                    let label = self.edges[idx].label.clone().unwrap_or_else(|| format!("#{}", idx));
                    return Err(DagflowError::Config(format!("edge `{}` has neither a source nor a target vertex", label)));
                }
            }
            count += 1;
        }
        Ok(count)
    }

    fn normalize_edge_names(&mut self) -> usize {
        if self.names.is_none() || !self.config.resolve_names {
            debug!("dag::normalize_edge_names() skipped, no name table");
            return 0;
        }

        let names: Vec<Option<String>> = self.edges.iter().map(|e| self.lookup_name(&e.channel)).collect();
        let mut count = 0;
        for (edge, name) in self.edges.iter_mut().zip(names) {
            if let Some(name) = name {
                edge.label = Some(name);
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        Config, DagBuilder, DagflowError,
        dag::{Binding, ChannelHandle, Channels, Dag, Edge, InParam, OutParam, VertexKind},
    };

    #[test]
    fn test_missing_source_inserted_before_consumer() {
        let mut dag = Dag::new();
        let c1 = ChannelHandle::queue();
        let c2 = ChannelHandle::queue();

        dag.register_source("src", &c1).unwrap();
        let view = dag.register_operator("view", &c2, Channels::None).unwrap();
        dag.register_operator("sink", &c1, Channels::None).unwrap();

        dag.normalize().unwrap();

        let kinds: Vec<_> = dag.vertices().iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![VertexKind::Source, VertexKind::Placeholder, VertexKind::Operator, VertexKind::Operator]);

        let edge = dag.find_edge(&c2).unwrap();
        assert_eq!(edge.from, Some(dag.vertices()[1].id));
        assert_eq!(edge.to, Some(view));
    }

    #[test]
    fn test_missing_target_inserted_after_producer() {
        let mut dag = Dag::new();
        let out = ChannelHandle::queue();

        let first = dag.register_source("first", &out).unwrap();
        dag.register_source("second", ChannelHandle::queue()).unwrap();

        dag.normalize().unwrap();

        let names: Vec<_> = dag.vertices().iter().map(|v| v.label.clone()).collect();
        assert_eq!(names, vec![Some("first".to_string()), None, Some("second".to_string()), None]);
        assert_eq!(dag.find_edge(&out).unwrap().to, Some(dag.vertices()[1].id));
        assert_eq!(dag.order_of(first), Some(0));
        assert_eq!(dag.placeholder_count(), 2);
    }

    #[test]
    fn test_all_edges_complete_after_normalize() {
        let mut dag = Dag::new();
        let a = ChannelHandle::queue();
        let b = ChannelHandle::queue();
        let c = ChannelHandle::value();

        dag.register_task("t", &[InParam::named("a", a.clone())], &[OutParam::named("b", vec![b.clone()])]).unwrap();
        dag.register_operator("x", &c, Channels::None).unwrap();
        dag.register_operator("y", &c, Channels::None).unwrap();

        assert!(!dag.is_normalized());
        dag.normalize().unwrap();

        assert!(dag.is_normalized());
        assert!(dag.edges().iter().all(Edge::is_complete));
    }

    #[test]
    fn test_complete_edges_untouched() {
        let mut dag = Dag::new();
        let ch = ChannelHandle::queue();

        let src = dag.register_source("src", &ch).unwrap();
        let op = dag.register_operator("op", &ch, Channels::None).unwrap();

        dag.normalize().unwrap();
        dag.normalize().unwrap();

        assert_eq!(dag.vertices().len(), 2);
        let edge = dag.find_edge(&ch).unwrap();
        assert_eq!((edge.from, edge.to), (Some(src), Some(op)));
    }

    #[test]
    fn test_edge_without_endpoints() {
        let mut dag = Dag::new();
        dag.register_source("src", ChannelHandle::queue()).unwrap();
        dag.edges[0].from = None;

        let err = dag.normalize().unwrap_err();
        assert!(matches!(err, DagflowError::Config(_)));
        assert!(!dag.is_normalized());
    }

    #[test]
    fn test_names_override_labels() {
        let ch = ChannelHandle::queue();
        let other = ChannelHandle::queue();
        let binding: Binding = [("foo", ch.clone())].into_iter().collect();
        let mut dag = DagBuilder::new().names(Arc::new(binding)).build().unwrap();

        dag.register_task("t", &[InParam::named("reads", ch.clone())], &[OutParam::named("out", vec![other.clone()])]).unwrap();
        assert_eq!(dag.find_edge(&ch).unwrap().label.as_deref(), Some("reads"));

        dag.normalize().unwrap();
        assert_eq!(dag.find_edge(&ch).unwrap().label.as_deref(), Some("foo"));
        assert_eq!(dag.find_edge(&other).unwrap().label.as_deref(), Some("out"));
    }

    #[test]
    fn test_names_apply_to_every_fork() {
        let value = ChannelHandle::value();
        let binding: Binding = [("genome", value.clone())].into_iter().collect();
        let mut dag = DagBuilder::new().names(Arc::new(binding)).build().unwrap();

        dag.register_operator("a", &value, Channels::None).unwrap();
        dag.register_operator("b", &value, Channels::None).unwrap();
        dag.normalize().unwrap();

        assert!(dag.edges().iter().all(|e| e.label.as_deref() == Some("genome")));
    }

    #[test]
    fn test_no_name_table() {
        let mut dag = Dag::new();
        let ch = ChannelHandle::queue();

        dag.register_source("src", &ch).unwrap();
        dag.normalize().unwrap();

        assert_eq!(dag.find_edge(&ch).unwrap().label, None);
    }

    #[test]
    fn test_name_resolution_disabled() {
        let ch = ChannelHandle::queue();
        let binding: Binding = [("foo", ch.clone())].into_iter().collect();
        let config = Config {
            resolve_names: false,
            ..Config::default()
        };
        let mut dag = DagBuilder::new().config(config).names(Arc::new(binding)).build().unwrap();

        dag.register_source("src", &ch).unwrap();
        dag.normalize().unwrap();

        assert_eq!(dag.find_edge(&ch).unwrap().label, None);
    }

    #[test]
    fn test_check_cycles_on_normalize() {
        let config = Config {
            check_cycles: true,
            ..Config::default()
        };
        let mut dag = DagBuilder::new().config(config).build().unwrap();
        let a = ChannelHandle::queue();
        let b = ChannelHandle::queue();

        dag.register_operator("left", &a, &b).unwrap();
        dag.register_operator("right", &b, &a).unwrap();

        assert!(matches!(dag.normalize(), Err(DagflowError::Cycle(_))));
        assert!(!dag.is_normalized());
    }
}
