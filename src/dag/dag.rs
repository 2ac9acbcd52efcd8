//! The execution graph of a declared pipeline.
//!
//! Stages are registered one at a time while the pipeline is declared. Each
//! registration links the stage to the edges of the channels it reads and
//! writes, creating edges on first sight. Edges are allowed to dangle until
//! [`Dag::normalize`] runs.

use std::{fmt, sync::Arc};

use tracing::{debug, trace, warn};

use crate::{
    Config, DagflowError, Result,
    dag::{
        channel::{ChannelHandle, ChannelHandler, Channels},
        edge::Edge,
        names::NameTable,
        params::{InParam, OutParam, inbound_handlers, outbound_handlers},
        vertex::{Vertex, VertexId, VertexKind, VertexRef},
    },
};

const ANONYMOUS_CHANNEL: &str = "<anonymous>";

/// Directed graph of pipeline stages and the channels between them.
///
/// The graph has a single writer: every mutating operation takes `&mut self`.
/// Callers that declare stages from several threads must wrap the graph in
/// their own lock. Once normalized the graph is only read.
pub struct Dag {
    pub(crate) config: Config,
    /// Binding environment used to name channels.
    pub(crate) names: Option<Arc<dyn NameTable>>,
    /// Vertices in display order.
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    next_id: u64,
    pub(crate) normalized: bool,
}

impl Default for Dag {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Dag")
            .field("config", &self.config)
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("normalized", &self.normalized)
            .finish_non_exhaustive()
    }
}

impl Dag {
    /// create an empty graph with the default config and no name table
    pub fn new() -> Self {
        Self::with_parts(Config::default(), None)
    }

    pub(crate) fn with_parts(
        config: Config,
        names: Option<Arc<dyn NameTable>>,
    ) -> Self {
        Self {
            config,
            names,
            vertices: Vec::new(),
            edges: Vec::new(),
            next_id: 0,
            normalized: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Attaches the name table used to label channels, replacing any previous one.
    pub fn set_names(
        &mut self,
        names: Arc<dyn NameTable>,
    ) {
        self.names = Some(names);
    }

    /// Registers a task reading `inputs` and writing `outputs`.
    ///
    /// Default parameters are ignored. Set parameters produce unlabeled edges.
    pub fn register_task(
        &mut self,
        label: &str,
        inputs: &[InParam],
        outputs: &[OutParam],
    ) -> Result<VertexId> {
        require_label(VertexKind::Task, label)?;
        if inputs.is_empty() {
            return Err(DagflowError::Config(format!("task `{}` must declare at least one input", label)));
        }
        if outputs.is_empty() {
            return Err(DagflowError::Config(format!("task `{}` must declare at least one output", label)));
        }

        self.add_vertex(VertexKind::Task, label, inbound_handlers(inputs), outbound_handlers(outputs))
    }

    /// Registers an operator. `outputs` may be empty for a terminal operator.
    pub fn register_operator(
        &mut self,
        label: &str,
        inputs: impl Into<Channels>,
        outputs: impl Into<Channels>,
    ) -> Result<VertexId> {
        require_label(VertexKind::Operator, label)?;
        let inputs = inputs.into();
        if inputs.is_empty() {
            return Err(DagflowError::Config(format!("operator `{}` must declare at least one input channel", label)));
        }

        self.add_vertex(VertexKind::Operator, label, inputs.into_handlers(), outputs.into().into_handlers())
    }

    /// Registers a data source with no upstream.
    pub fn register_source(
        &mut self,
        label: &str,
        source: impl Into<Channels>,
    ) -> Result<VertexId> {
        require_label(VertexKind::Source, label)?;
        let source = source.into();
        if source.is_empty() {
            return Err(DagflowError::Config(format!("source `{}` must declare at least one channel", label)));
        }

        self.add_vertex(VertexKind::Source, label, Vec::new(), source.into_handlers())
    }

    fn add_vertex(
        &mut self,
        kind: VertexKind,
        label: &str,
        inbounds: Vec<ChannelHandler>,
        outbounds: Vec<ChannelHandler>,
    ) -> Result<VertexId> {
        let vertex = self.next_vertex_id();
        self.vertices.push(Vertex::new(vertex, kind, Some(label.to_string())));
        debug!("dag::add_vertex({}, {}) as {}{}", kind.as_ref(), label, self.config.vertex_prefix, self.vertices.len() - 1);

        for entering in inbounds {
            self.inbound(vertex, entering)?;
        }
        for leaving in outbounds {
            self.outbound(vertex, leaving)?;
        }

        Ok(vertex)
    }

    fn next_vertex_id(&mut self) -> VertexId {
        let id = VertexId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts a placeholder vertex at `position` of the vertex sequence.
    pub(crate) fn insert_placeholder(
        &mut self,
        position: usize,
    ) -> VertexId {
        let id = self.next_vertex_id();
        self.vertices.insert(position, Vertex::new(id, VertexKind::Placeholder, None));
        trace!("dag::insert_placeholder({}) at {}", id, position);
        id
    }

    fn inbound(
        &mut self,
        vertex: VertexId,
        entering: ChannelHandler,
    ) -> Result<()> {
        let Some(idx) = self.find_edge_index(&entering.channel) else {
            trace!("dag::inbound({}) new edge {:?}", vertex, entering.label);
            self.edges.push(Edge::inbound(entering, vertex));
            return Ok(());
        };

        let Some(existing) = self.edges[idx].to else {
            trace!("dag::inbound({}) fills edge {}", vertex, idx);
            self.edges[idx].to = Some(vertex);
            return Ok(());
        };

        if entering.channel.is_broadcast() {
            let origin = match self.edges[idx].from {
                Some(from) => from,
                None => {
                    let position = self.position(existing)?;
                    let origin = self.insert_placeholder(position);
                    self.edges[idx].from = Some(origin);
                    origin
                }
            };
            trace!("dag::inbound({}) forks edge {} from {}", vertex, idx, origin);
            self.edges.push(Edge::fork(entering, origin, vertex));
            return Ok(());
        }

        let error = DagflowError::MultipleInputChannel {
            channel: self.channel_name(&entering, idx),
            vertex: self.vertex_ref(vertex),
            existing: self.vertex_ref(existing),
        };
        warn!("{}", error);
        Err(error)
    }

    fn outbound(
        &mut self,
        vertex: VertexId,
        leaving: ChannelHandler,
    ) -> Result<()> {
        let Some(idx) = self.find_edge_index(&leaving.channel) else {
            trace!("dag::outbound({}) new edge {:?}", vertex, leaving.label);
            self.edges.push(Edge::outbound(leaving, vertex));
            return Ok(());
        };

        let Some(existing) = self.edges[idx].from else {
            trace!("dag::outbound({}) fills edge {}", vertex, idx);
            self.edges[idx].from = Some(vertex);
            return Ok(());
        };

        let error = DagflowError::MultipleOutputChannel {
            channel: self.channel_name(&leaving, idx),
            vertex: self.vertex_ref(vertex),
            existing: self.vertex_ref(existing),
        };
        warn!("{}", error);
        Err(error)
    }

    /// Finds the edge created for `channel`. For a forked value channel this is the first branch.
    pub fn find_edge(
        &self,
        channel: &ChannelHandle,
    ) -> Option<&Edge> {
        self.find_edge_index(channel).map(|idx| &self.edges[idx])
    }

    fn find_edge_index(
        &self,
        channel: &ChannelHandle,
    ) -> Option<usize> {
        self.edges.iter().position(|e| e.channel.same(channel))
    }

    /// Current position of a vertex in the display order.
    pub fn order_of(
        &self,
        id: VertexId,
    ) -> Option<usize> {
        self.vertices.iter().position(|v| v.id == id)
    }

    pub(crate) fn position(
        &self,
        id: VertexId,
    ) -> Result<usize> {
        self.order_of(id).ok_or(DagflowError::Config(format!("vertex {} not found", id)))
    }

    /// Positional display name, e.g. `p3`.
    pub fn vertex_name(
        &self,
        id: VertexId,
    ) -> Option<String> {
        self.order_of(id).map(|idx| format!("{}{}", self.config.vertex_prefix, idx))
    }

    pub fn vertex(
        &self,
        id: VertexId,
    ) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    /// Vertices in display order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges consumed by the vertex.
    pub fn incoming(
        &self,
        id: VertexId,
    ) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.to == Some(id))
    }

    /// Edges produced by the vertex.
    pub fn outgoing(
        &self,
        id: VertexId,
    ) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.from == Some(id))
    }

    pub fn placeholder_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_placeholder()).count()
    }

    /// True until the first vertex or edge is registered.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Name bound to `channel` in the name table, if name resolution is on.
    pub(crate) fn lookup_name(
        &self,
        channel: &ChannelHandle,
    ) -> Option<String> {
        if !self.config.resolve_names {
            return None;
        }
        self.names.as_ref().and_then(|names| names.lookup(channel))
    }

    fn channel_name(
        &self,
        handler: &ChannelHandler,
        idx: usize,
    ) -> String {
        self.lookup_name(&handler.channel)
            .or_else(|| handler.label.clone())
            .or_else(|| self.edges.get(idx).and_then(|e| e.label.clone()))
            .unwrap_or_else(|| ANONYMOUS_CHANNEL.to_string())
    }

    pub(crate) fn vertex_ref(
        &self,
        id: VertexId,
    ) -> VertexRef {
        let position = self.vertex_name(id).unwrap_or_else(|| id.to_string());
        let name = match self.vertex(id) {
            Some(Vertex {
                kind,
                label: Some(label),
                ..
            }) => format!("{} `{}` ({})", kind.as_ref(), label, position),
            Some(vertex) => format!("{} ({})", vertex.kind.as_ref(), position),
            None => position,
        };
        VertexRef {
            id,
            name,
        }
    }
}

fn require_label(
    kind: VertexKind,
    label: &str,
) -> Result<()> {
    if label.trim().is_empty() {
        return Err(DagflowError::Config(format!("{} label must not be empty", kind.as_ref())));
    }
    Ok(())
}
