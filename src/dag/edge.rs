//! Edges connecting pipeline stages.
//!
//! Each edge stands for one channel. While the graph is being declared an edge
//! may know only one of its endpoints; normalization completes the other one.

use crate::dag::{
    channel::{ChannelHandle, ChannelHandler},
    vertex::VertexId,
};

#[derive(Debug, Clone)]
pub struct Edge {
    /// The channel this edge stands for, compared by identity.
    pub channel: ChannelHandle,
    /// Producing vertex.
    pub from: Option<VertexId>,
    /// Consuming vertex.
    pub to: Option<VertexId>,
    /// Display label.
    pub label: Option<String>,
}

impl Edge {
    /// Edge first seen from its consumer.
    pub(crate) fn inbound(
        entering: ChannelHandler,
        to: VertexId,
    ) -> Self {
        Self {
            channel: entering.channel,
            from: None,
            to: Some(to),
            label: entering.label,
        }
    }

    /// Edge first seen from its producer.
    pub(crate) fn outbound(
        leaving: ChannelHandler,
        from: VertexId,
    ) -> Self {
        Self {
            channel: leaving.channel,
            from: Some(from),
            to: None,
            label: leaving.label,
        }
    }

    /// Extra branch of a value channel read by several consumers.
    pub(crate) fn fork(
        entering: ChannelHandler,
        from: VertexId,
        to: VertexId,
    ) -> Self {
        Self {
            channel: entering.channel,
            from: Some(from),
            to: Some(to),
            label: entering.label,
        }
    }

    /// Both endpoints are known.
    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}
