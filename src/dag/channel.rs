//! Channel handles passed in by the stream runtime.
//!
//! A channel is only ever compared by identity: two handles refer to the same
//! channel when they point at the same allocation, whatever its content.

use std::{any::Any, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Category of a channel, supplied by the collaborator that created it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelKind {
    /// Single-producer, single-consumer queue.
    #[default]
    Queue,
    /// Single-assignment value, may be read by any number of consumers.
    Value,
}

/// Identity-comparable reference to a channel object.
///
/// Handles are cheap to clone. They deliberately do not implement `PartialEq`
/// or `Hash`: use [`ChannelHandle::same`] to compare identities.
#[derive(Clone)]
pub struct ChannelHandle {
    kind: ChannelKind,
    target: Arc<dyn Any + Send + Sync>,
}

impl ChannelHandle {
    /// Wraps a collaborator's channel object. The handle shares the identity of `target`.
    pub fn wrap<T: Any + Send + Sync>(
        kind: ChannelKind,
        target: Arc<T>,
    ) -> Self {
        Self {
            kind,
            target,
        }
    }

    /// Creates a handle for a fresh anonymous channel.
    pub fn new(kind: ChannelKind) -> Self {
        Self::wrap(kind, Arc::new(()))
    }

    /// Creates a fresh anonymous queue channel.
    pub fn queue() -> Self {
        Self::new(ChannelKind::Queue)
    }

    /// Creates a fresh anonymous value channel.
    pub fn value() -> Self {
        Self::new(ChannelKind::Value)
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// Whether the channel may feed more than one consumer.
    pub fn is_broadcast(&self) -> bool {
        self.kind == ChannelKind::Value
    }

    /// Reference identity comparison.
    pub fn same(
        &self,
        other: &ChannelHandle,
    ) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.target), Arc::as_ptr(&other.target))
    }

    /// Borrows the wrapped channel object if it has type `T`.
    pub fn target<T: Any>(&self) -> Option<&T> {
        self.target.downcast_ref::<T>()
    }
}

impl fmt::Debug for ChannelHandle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ChannelHandle").field("kind", &self.kind).field("addr", &Arc::as_ptr(&self.target).cast::<()>()).finish()
    }
}

/// A channel handle paired with the label it was declared with.
#[derive(Debug, Clone)]
pub struct ChannelHandler {
    pub channel: ChannelHandle,
    pub label: Option<String>,
}

impl ChannelHandler {
    pub fn new(channel: ChannelHandle) -> Self {
        Self {
            channel,
            label: None,
        }
    }

    pub fn labeled(
        channel: ChannelHandle,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            channel,
            label: if label.is_empty() { None } else { Some(label) },
        }
    }
}

/// Operator and source endpoints: nothing, a bare channel or a sequence of channels.
#[derive(Debug, Clone, Default)]
pub enum Channels {
    #[default]
    None,
    One(ChannelHandle),
    Many(Vec<ChannelHandle>),
}

impl Channels {
    pub fn is_empty(&self) -> bool {
        match self {
            Channels::None => true,
            Channels::One(_) => false,
            Channels::Many(channels) => channels.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Channels::None => 0,
            Channels::One(_) => 1,
            Channels::Many(channels) => channels.len(),
        }
    }

    /// Flattens into unlabeled handlers, preserving declaration order.
    pub(crate) fn into_handlers(self) -> Vec<ChannelHandler> {
        match self {
            Channels::None => Vec::new(),
            Channels::One(channel) => vec![ChannelHandler::new(channel)],
            Channels::Many(channels) => channels.into_iter().map(ChannelHandler::new).collect(),
        }
    }
}

impl From<ChannelHandle> for Channels {
    fn from(channel: ChannelHandle) -> Self {
        Channels::One(channel)
    }
}

impl From<&ChannelHandle> for Channels {
    fn from(channel: &ChannelHandle) -> Self {
        Channels::One(channel.clone())
    }
}

impl From<Option<ChannelHandle>> for Channels {
    fn from(channel: Option<ChannelHandle>) -> Self {
        channel.map(Channels::One).unwrap_or_default()
    }
}

impl From<Vec<ChannelHandle>> for Channels {
    fn from(channels: Vec<ChannelHandle>) -> Self {
        Channels::Many(channels)
    }
}

impl From<&[ChannelHandle]> for Channels {
    fn from(channels: &[ChannelHandle]) -> Self {
        Channels::Many(channels.to_vec())
    }
}

impl<const N: usize> From<[ChannelHandle; N]> for Channels {
    fn from(channels: [ChannelHandle; N]) -> Self {
        Channels::Many(channels.into())
    }
}
