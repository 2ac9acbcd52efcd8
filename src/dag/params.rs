//! Input and output parameter lists declared by tasks.

use serde::{Deserialize, Serialize};

use crate::dag::channel::{ChannelHandle, ChannelHandler};

/// How a task parameter shows up in the graph.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ParamKind {
    /// Plain parameter, the edge is labeled with its name.
    #[default]
    Named,
    /// Set-style parameter grouping several values, left unlabeled.
    Set,
    /// Implicit no-op parameter, not represented in the graph.
    Default,
}

/// Task input parameter.
#[derive(Debug, Clone)]
pub struct InParam {
    pub name: String,
    pub kind: ParamKind,
    pub channel: ChannelHandle,
}

impl InParam {
    pub fn named(
        name: impl Into<String>,
        channel: ChannelHandle,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Named,
            channel,
        }
    }

    pub fn set(
        name: impl Into<String>,
        channel: ChannelHandle,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Set,
            channel,
        }
    }

    pub fn noop(channel: ChannelHandle) -> Self {
        Self {
            name: String::new(),
            kind: ParamKind::Default,
            channel,
        }
    }
}

/// Task output parameter, may emit on several channels.
#[derive(Debug, Clone)]
pub struct OutParam {
    pub name: String,
    pub kind: ParamKind,
    pub channels: Vec<ChannelHandle>,
}

impl OutParam {
    pub fn named(
        name: impl Into<String>,
        channels: Vec<ChannelHandle>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Named,
            channels,
        }
    }

    pub fn set(
        name: impl Into<String>,
        channels: Vec<ChannelHandle>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Set,
            channels,
        }
    }

    pub fn noop(channels: Vec<ChannelHandle>) -> Self {
        Self {
            name: String::new(),
            kind: ParamKind::Default,
            channels,
        }
    }
}

fn param_label(
    name: &str,
    kind: ParamKind,
) -> Option<String> {
    match kind {
        ParamKind::Named if !name.is_empty() => Some(name.to_string()),
        _ => None,
    }
}

pub(crate) fn inbound_handlers(params: &[InParam]) -> Vec<ChannelHandler> {
    params
        .iter()
        .filter(|p| p.kind != ParamKind::Default)
        .map(|p| ChannelHandler {
            channel: p.channel.clone(),
            label: param_label(&p.name, p.kind),
        })
        .collect()
}

pub(crate) fn outbound_handlers(params: &[OutParam]) -> Vec<ChannelHandler> {
    params
        .iter()
        .filter(|p| p.kind != ParamKind::Default)
        .flat_map(|p| {
            p.channels.iter().map(move |channel| ChannelHandler {
                channel: channel.clone(),
                label: param_label(&p.name, p.kind),
            })
        })
        .collect()
}
