//! Name tables used to give anonymous channels a readable label.

use std::collections::BTreeMap;

use crate::dag::channel::ChannelHandle;

/// External mapping of names to channels.
///
/// Lookups go from channel to name and compare channels by identity. When
/// several names point at the same channel the first entry wins.
pub trait NameTable: Send + Sync {
    /// Iterates the `(name, channel)` entries in lookup order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &ChannelHandle)> + '_>;

    /// Finds the name bound to `channel`.
    fn lookup(
        &self,
        channel: &ChannelHandle,
    ) -> Option<String> {
        self.entries().find(|(_, bound)| bound.same(channel)).map(|(name, _)| name.to_string())
    }
}

/// Insertion-ordered name table.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    variables: Vec<(String, ChannelHandle)>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing a previous binding of the same name in place.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        channel: ChannelHandle,
    ) {
        let name = name.into();
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = channel,
            None => self.variables.push((name, channel)),
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&ChannelHandle> {
        self.variables.iter().find(|(n, _)| n == name).map(|(_, channel)| channel)
    }

    pub fn remove(
        &mut self,
        name: &str,
    ) -> Option<ChannelHandle> {
        let pos = self.variables.iter().position(|(n, _)| n == name)?;
        Some(self.variables.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl NameTable for Binding {
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &ChannelHandle)> + '_> {
        Box::new(self.variables.iter().map(|(name, channel)| (name.as_str(), channel)))
    }
}

impl NameTable for BTreeMap<String, ChannelHandle> {
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &ChannelHandle)> + '_> {
        Box::new(self.iter().map(|(name, channel)| (name.as_str(), channel)))
    }
}

impl<S: Into<String>> FromIterator<(S, ChannelHandle)> for Binding {
    fn from_iter<I: IntoIterator<Item = (S, ChannelHandle)>>(iter: I) -> Self {
        let mut binding = Binding::new();
        for (name, channel) in iter {
            binding.set(name, channel);
        }
        binding
    }
}
