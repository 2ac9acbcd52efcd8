use std::sync::Arc;

use crate::{
    Config, Dag, DagflowError, Result,
    dag::{Binding, NameTable},
};

pub struct DagBuilder {
    config: Config,
    names: Option<Arc<dyn NameTable>>,
}

impl Default for DagBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            names: None,
        }
    }
}

impl DagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn vertex_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Self {
        self.config.vertex_prefix = prefix.into();
        self
    }

    /// name table consulted when resolving channel labels
    pub fn names(
        mut self,
        names: Arc<dyn NameTable>,
    ) -> Self {
        self.names = Some(names);
        self
    }

    pub fn binding(
        self,
        binding: Binding,
    ) -> Self {
        self.names(Arc::new(binding))
    }

    pub fn build(&self) -> Result<Dag> {
        if self.config.vertex_prefix.is_empty() {
            return Err(DagflowError::Config("vertex_prefix must not be empty".to_string()));
        }

        Ok(Dag::with_parts(self.config.clone(), self.names.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::ChannelHandle;

    #[test]
    fn test_build_default() {
        let dag = DagBuilder::new().build().unwrap();
        assert!(dag.is_empty());
        assert_eq!(dag.config(), &Config::default());
    }

    #[test]
    fn test_vertex_prefix() {
        let mut dag = DagBuilder::new().vertex_prefix("stage").build().unwrap();
        let id = dag.register_source("src", ChannelHandle::queue()).unwrap();
        assert_eq!(dag.vertex_name(id).as_deref(), Some("stage0"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(matches!(DagBuilder::new().vertex_prefix("").build(), Err(DagflowError::Config(_))));
    }

    #[test]
    fn test_binding() {
        let ch = ChannelHandle::queue();
        let mut binding = Binding::new();
        binding.set("input", ch.clone());

        let mut dag = DagBuilder::new().binding(binding).build().unwrap();
        dag.register_source("src", &ch).unwrap();
        dag.normalize().unwrap();

        assert_eq!(dag.find_edge(&ch).unwrap().label.as_deref(), Some("input"));
    }
}
