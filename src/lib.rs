//! # Dagflow
//!
//! Dagflow models the execution graph of a dataflow pipeline: vertices are the
//! stages of the pipeline (tasks, operators and sources) and edges are the
//! channels connecting them.
//!
//! ## Core Features
//!
//! - **Order-independent declaration**: stages can be registered in any order, an
//!   edge is created the first time its channel is seen from either side
//! - **Channel discipline**: a queue channel has one producer and one consumer,
//!   value channels may be read by any number of consumers
//! - **Normalization**: dangling edges are completed with placeholder vertices and
//!   channels are labeled from an external name table
//! - **Read-only views**: borrowed accessors, a serializable snapshot and a petgraph view
//!
//! ## Quick Start
//!
//! ```rust
//! use dagflow::{ChannelHandle, Channels, DagBuilder, InParam, OutParam};
//!
//! let c1 = ChannelHandle::queue();
//! let c2 = ChannelHandle::queue();
//!
//! let mut dag = DagBuilder::new().build()?;
//! dag.register_source("src", &c1)?;
//! dag.register_task("proc", &[InParam::named("x", c1.clone())], &[OutParam::named("y", vec![c2.clone()])])?;
//! dag.register_operator("view", &c2, Channels::None)?;
//! dag.normalize()?;
//!
//! assert_eq!(dag.vertices().len(), 3);
//! assert_eq!(dag.edges().len(), 2);
//! # Ok::<(), dagflow::DagflowError>(())
//! ```

mod builder;
mod config;
mod dag;
mod error;
mod model;

pub use builder::DagBuilder;
pub use config::Config;
pub use dag::*;
pub use error::DagflowError;
pub use model::*;

/// Result type alias for Dagflow operations.
pub type Result<T> = std::result::Result<T, DagflowError>;
