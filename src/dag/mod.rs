pub mod channel;
mod dag;
pub mod edge;
mod graph;
pub mod names;
mod normalize;
pub mod params;
pub mod vertex;

pub use channel::{ChannelHandle, ChannelHandler, ChannelKind, Channels};
pub use dag::Dag;
pub use edge::Edge;
pub use names::{Binding, NameTable};
pub use params::{InParam, OutParam, ParamKind};
pub use vertex::{Vertex, VertexId, VertexKind, VertexRef};
