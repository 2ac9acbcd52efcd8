mod dag;
mod edge;
mod vertex;

pub use dag::DagModel;
pub use edge::EdgeModel;
pub use vertex::VertexModel;
