mod fan;
pub use fan::{Fan, Fans};
mod mesh;
pub use mesh::TriangleMesh;
mod polygon;
pub use polygon::{SimplePolygon, VertexSource};
