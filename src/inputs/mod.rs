mod ring;
pub use ring::Ring;
pub(crate) use ring::ring_points;
mod vertex;
pub use vertex::Vertex;
