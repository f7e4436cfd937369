/// Point indices of a triangle fan; the first index is the apex shared by every triangle
pub trait Fan<V> {
    /// A fan made of the single triangle `v0 v1 v2`
    fn new(v0: V, v1: V, v2: V) -> Self;

    /// Extend the fan by the triangle closing the last edge with `v`
    fn push(&mut self, v: V);
}

impl<V> Fan<V> for Vec<V> {
    fn new(v0: V, v1: V, v2: V) -> Self {
        vec![v0, v1, v2]
    }

    fn push(&mut self, v: V) {
        Vec::push(self, v)
    }
}

/// Sink for the fans written by [TriangleMesh::write_fans](crate::TriangleMesh::write_fans)
pub trait Fans {
    type Fan;

    fn push(&mut self, fan: Self::Fan);
}

impl<F> Fans for Vec<F> {
    type Fan = F;

    fn push(&mut self, fan: F) {
        Vec::push(self, fan)
    }
}

impl<FS: Fans> Fans for &mut FS {
    type Fan = FS::Fan;

    fn push(&mut self, fan: FS::Fan) {
        (**self).push(fan)
    }
}
