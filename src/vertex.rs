use glam::DVec3;

/// Vertex of a mesh in model space, with its unit normal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: DVec3,
    pub normal: DVec3,
}

/// Vertex after the model-view and projection transforms
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    /// Eye-space normal
    pub normal: DVec3,
    pub screen_position: [f64; 2],
    /// Normalized device depth, -1 at the near plane and 1 at the far plane
    pub depth: f64,
}
