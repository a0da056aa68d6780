use crate::context::RenderContext;
use crate::error::GeometryError;
use glam::{DVec3, DVec4};

/// Number of samples in an orbit path, one per degree with 360 repeating 0
pub const ORBIT_SAMPLES: usize = 361;

/// Coordinate plane an orbit lies in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitPlane {
    XY,
    XZ,
}

impl OrbitPlane {
    /// Point at `angle` radians on a circle of `radius` in this plane
    pub fn point(self, radius: f64, angle: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        match self {
            OrbitPlane::XY => DVec3::new(radius * cos, radius * sin, 0.0),
            OrbitPlane::XZ => DVec3::new(radius * cos, 0.0, radius * sin),
        }
    }
}

/// Position of an electron after `elapsed` seconds on a circular orbit.
///
/// The phase is `elapsed * speed` radians, so every electron starts at
/// `(distance, 0, 0)`.
pub fn electron_position(elapsed: f64, distance: f64, speed: f64, plane: OrbitPlane) -> DVec3 {
    plane.point(distance, elapsed * speed)
}

/// Static circular polyline drawn as a visual guide for an orbit
#[derive(Clone, Debug)]
pub struct OrbitPath {
    points: Vec<DVec3>,
}

impl OrbitPath {
    pub fn new(radius: f64, plane: OrbitPlane) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        let points = (0..ORBIT_SAMPLES)
            .map(|degrees| plane.point(radius, (degrees as f64).to_radians()))
            .collect();

        Ok(OrbitPath { points })
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }
}

/// Draws the orbit as a flat white loop
pub fn draw_orbit_path(ctx: &mut RenderContext, path: &OrbitPath) {
    let mut pushed = ctx.push_matrix();
    pushed.set_color(DVec4::ONE);
    pushed.draw_line_loop(path.points());
}
