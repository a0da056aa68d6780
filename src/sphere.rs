use crate::context::RenderContext;
use crate::error::GeometryError;
use crate::math::Material;
use crate::vertex::MeshVertex;
use glam::DVec3;
use std::f64::consts::PI;

/// Sphere tessellated into latitude bands of triangle strips
#[derive(Clone, Debug)]
pub struct SphereMesh {
    strips: Vec<Vec<MeshVertex>>,
}

impl SphereMesh {
    /// Builds `stacks` bands from the south pole to the north pole, each a
    /// strip of `slices + 1` lower/upper vertex pairs so the seam closes.
    pub fn new(radius: f64, slices: usize, stacks: usize) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        if slices < 3 {
            return Err(GeometryError::TooFewSlices(slices));
        }
        if stacks < 1 {
            return Err(GeometryError::TooFewStacks(stacks));
        }

        let strips = (0..stacks)
            .map(|i| {
                let lat0 = PI * (-0.5 + i as f64 / stacks as f64);
                let lat1 = PI * (-0.5 + (i + 1) as f64 / stacks as f64);
                let (z0, zr0) = lat0.sin_cos();
                let (z1, zr1) = lat1.sin_cos();

                let mut strip = Vec::with_capacity(2 * (slices + 1));
                for j in 0..=slices {
                    let lng = 2.0 * PI * j as f64 / slices as f64;
                    let (y, x) = lng.sin_cos();

                    let lower = DVec3::new(x * zr0, y * zr0, z0);
                    let upper = DVec3::new(x * zr1, y * zr1, z1);
                    strip.push(MeshVertex {
                        position: lower * radius,
                        normal: lower,
                    });
                    strip.push(MeshVertex {
                        position: upper * radius,
                        normal: upper,
                    });
                }
                strip
            })
            .collect();

        Ok(SphereMesh { strips })
    }

    /// One triangle strip per latitude band
    pub fn strips(&self) -> &[Vec<MeshVertex>] {
        &self.strips
    }
}

/// Draws a lit sphere at the current origin. Lighting is turned off again
/// before returning.
pub fn draw_solid_sphere(ctx: &mut RenderContext, mesh: &SphereMesh, material: &Material) {
    let mut lit = ctx.lighting(material);
    for strip in mesh.strips() {
        lit.draw_triangle_strip(strip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_layout_matches_resolution() {
        let mesh = SphereMesh::new(0.5, 50, 50).unwrap();
        assert_eq!(mesh.strips().len(), 50);
        for strip in mesh.strips() {
            assert_eq!(strip.len(), 2 * (50 + 1));
        }
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = SphereMesh::new(0.3, 20, 20).unwrap();
        for vertex in mesh.strips().iter().flatten() {
            assert!((vertex.position.length() - 0.3).abs() < 1e-12);
            assert!((vertex.normal.length() - 1.0).abs() < 1e-12);
            assert!((vertex.normal * 0.3 - vertex.position).length() < 1e-12);
        }
    }

    #[test]
    fn bands_meet_without_gaps() {
        let mesh = SphereMesh::new(1.0, 8, 6).unwrap();
        let strips = mesh.strips();
        // Upper ring of each band is the lower ring of the next one
        for pair in strips.windows(2) {
            for j in 0..=8 {
                let upper = pair[0][2 * j + 1].position;
                let lower = pair[1][2 * j].position;
                assert!((upper - lower).length() < 1e-12);
            }
        }
        // Seam closes: last pair repeats the first
        for strip in strips {
            assert!((strip[0].position - strip[2 * 8].position).length() < 1e-12);
        }
        assert!((strips[0][0].position.z + 1.0).abs() < 1e-12);
        assert!((strips[5][1].position.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(SphereMesh::new(1.0, 2, 4).unwrap_err(), GeometryError::TooFewSlices(2));
        assert_eq!(SphereMesh::new(1.0, 3, 0).unwrap_err(), GeometryError::TooFewStacks(0));
        assert_eq!(SphereMesh::new(0.0, 3, 1).unwrap_err(), GeometryError::InvalidRadius(0.0));
        assert!(SphereMesh::new(f64::NAN, 3, 1).is_err());
    }

    #[test]
    fn drawing_leaves_lighting_disabled() {
        let mut ctx = RenderContext::new(40, 40).unwrap();
        ctx.load_identity();
        ctx.look_at(DVec3::new(0.0, 0.0, -15.0), DVec3::ZERO, DVec3::Y);
        ctx.clear();

        let mesh = SphereMesh::new(2.0, 12, 12).unwrap();
        let material = Material::new(
            [0.2, 0.0, 0.0, 1.0],
            [0.8, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            32.0,
        );
        draw_solid_sphere(&mut ctx, &mesh, &material);

        assert!(!ctx.is_lighting_enabled());
        let [r, g, b, _] = ctx.frame().pixel(20, 20);
        assert!(r > 0);
        assert_eq!(g, b);
    }
}
