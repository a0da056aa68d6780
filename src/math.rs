use glam::{DVec3, DVec4};

/// Global ambient light intensity applied to every material
pub const GLOBAL_AMBIENT: f64 = 0.2;

/// Direction toward the viewer in eye space
const VIEWER_DIR: DVec3 = DVec3::Z;

/// Surface material used by the lighting model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: DVec4,
    pub diffuse: DVec4,
    pub specular: DVec4,
    pub shininess: f64,
}

impl Material {
    pub const fn new(ambient: [f64; 4], diffuse: [f64; 4], specular: [f64; 4], shininess: f64) -> Self {
        Material {
            ambient: DVec4::from_array(ambient),
            diffuse: DVec4::from_array(diffuse),
            specular: DVec4::from_array(specular),
            shininess,
        }
    }
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Shades a surface point lit by a white directional light.
///
/// `normal` and `light_dir` are eye-space and expected to be unit length.
pub fn shade(material: &Material, normal: DVec3, light_dir: DVec3) -> DVec4 {
    let ambient = material.ambient * GLOBAL_AMBIENT;

    let n_dot_l = normal.dot(light_dir);
    if n_dot_l <= 0.0 {
        return with_alpha(ambient, material.diffuse.w);
    }
    let diffuse = material.diffuse * n_dot_l;

    let half = (light_dir + VIEWER_DIR).normalize_or_zero();
    let n_dot_h = normal.dot(half).max(0.0);
    let specular = material.specular * n_dot_h.powf(material.shininess);

    with_alpha(ambient + diffuse + specular, material.diffuse.w)
}

fn with_alpha(color: DVec4, alpha: f64) -> DVec4 {
    DVec4::new(color.x, color.y, color.z, alpha)
}

/// Converts a floating point color into RGBA bytes
pub fn to_rgba8(color: DVec4) -> [u8; 4] {
    let c = color.clamp(DVec4::ZERO, DVec4::ONE) * 255.0;
    [
        c.x.round() as u8,
        c.y.round() as u8,
        c.z.round() as u8,
        c.w.round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Material = Material::new(
        [0.2, 0.0, 0.0, 1.0],
        [0.8, 0.0, 0.0, 1.0],
        [1.0, 1.0, 1.0, 1.0],
        32.0,
    );

    #[test]
    fn edge_function_sign_follows_winding() {
        let a = [0.0, 0.0];
        let b = [4.0, 0.0];
        let c = [0.0, 4.0];
        let inside = [1.0, 1.0];
        let area = edge_function(&a, &b, &c);
        assert!(area != 0.0);
        assert_eq!(edge_function(&a, &b, &inside).signum(), area.signum());
        assert_eq!(edge_function(&a, &c, &b), -area);
    }

    #[test]
    fn surface_facing_away_gets_only_ambient() {
        let color = shade(&RED, DVec3::NEG_Z, DVec3::Z);
        assert!((color.x - 0.2 * GLOBAL_AMBIENT).abs() < 1e-12);
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn surface_facing_light_gets_full_highlight() {
        let color = shade(&RED, DVec3::Z, DVec3::Z);
        // ambient + diffuse + specular on red, specular only on green/blue
        assert!((color.x - (0.04 + 0.8 + 1.0)).abs() < 1e-12);
        assert!((color.y - 1.0).abs() < 1e-12);
        assert_eq!(to_rgba8(color), [255, 255, 255, 255]);
    }

    #[test]
    fn rgba8_clamps_and_rounds() {
        assert_eq!(to_rgba8(DVec4::new(-1.0, 0.5, 2.0, 1.0)), [0, 128, 255, 255]);
    }
}
