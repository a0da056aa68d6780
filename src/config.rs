use crate::math::Material;
use clap::Parser;
use glam::DVec3;

/// Animated 3D atom model rendered in the terminal
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Target frame rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Show name, version, rotation angles and measured FPS
    #[arg(short, long)]
    pub debug: bool,
}

/// Fixed pause after every presented frame, in milliseconds
pub const FRAME_DELAY_MS: u64 = 10;

/// Camera position, looking at the origin with +Y up
pub const CAMERA_EYE: DVec3 = DVec3::new(0.0, 0.0, -15.0);

pub const PROTON_RADIUS: f64 = 0.5;
pub const PROTON_SLICES: usize = 50;
pub const PROTON_STACKS: usize = 50;
pub const PROTON_POSITIONS: [DVec3; 2] = [DVec3::new(0.5, 0.0, 0.0), DVec3::new(-0.5, 0.0, 0.0)];

pub const NEUTRON_RADIUS: f64 = 0.5;
pub const NEUTRON_SLICES: usize = 30;
pub const NEUTRON_STACKS: usize = 30;
pub const NEUTRON_POSITIONS: [DVec3; 2] = [DVec3::new(0.0, 0.5, 0.0), DVec3::new(0.0, -0.5, 0.0)];

pub const ELECTRON_RADIUS: f64 = 0.3;
pub const ELECTRON_SLICES: usize = 20;
pub const ELECTRON_STACKS: usize = 20;
pub const ELECTRON_DISTANCE: f64 = 3.0;
/// Angular speed of the first electron in radians per second
pub const ELECTRON_SPEED: f64 = 4.0;
/// Added to the second electron's speed so the two drift out of phase
pub const ELECTRON_PHASE_OFFSET: f64 = 0.67;

const WHITE: [f64; 4] = [1.0, 1.0, 1.0, 1.0];
const SHININESS: f64 = 32.0;

pub const PROTON_MATERIAL: Material =
    Material::new([0.2, 0.0, 0.0, 1.0], [0.8, 0.0, 0.0, 1.0], WHITE, SHININESS);
pub const NEUTRON_MATERIAL: Material =
    Material::new([0.0, 0.0, 0.2, 1.0], [0.0, 0.0, 0.8, 1.0], WHITE, SHININESS);
pub const ELECTRON_MATERIAL: Material =
    Material::new([0.0, 0.2, 0.0, 1.0], [0.0, 0.8, 0.0, 1.0], WHITE, SHININESS);
