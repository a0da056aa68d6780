//! The atom: two protons and two neutrons in the nucleus, two electrons on
//! perpendicular orbits, viewed by a continuously rotating camera.

use crate::config::{
    CAMERA_EYE, ELECTRON_DISTANCE, ELECTRON_MATERIAL, ELECTRON_PHASE_OFFSET, ELECTRON_RADIUS,
    ELECTRON_SLICES, ELECTRON_SPEED, ELECTRON_STACKS, NEUTRON_MATERIAL, NEUTRON_POSITIONS,
    NEUTRON_RADIUS, NEUTRON_SLICES, NEUTRON_STACKS, PROTON_MATERIAL, PROTON_POSITIONS,
    PROTON_RADIUS, PROTON_SLICES, PROTON_STACKS,
};
use crate::context::RenderContext;
use crate::error::GeometryError;
use crate::math::Material;
use crate::orbit::{draw_orbit_path, electron_position, OrbitPath, OrbitPlane};
use crate::sphere::{draw_solid_sphere, SphereMesh};
use crate::state::SceneState;
use glam::DVec3;
use log::debug;

/// Electron circling the nucleus
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Electron {
    pub plane: OrbitPlane,
    /// Radians per second
    pub speed: f64,
}

impl Electron {
    pub fn position(&self, elapsed: f64) -> DVec3 {
        electron_position(elapsed, ELECTRON_DISTANCE, self.speed, self.plane)
    }
}

pub struct Scene {
    proton_mesh: SphereMesh,
    neutron_mesh: SphereMesh,
    electron_mesh: SphereMesh,
    orbits: [OrbitPath; 2],
    electrons: [Electron; 2],
}

impl Scene {
    /// Tessellates the particle meshes and orbit paths
    pub fn new() -> Result<Self, GeometryError> {
        let proton_mesh = SphereMesh::new(PROTON_RADIUS, PROTON_SLICES, PROTON_STACKS)?;
        let neutron_mesh = SphereMesh::new(NEUTRON_RADIUS, NEUTRON_SLICES, NEUTRON_STACKS)?;
        let electron_mesh = SphereMesh::new(ELECTRON_RADIUS, ELECTRON_SLICES, ELECTRON_STACKS)?;
        let orbits = [
            OrbitPath::new(ELECTRON_DISTANCE, OrbitPlane::XY)?,
            OrbitPath::new(ELECTRON_DISTANCE, OrbitPlane::XZ)?,
        ];
        let electrons = [
            Electron {
                plane: OrbitPlane::XY,
                speed: ELECTRON_SPEED,
            },
            Electron {
                plane: OrbitPlane::XZ,
                speed: ELECTRON_SPEED + ELECTRON_PHASE_OFFSET,
            },
        ];

        let vertex_count: usize = [&proton_mesh, &neutron_mesh, &electron_mesh]
            .iter()
            .map(|mesh| mesh.strips().iter().map(Vec::len).sum::<usize>())
            .sum();
        debug!("scene tessellated: {vertex_count} sphere vertices");

        Ok(Scene {
            proton_mesh,
            neutron_mesh,
            electron_mesh,
            orbits,
            electrons,
        })
    }

    pub fn electrons(&self) -> &[Electron; 2] {
        &self.electrons
    }

    /// Renders one frame into the back buffer
    pub fn draw(&self, ctx: &mut RenderContext, state: &SceneState, elapsed: f64) {
        ctx.clear();
        ctx.load_identity();
        ctx.look_at(CAMERA_EYE, DVec3::ZERO, DVec3::Y);

        ctx.rotate(state.rotation_x, DVec3::X);
        ctx.rotate(state.rotation_y, DVec3::Y);

        for position in PROTON_POSITIONS {
            draw_particle(ctx, &self.proton_mesh, &PROTON_MATERIAL, position);
        }
        for position in NEUTRON_POSITIONS {
            draw_particle(ctx, &self.neutron_mesh, &NEUTRON_MATERIAL, position);
        }

        for orbit in &self.orbits {
            draw_orbit_path(ctx, orbit);
        }

        for electron in self.electrons() {
            draw_particle(ctx, &self.electron_mesh, &ELECTRON_MATERIAL, electron.position(elapsed));
        }
    }
}

fn draw_particle(ctx: &mut RenderContext, mesh: &SphereMesh, material: &Material, position: DVec3) {
    let mut pushed = ctx.push_matrix();
    pushed.translate(position);
    draw_solid_sphere(&mut pushed, mesh, material);
}
