//! Immediate-mode rendering context.
//!
//! Holds the back buffer, the projection, the model-view matrix stack and
//! the lighting state. Matrix pushes and lighting are scoped by guards that
//! restore the previous state when dropped.

use crate::error::ContextError;
use crate::graphics::{draw_line, draw_triangle, FrameBuffer, Shading};
use crate::math::Material;
use crate::vertex::{MeshVertex, Vertex};
use glam::{DMat3, DMat4, DVec3, DVec4};
use log::debug;
use std::ops::{Deref, DerefMut};

/// Vertical field of view in degrees
pub const FIELD_OF_VIEW: f64 = 45.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 50.0;

/// Light 0 shines along the viewing axis toward the viewer, in eye space
const LIGHT0_DIRECTION: DVec3 = DVec3::Z;

pub struct RenderContext {
    frame: FrameBuffer,
    projection: DMat4,
    /// Never empty, the last entry is the current model-view matrix
    matrix_stack: Vec<DMat4>,
    lighting: Option<Material>,
    color: DVec4,
}

impl RenderContext {
    /// Creates a back buffer of `width` x `height` pixels with a perspective
    /// projection and depth testing.
    pub fn new(width: usize, height: usize) -> Result<Self, ContextError> {
        if width == 0 || height == 0 {
            return Err(ContextError::InvalidDimensions { width, height });
        }

        let aspect = width as f64 / height as f64;
        let projection =
            DMat4::perspective_rh_gl(FIELD_OF_VIEW.to_radians(), aspect, NEAR_PLANE, FAR_PLANE);
        debug!("render context {width}x{height}, aspect {aspect:.3}");

        Ok(RenderContext {
            frame: FrameBuffer::new(width, height),
            projection,
            matrix_stack: vec![DMat4::IDENTITY],
            lighting: None,
            color: DVec4::ONE,
        })
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Clears the color and depth buffers
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Current model-view matrix
    pub fn modelview(&self) -> DMat4 {
        *self.top()
    }

    fn top(&self) -> &DMat4 {
        self.matrix_stack.last().unwrap_or(&DMat4::IDENTITY)
    }

    fn top_mut(&mut self) -> &mut DMat4 {
        if self.matrix_stack.is_empty() {
            self.matrix_stack.push(DMat4::IDENTITY);
        }
        let last = self.matrix_stack.len() - 1;
        &mut self.matrix_stack[last]
    }

    fn multiply(&mut self, transform: DMat4) {
        let top = self.top_mut();
        *top = *top * transform;
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = DMat4::IDENTITY;
    }

    /// Multiplies the current matrix by a viewing transform
    pub fn look_at(&mut self, eye: DVec3, target: DVec3, up: DVec3) {
        self.multiply(DMat4::look_at_rh(eye, target, up));
    }

    /// Multiplies the current matrix by a rotation of `degrees` around `axis`
    pub fn rotate(&mut self, degrees: f64, axis: DVec3) {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return;
        }
        self.multiply(DMat4::from_axis_angle(axis, degrees.to_radians()));
    }

    pub fn translate(&mut self, offset: DVec3) {
        self.multiply(DMat4::from_translation(offset));
    }

    /// Saves the current matrix; it is restored when the guard drops
    pub fn push_matrix(&mut self) -> MatrixGuard<'_> {
        let current = *self.top();
        self.matrix_stack.push(current);
        MatrixGuard { ctx: self }
    }

    /// Enables light 0 with `material` for the lifetime of the guard
    pub fn lighting(&mut self, material: &Material) -> LightingGuard<'_> {
        let previous = self.lighting.replace(*material);
        LightingGuard {
            ctx: self,
            previous,
        }
    }

    pub fn is_lighting_enabled(&self) -> bool {
        self.lighting.is_some()
    }

    /// Sets the flat color used while lighting is disabled
    pub fn set_color(&mut self, color: DVec4) {
        self.color = color;
    }

    fn shading(&self) -> Shading {
        match self.lighting {
            Some(material) => Shading::Lit {
                material,
                light_dir: LIGHT0_DIRECTION,
            },
            None => Shading::Flat(self.color),
        }
    }

    /// Transforms a model-space point to screen space, `None` when it falls
    /// outside the depth range.
    fn project(&self, modelview: &DMat4, normal_matrix: &DMat3, vertex: &MeshVertex) -> Option<Vertex> {
        let eye = *modelview * vertex.position.extend(1.0);
        let clip = self.projection * eye;
        if clip.w <= f64::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let width = self.frame.width() as f64;
        let height = self.frame.height() as f64;
        Some(Vertex {
            normal: (*normal_matrix * vertex.normal).normalize_or_zero(),
            screen_position: [(ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height],
            depth: ndc.z,
        })
    }

    fn normal_matrix(modelview: &DMat4) -> DMat3 {
        let linear = DMat3::from_mat4(*modelview);
        if linear.determinant().abs() <= f64::EPSILON {
            return linear;
        }
        linear.inverse().transpose()
    }

    /// Draws a triangle strip; each vertex after the second closes a
    /// triangle with the previous two.
    pub fn draw_triangle_strip(&mut self, vertices: &[MeshVertex]) {
        let modelview = self.modelview();
        let normal_matrix = Self::normal_matrix(&modelview);
        let shading = self.shading();

        let projected: Vec<Option<Vertex>> = vertices
            .iter()
            .map(|vertex| self.project(&modelview, &normal_matrix, vertex))
            .collect();

        for window in projected.windows(3) {
            if let [Some(v0), Some(v1), Some(v2)] = window {
                draw_triangle(v0, v1, v2, &mut self.frame, &shading);
            }
        }
    }

    /// Draws a closed polyline in the current flat color. Lines are never lit.
    pub fn draw_line_loop(&mut self, points: &[DVec3]) {
        let modelview = self.modelview();
        let color = self.color;

        let projected: Vec<Option<Vertex>> = points
            .iter()
            .map(|&position| {
                let vertex = MeshVertex {
                    position,
                    normal: DVec3::Z,
                };
                self.project(&modelview, &DMat3::IDENTITY, &vertex)
            })
            .collect();

        let count = projected.len();
        if count < 2 {
            return;
        }
        for i in 0..count {
            if let (Some(v0), Some(v1)) = (&projected[i], &projected[(i + 1) % count]) {
                draw_line(v0, v1, &mut self.frame, color);
            }
        }
    }
}

/// Restores the model-view matrix saved by [`RenderContext::push_matrix`]
pub struct MatrixGuard<'a> {
    ctx: &'a mut RenderContext,
}

impl Deref for MatrixGuard<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.ctx
    }
}

impl DerefMut for MatrixGuard<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        self.ctx
    }
}

impl Drop for MatrixGuard<'_> {
    fn drop(&mut self) {
        if self.ctx.matrix_stack.len() > 1 {
            self.ctx.matrix_stack.pop();
        }
    }
}

/// Keeps lighting enabled until dropped
pub struct LightingGuard<'a> {
    ctx: &'a mut RenderContext,
    previous: Option<Material>,
}

impl Deref for LightingGuard<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.ctx
    }
}

impl DerefMut for LightingGuard<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        self.ctx
    }
}

impl Drop for LightingGuard<'_> {
    fn drop(&mut self) {
        self.ctx.lighting = self.previous.take();
    }
}
