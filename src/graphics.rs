use crate::math::{edge_function, shade, to_rgba8, Material};
use crate::vertex::Vertex;
use glam::{DVec3, DVec4};

/// Color and depth buffers of the back buffer
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixel_data: Vec<u8>,
    z_buffer: Vec<f64>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            pixel_data: vec![0u8; width * height * 4],
            z_buffer: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Clears color to opaque black and depth to infinity
    pub fn clear(&mut self) {
        for pixel in self.pixel_data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }
        self.z_buffer.fill(f64::INFINITY);
    }

    /// RGBA color of the pixel at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        [
            self.pixel_data[offset],
            self.pixel_data[offset + 1],
            self.pixel_data[offset + 2],
            self.pixel_data[offset + 3],
        ]
    }

    /// Writes a fragment if it passes the depth test
    fn plot(&mut self, x: usize, y: usize, depth: f64, color: [u8; 4]) -> bool {
        let offset = y * self.width + x;
        if depth >= self.z_buffer[offset] {
            return false;
        }
        self.z_buffer[offset] = depth;
        self.pixel_data[offset * 4..offset * 4 + 4].copy_from_slice(&color);
        true
    }
}

/// How fragments of a primitive get their color
#[derive(Clone, Copy, Debug)]
pub enum Shading {
    /// Per-pixel lighting from a directional light in eye space
    Lit { material: Material, light_dir: DVec3 },
    /// Constant color, lighting disabled
    Flat(DVec4),
}

/// Draws a triangle with per-pixel lighting and depth testing.
///
/// Both windings are filled.
pub fn draw_triangle(v0: &Vertex, v1: &Vertex, v2: &Vertex, frame: &mut FrameBuffer, shading: &Shading) {
    let width = frame.width;
    let height = frame.height;
    if width == 0 || height == 0 {
        return;
    }

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0);
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0);
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(height as f64 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area == 0.0 {
        return;
    }

    let flat_color = match shading {
        Shading::Flat(color) => Some(to_rgba8(*color)),
        Shading::Lit { .. } => None,
    };

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Dividing by the signed area makes the weights positive inside for either winding
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            let color = match (flat_color, shading) {
                (Some(color), _) => color,
                (None, Shading::Lit { material, light_dir }) => {
                    let normal = (v0.normal * w0 + v1.normal * w1 + v2.normal * w2).normalize_or_zero();
                    to_rgba8(shade(material, normal, *light_dir))
                }
                (None, Shading::Flat(color)) => to_rgba8(*color),
            };
            frame.plot(x, y, depth, color);
        }
    }
}

/// Draws a depth-tested line between two points using Bresenham's algorithm
pub fn draw_line(v0: &Vertex, v1: &Vertex, frame: &mut FrameBuffer, color: DVec4) {
    let width = frame.width as isize;
    let height = frame.height as isize;
    let rgba = to_rgba8(color);

    let (mut x0, mut y0, x1, y1) = (
        v0.screen_position[0].floor() as isize,
        v0.screen_position[1].floor() as isize,
        v1.screen_position[0].floor() as isize,
        v1.screen_position[1].floor() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    let steps = dx.max(-dy).max(1) as f64;
    let mut step = 0.0;

    loop {
        if x0 >= 0 && x0 < width && y0 >= 0 && y0 < height {
            let t = (step / steps).min(1.0);
            let depth = v0.depth + (v1.depth - v0.depth) * t;
            frame.plot(x0 as usize, y0 as usize, depth, rgba);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
        step += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64, depth: f64) -> Vertex {
        Vertex {
            normal: DVec3::Z,
            screen_position: [x, y],
            depth,
        }
    }

    const WHITE: DVec4 = DVec4::ONE;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.plot(0, 0, 0.5, [9, 9, 9, 255]);
        frame.clear();
        assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
        assert!(frame.plot(0, 0, 0.9, [1, 1, 1, 255]));
    }

    #[test]
    fn triangles_fill_for_both_windings() {
        let a = vertex(0.0, 0.0, 0.0);
        let b = vertex(8.0, 0.0, 0.0);
        let c = vertex(0.0, 8.0, 0.0);

        let mut clockwise = FrameBuffer::new(8, 8);
        draw_triangle(&a, &b, &c, &mut clockwise, &Shading::Flat(WHITE));
        let mut counter_clockwise = FrameBuffer::new(8, 8);
        draw_triangle(&a, &c, &b, &mut counter_clockwise, &Shading::Flat(WHITE));

        assert_eq!(clockwise.pixel(1, 1), [255, 255, 255, 255]);
        assert_eq!(counter_clockwise.pixel(1, 1), [255, 255, 255, 255]);
        // Outside the hypotenuse
        assert_eq!(clockwise.pixel(7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn nearer_fragment_wins_regardless_of_order() {
        let red = DVec4::new(1.0, 0.0, 0.0, 1.0);
        let blue = DVec4::new(0.0, 0.0, 1.0, 1.0);
        let near = [vertex(0.0, 0.0, 0.1), vertex(8.0, 0.0, 0.1), vertex(0.0, 8.0, 0.1)];
        let far = [vertex(0.0, 0.0, 0.5), vertex(8.0, 0.0, 0.5), vertex(0.0, 8.0, 0.5)];

        let mut frame = FrameBuffer::new(8, 8);
        draw_triangle(&near[0], &near[1], &near[2], &mut frame, &Shading::Flat(red));
        draw_triangle(&far[0], &far[1], &far[2], &mut frame, &Shading::Flat(blue));
        assert_eq!(frame.pixel(1, 1), [255, 0, 0, 255]);
    }

    #[test]
    fn lit_triangle_uses_material() {
        let material = Material::new(
            [0.0, 0.0, 0.2, 1.0],
            [0.0, 0.0, 0.8, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            32.0,
        );
        let shading = Shading::Lit {
            material,
            light_dir: DVec3::Z,
        };
        let mut frame = FrameBuffer::new(4, 4);
        draw_triangle(
            &vertex(0.0, 0.0, 0.0),
            &vertex(4.0, 0.0, 0.0),
            &vertex(0.0, 4.0, 0.0),
            &mut frame,
            &shading,
        );
        // 0.2 * 0.2 + 0.8 = 0.84 of full blue
        assert_eq!(frame.pixel(0, 0), [0, 0, 214, 255]);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut frame = FrameBuffer::new(10, 10);
        draw_line(&vertex(1.5, 1.5, 0.0), &vertex(8.5, 5.5, 0.0), &mut frame, WHITE);
        assert_eq!(frame.pixel(1, 1), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(8, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn line_is_clipped_to_the_buffer() {
        let mut frame = FrameBuffer::new(4, 4);
        draw_line(&vertex(-5.0, 2.0, 0.0), &vertex(10.0, 2.0, 0.0), &mut frame, WHITE);
        for x in 0..4 {
            assert_eq!(frame.pixel(x, 2), [255, 255, 255, 255]);
        }
    }
}
