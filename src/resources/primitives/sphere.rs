use glam::Vec3;
use std::f32::consts::PI;

use crate::resources::geometry::Geometry;

/// Ellipsoid stand-in for an elongated body mesh, long axis along Y.
pub struct EllipsoidOptions {
    pub center: Vec3,
    pub radii: Vec3,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for EllipsoidOptions {
    /// Spans y in [-10, 25], the range the reference banding expects.
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 7.5, 0.0),
            radii: Vec3::new(3.0, 17.5, 2.5),
            width_segments: 24,
            height_segments: 32,
        }
    }
}

#[must_use]
pub fn create_ellipsoid(options: &EllipsoidOptions) -> Geometry {
    let radii = options.radii;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=height_segments {
        let v_ratio = y as f32 / height_segments as f32;
        // Latitude: 0 at the bottom pole, PI at the top
        let theta = v_ratio * PI;
        let unit_y = -theta.cos();
        let ring = theta.sin();

        for x in 0..=width_segments {
            let u_ratio = x as f32 / width_segments as f32;
            let phi = u_ratio * 2.0 * PI;

            let unit = Vec3::new(-ring * phi.cos(), unit_y, ring * phi.sin());
            positions.push(options.center + unit * radii);
            // Gradient of the implicit surface
            normals.push((unit / radii).normalize_or(Vec3::Y));
        }
    }

    let stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = (y + 1) * stride + x;
            let v3 = v2 + 1;

            indices.extend_from_slice(&[v0, v1, v2, v1, v3, v2]);
        }
    }

    let mut geo = Geometry::from_positions(positions);
    geo.normals = normals;
    geo.set_indices(indices);
    geo
}
