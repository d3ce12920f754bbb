use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: [f32; 2], // (x, y) in map-cell units
    pub yaw: f32,      // radians, unbounded; wrap only for display
}

impl Camera {
    pub fn new(x: f32, y: f32, yaw: f32) -> Self {
        Self { pos: [x, y], yaw }
    }

    /// Angle of the ray through screen column `column` of `hres`, spread
    /// evenly across `[yaw - fov/2, yaw + fov/2)`.
    #[inline]
    pub fn ray_angle(&self, column: usize, hres: usize, fov_deg: f32) -> f32 {
        self.yaw + column_offset(column, hres, fov_deg)
    }

    /// Heading in degrees, wrapped to [0, 360).
    pub fn heading_degrees(&self) -> f32 {
        self.yaw.rem_euclid(TAU).to_degrees()
    }

    /// Grid cell the camera stands in.
    #[inline]
    pub fn cell(&self) -> Option<(usize, usize)> {
        crate::map::cell_of(self.pos[0], self.pos[1])
    }
}

/// Angle between the central ray and the ray of `column`, in radians.
#[inline]
pub fn column_offset(column: usize, hres: usize, fov_deg: f32) -> f32 {
    (column as f32 / hres as f32 * fov_deg - 0.5 * fov_deg).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_angles_span_fov() {
        let hres = 120;
        let fov = 60.0f32;
        for yaw in [0.0f32, 1.3, -2.9, 10.0] {
            let cam = Camera::new(2.0, 2.0, yaw);
            let first = cam.ray_angle(0, hres, fov);
            let last = cam.ray_angle(hres - 1, hres, fov);
            let step = (fov / hres as f32).to_radians();
            assert!((first - (yaw - fov.to_radians() / 2.0)).abs() < 1e-5);
            // half-open range: one step short of the right edge
            assert!((last + step - (yaw + fov.to_radians() / 2.0)).abs() < 1e-5);
            // symmetric about the heading once the half-open step is accounted for
            assert!(((yaw - first) - (last + step - yaw)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_heading_wraps_for_display() {
        let cam = Camera::new(0.0, 0.0, -std::f32::consts::FRAC_PI_2);
        assert!((cam.heading_degrees() - 270.0).abs() < 1e-3);
        let cam = Camera::new(0.0, 0.0, 5.0 * TAU + 0.5);
        assert!((cam.heading_degrees() - 0.5f32.to_degrees()).abs() < 1e-2);
    }
}
