//! Wall raycasting: one marched ray per screen column.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::map::{Map, Rgb};

/// Result of marching one column's ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Depth along the view direction; infinite on a miss.
    pub perp_distance: f32,
    /// Euclidean distance travelled by the ray; infinite on a miss.
    pub raw_distance: f32,
    /// Cell color after distance falloff.
    pub color: Rgb,
    /// Cell that stopped the ray, `None` when the cutoff was reached.
    pub cell: Option<(usize, usize)>,
    /// Horizontal texture coordinate along the struck face, in [0, 1).
    pub tex_u: f32,
}

impl RayHit {
    pub const MISS: RayHit = RayHit {
        perp_distance: f32::INFINITY,
        raw_distance: f32::INFINITY,
        color: [0.0; 3],
        cell: None,
        tex_u: 0.0,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.cell.is_some()
    }
}

/// Marches from `origin` along `angle` in fixed steps until an occupied
/// cell is entered or `max_steps` is exhausted. Returns the distance
/// travelled and the point that landed in the wall.
pub fn march(
    map: &Map,
    origin: [f32; 2],
    angle: f32,
    step: f32,
    max_steps: usize,
) -> Option<(f32, [f32; 2])> {
    let (sin, cos) = angle.sin_cos();
    for k in 1..=max_steps {
        // measured from the origin, not accumulated
        let d = k as f32 * step;
        let p = [origin[0] + d * cos, origin[1] + d * sin];
        if map.occupied_at(p[0], p[1]) {
            return Some((d, p));
        }
    }
    None
}

/// Casts the ray for screen column `column`.
pub fn cast_column(map: &Map, camera: &Camera, column: usize, cfg: &RenderConfig) -> RayHit {
    let angle = camera.ray_angle(column, cfg.hres, cfg.fov_deg);
    cast_ray(map, camera, angle, cfg)
}

/// Casts one ray at an absolute `angle`, correcting its depth against the
/// camera heading.
pub fn cast_ray(map: &Map, camera: &Camera, angle: f32, cfg: &RenderConfig) -> RayHit {
    let Some((raw, p)) = march(map, camera.pos, angle, cfg.step, cfg.max_steps()) else {
        return RayHit::MISS;
    };
    let Some(cell) = crate::map::cell_of(p[0], p[1]) else {
        return RayHit::MISS;
    };

    let perp = raw * (angle - camera.yaw).cos();
    let base = map.color(cell.0, cell.1);
    let shade = 1.0 / (1.0 + cfg.falloff * perp.max(0.0));
    let color = [
        (base[0] * shade).clamp(0.0, 1.0),
        (base[1] * shade).clamp(0.0, 1.0),
        (base[2] * shade).clamp(0.0, 1.0),
    ];

    RayHit {
        perp_distance: perp,
        raw_distance: raw,
        color,
        cell: Some(cell),
        tex_u: face_coordinate(p),
    }
}

/// Half the projected wall height in rows for a given depth.
#[inline]
pub fn projected_half_height(perp_distance: f32, halfvres: usize, epsilon: f32) -> f32 {
    halfvres as f32 / (perp_distance.max(0.0) + epsilon)
}

/// Position along the face of the cell that `p` landed in. Whichever
/// fractional coordinate is nearer a cell edge tells which face was crossed.
#[inline]
fn face_coordinate(p: [f32; 2]) -> f32 {
    let fx = p[0].rem_euclid(1.0);
    let fy = p[1].rem_euclid(1.0);
    let edge_x = fx.min(1.0 - fx);
    let edge_y = fy.min(1.0 - fy);
    if edge_x < edge_y { fy } else { fx }
}
