//! Column composition: sky above the horizon, floor-cast texels below it,
//! and the wall band from [`crate::raycast`] over both.

use rayon::iter::ParallelIterator;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::framebuffer::FrameBuffer;
use crate::map::{Map, Rgb};
use crate::raycast::{RayHit, cast_column, projected_half_height};
use crate::texture::{Texture, TextureStore};

/// Floor tiles repeat this many times per map unit.
const FLOOR_TILES_PER_UNIT: f32 = 2.0;

/// Renders one frame. Every column is handled by its own worker and every
/// pixel of the frame is written exactly once.
pub fn render_frame(
    frame: &mut FrameBuffer,
    map: &Map,
    camera: &Camera,
    textures: &TextureStore,
    cfg: &RenderConfig,
) {
    debug_assert_eq!(frame.width(), cfg.hres);
    debug_assert_eq!(frame.height(), cfg.vres());

    frame.par_columns_mut().for_each(|(i, column)| {
        let hit = cast_column(map, camera, i, cfg);
        render_column(column, i, &hit, camera, textures, cfg);
    });
}

/// Fills one screen column given its wall hit.
pub fn render_column(
    column: &mut [Rgb],
    index: usize,
    hit: &RayHit,
    camera: &Camera,
    textures: &TextureStore,
    cfg: &RenderConfig,
) {
    let halfvres = cfg.halfvres;
    let horizon = halfvres as f32;
    let angle = camera.ray_angle(index, cfg.hres, cfg.fov_deg);
    let (sin, cos) = angle.sin_cos();
    let cos_f = (angle - camera.yaw).cos();

    let h = if hit.is_hit() {
        projected_half_height(hit.perp_distance, halfvres, cfg.epsilon)
    } else {
        0.0
    };
    let (wall_top, wall_bottom) = (horizon - h, horizon + h);

    let sky = &textures.sky;
    let sky_x = sky.sky_column(angle);

    for (row, px) in column.iter_mut().enumerate() {
        let r = row as f32;
        *px = if r > wall_top && r < wall_bottom {
            if cfg.textured_walls {
                let v = (r - wall_top) / (wall_bottom - wall_top);
                modulate(hit.color, textures.wall.sample_wrap(hit.tex_u, v))
            } else {
                hit.color
            }
        } else if row < halfvres {
            sky.texel(sky_x, row * sky.height() / halfvres)
        } else {
            // j counts up from the bottom row toward the horizon
            let j = 2 * halfvres - row - 1;
            let dist = floor_distance(j, halfvres, cos_f);
            let x = camera.pos[0] + cos * dist;
            let y = camera.pos[1] + sin * dist;
            scale(floor_sample(&textures.floor, x, y), floor_shade(j, halfvres))
        };
    }
}

/// Distance to the floor point seen `j` rows above the bottom of the frame,
/// fisheye-corrected by the cosine of the ray's offset from the heading.
#[inline]
pub fn floor_distance(j: usize, halfvres: usize, cos_offset: f32) -> f32 {
    let denom = (halfvres - j) as f32;
    (halfvres as f32 / denom) / cos_offset
}

/// Floor texture color at a world point, tiling every half map unit.
#[inline]
pub fn floor_sample(floor: &Texture, x: f32, y: f32) -> Rgb {
    floor.sample_wrap(x * FLOOR_TILES_PER_UNIT, y * FLOOR_TILES_PER_UNIT)
}

/// Brightness of floor row `j`: 1.0 at the bottom, 0.2 toward the horizon.
#[inline]
pub fn floor_shade(j: usize, halfvres: usize) -> f32 {
    0.2 + 0.8 * (1.0 - j as f32 / halfvres as f32)
}

#[inline]
fn scale(c: Rgb, k: f32) -> Rgb {
    [c[0] * k, c[1] * k, c[2] * k]
}

#[inline]
fn modulate(a: Rgb, b: Rgb) -> Rgb {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2]]
}
