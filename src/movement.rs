//! Camera movement with axis-separated wall collision.

use crate::camera::Camera;
use crate::config::MoveConfig;
use crate::map::Map;

/// Input state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub attack: bool,
    /// Relative pointer motion since the last frame, positive turns right.
    pub turn_delta: f32,
}

/// Advances the camera by one frame and returns the new, collision-free
/// camera. The input camera is expected to stand on an open cell; the
/// result always does.
pub fn step(camera: &Camera, input: &MoveInput, dt: f32, map: &Map, cfg: &MoveConfig) -> Camera {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let mut turn = input.turn_delta * cfg.turn_sensitivity;
    if !turn.is_finite() {
        turn = 0.0;
    }
    let yaw = camera.yaw + turn.clamp(-cfg.max_turn, cfg.max_turn);

    let mut fwd = axis(input.forward, input.backward);
    let mut strafe = axis(input.strafe_right, input.strafe_left);

    // Normalize diagonal speed
    if fwd != 0.0 && strafe != 0.0 {
        let inv = 1.0 / (fwd * fwd + strafe * strafe).sqrt();
        fwd *= inv;
        strafe *= inv;
    }

    let mut pos = camera.pos;
    if fwd != 0.0 || strafe != 0.0 {
        let (s, c) = yaw.sin_cos();
        let dir_fwd = [c, s];
        let dir_right = [-s, c]; // columns sweep toward increasing angle

        let dist = cfg.speed * dt;
        let delta = [
            (dir_fwd[0] * fwd + dir_right[0] * strafe) * dist,
            (dir_fwd[1] * fwd + dir_right[1] * strafe) * dist,
        ];
        pos = sweep(map, pos, delta, cfg.clearance);
    }

    Camera { pos, yaw }
}

/// Moves by `delta` in sub-steps no longer than the clearance radius, so a
/// long move cannot skip over a one-cell wall. Travel in one call is
/// limited to four grid widths.
pub fn sweep(map: &Map, from: [f32; 2], delta: [f32; 2], r: f32) -> [f32; 2] {
    let len = (delta[0] * delta[0] + delta[1] * delta[1]).sqrt();
    if !(len > 0.0) {
        return from;
    }
    let max_len = 4.0 * map.size() as f32;
    let travel = len.min(max_len);
    let steps = (travel / r).ceil();
    let k = travel / len / steps;
    let sub = [delta[0] * k, delta[1] * k];

    let mut pos = from;
    for _ in 0..steps as usize {
        let next = resolve(map, pos, [pos[0] + sub[0], pos[1] + sub[1]], r);
        if next == pos {
            break;
        }
        pos = next;
    }
    pos
}

#[inline]
fn axis(pos: bool, neg: bool) -> f32 {
    (pos as i32 - neg as i32) as f32
}

/// True when none of the four corners of the square of half-side `r`
/// around (x, y) falls in an occupied cell.
#[inline]
pub fn is_clear(map: &Map, x: f32, y: f32, r: f32) -> bool {
    !(map.occupied_at(x - r, y - r)
        || map.occupied_at(x + r, y - r)
        || map.occupied_at(x - r, y + r)
        || map.occupied_at(x + r, y + r))
}

/// Picks the furthest acceptable position between `from` and `cand`:
/// the full move, the x component alone, the y component alone, or no move.
pub fn resolve(map: &Map, from: [f32; 2], cand: [f32; 2], r: f32) -> [f32; 2] {
    if is_clear(map, cand[0], cand[1], r) {
        cand
    } else if is_clear(map, cand[0], from[1], r) {
        [cand[0], from[1]]
    } else if is_clear(map, from[0], cand[1], r) {
        [from[0], cand[1]]
    } else {
        from
    }
}
