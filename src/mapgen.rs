//! Random maze level generation.

use rand::Rng;

use crate::camera::Camera;
use crate::error::ConfigError;
use crate::map::{Map, Rgb};

/// A freshly generated level: map plus where the camera starts.
pub struct Level {
    pub map: Map,
    pub start: Camera,
}

/// Smallest side where the start and exit cells differ.
pub const MIN_LEVEL_SIZE: usize = 4;

/// Roughly one interior cell in four becomes a wall. The start cell (1, 1)
/// and the exit cell (size-2, size-2) are always left open.
pub fn random_map<R: Rng>(size: usize, rng: &mut R) -> Result<Level, ConfigError> {
    if size < MIN_LEVEL_SIZE {
        return Err(ConfigError::MapTooSmall {
            size,
            min: MIN_LEVEL_SIZE,
        });
    }

    let last = size - 1;
    let exit = (size - 2, size - 2);
    let mut solid = Vec::with_capacity(size * size);
    let mut colors: Vec<Rgb> = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let border = x == 0 || y == 0 || x == last || y == last;
            let keep_open = (x, y) == (1, 1) || (x, y) == exit;
            solid.push(border || (!keep_open && rng.gen_range(0..4) == 0));
            colors.push([
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            ]);
        }
    }

    let map = Map::new(size, solid, colors, Some(exit))?;
    log::info!(
        "generated {size}x{size} map, start (1.5, 1.5), exit {:?}",
        exit
    );
    Ok(Level {
        map,
        start: Camera {
            pos: [1.5, 1.5],
            yaw: 0.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_map_is_playable() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [4, 5, 25] {
            let level = random_map(size, &mut rng).unwrap();
            let map = &level.map;
            assert_eq!(map.size(), size);
            assert!(!map.occupied_at(level.start.pos[0], level.start.pos[1]));
            let (ex, ey) = map.exit().unwrap();
            assert!(!map.occupied(ex, ey));
            assert_ne!(level.start.cell(), map.exit());
        }
    }

    #[test]
    fn test_too_small() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_map(2, &mut rng).is_err());
        // a 3x3 level would start on its own exit
        assert_eq!(
            random_map(3, &mut rng).err(),
            Some(ConfigError::MapTooSmall { size: 3, min: 4 })
        );
    }
}
