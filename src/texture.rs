use crate::error::ConfigError;
use crate::map::Rgb;

/// Fixed-size color buffer, stored column by column (`x * height + y`).
#[derive(Clone, Debug)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Rgb>,
}

impl Texture {
    pub fn new(
        name: &'static str,
        width: usize,
        height: usize,
        texels: Vec<Rgb>,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyTexture(name));
        }
        if texels.len() != width * height {
            return Err(ConfigError::TextureSizeMismatch {
                expected: width * height,
                found: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Builds a texture from a per-texel function.
    pub fn from_fn(
        name: &'static str,
        width: usize,
        height: usize,
        f: impl Fn(usize, usize) -> Rgb,
    ) -> Result<Self, ConfigError> {
        let mut texels = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                texels.push(f(x, y));
            }
        }
        Self::new(name, width, height, texels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Texel lookup; coordinates wrap around both axes.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Rgb {
        self.texels[(x % self.width) * self.height + (y % self.height)]
    }

    /// Samples at fractional coordinates, repeating every 1.0 on both axes.
    #[inline]
    pub fn sample_wrap(&self, u: f32, v: f32) -> Rgb {
        let x = wrap_index(u, self.width);
        let y = wrap_index(v, self.height);
        self.texels[x * self.height + y]
    }

    /// Column of a sky strip facing `angle` radians. The strip spans 360
    /// degrees across its width, one whole degree per step.
    #[inline]
    pub fn sky_column(&self, angle: f32) -> usize {
        let deg = if angle.is_finite() {
            (angle.to_degrees().round() as i64).rem_euclid(360) as usize
        } else {
            0
        };
        deg * self.width / 360
    }
}

#[inline]
fn wrap_index(t: f32, n: usize) -> usize {
    let frac = t.rem_euclid(1.0);
    // NaN falls through to 0 on the cast
    ((frac * n as f32) as usize).min(n - 1)
}

/// Sky strip, floor tile and wall tile used by one level.
#[derive(Clone, Debug)]
pub struct TextureStore {
    pub sky: Texture,
    pub floor: Texture,
    pub wall: Texture,
}

impl TextureStore {
    /// Generated stand-ins for decoded image assets.
    pub fn procedural(sky_height: usize) -> Result<Self, ConfigError> {
        let sky = Texture::from_fn("sky", 360, sky_height, |x, y| {
            let t = y as f32 / sky_height.max(1) as f32;
            let cloud = 0.08 * ((x as f32).to_radians() * 6.0).sin().max(0.0);
            [
                (0.25 + 0.35 * t + cloud).min(1.0),
                (0.45 + 0.3 * t + cloud).min(1.0),
                (0.85 + 0.1 * t + cloud).min(1.0),
            ]
        })?;

        let floor = Texture::from_fn("floor", 64, 64, |x, y| {
            let checker = ((x / 8) + (y / 8)) % 2 == 0;
            let grain = ((x * 7 + y * 13) % 5) as f32 * 0.02;
            if checker {
                [0.45 + grain, 0.42 + grain, 0.38 + grain]
            } else {
                [0.3 + grain, 0.28 + grain, 0.25 + grain]
            }
        })?;

        let wall = Texture::from_fn("wall", 64, 64, |x, y| {
            let row = y / 16;
            let offset = if row % 2 == 0 { 0 } else { 16 };
            let mortar = y % 16 == 0 || (x + offset) % 32 == 0;
            if mortar {
                [0.55, 0.55, 0.5]
            } else {
                [0.95, 0.9 - (row % 3) as f32 * 0.05, 0.85]
            }
        })?;

        Ok(Self { sky, floor, wall })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Texture {
        Texture::from_fn("grad", 4, 2, |x, y| [x as f32 / 4.0, y as f32 / 2.0, 0.0]).unwrap()
    }

    #[test]
    fn test_rejects_bad_buffers() {
        assert_eq!(
            Texture::new("t", 0, 4, vec![]).err(),
            Some(ConfigError::EmptyTexture("t"))
        );
        assert!(Texture::new("t", 2, 2, vec![[0.0; 3]; 3]).is_err());
    }

    #[test]
    fn test_wrap_sampling() {
        let tex = gradient();
        assert_eq!(tex.sample_wrap(0.3, 0.7), tex.sample_wrap(1.3, -0.3));
        assert_eq!(tex.sample_wrap(0.99, 0.0), [0.75, 0.0, 0.0]);
        assert_eq!(tex.texel(5, 3), tex.texel(1, 1));
    }

    #[test]
    fn test_sky_column_wraps_heading() {
        let sky = Texture::from_fn("sky", 360, 1, |x, _| [x as f32, 0.0, 0.0]).unwrap();
        assert_eq!(sky.sky_column(0.0), 0);
        assert_eq!(sky.sky_column(90f32.to_radians()), 90);
        assert_eq!(sky.sky_column(-90f32.to_radians()), 270);
        assert_eq!(sky.sky_column(725f32.to_radians()), 5);

        let narrow = Texture::from_fn("sky", 180, 1, |_, _| [0.0; 3]).unwrap();
        assert_eq!(narrow.sky_column(90f32.to_radians()), 45);
    }
}
