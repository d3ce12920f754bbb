use crate::error::ConfigError;

/// Linear RGB, each channel in [0, 1].
pub type Rgb = [f32; 3];

/// Square occupancy grid with per-cell colors.
///
/// Built once at level load and only read afterwards. The outer ring is
/// always solid, so every ray cast from inside eventually terminates.
pub struct Map {
    size: usize,
    solid: Vec<bool>, // row-major, index y * size + x
    colors: Vec<Rgb>,
    exit: Option<(usize, usize)>,
}

impl Map {
    pub fn new(
        size: usize,
        solid: Vec<bool>,
        colors: Vec<Rgb>,
        exit: Option<(usize, usize)>,
    ) -> Result<Self, ConfigError> {
        if size < 3 {
            return Err(ConfigError::MapTooSmall { size, min: 3 });
        }
        let expected = size * size;
        for len in [solid.len(), colors.len()] {
            if len != expected {
                return Err(ConfigError::GridSizeMismatch {
                    expected,
                    found: len,
                });
            }
        }

        let last = size - 1;
        for i in 0..size {
            for (x, y) in [(i, 0), (i, last), (0, i), (last, i)] {
                if !solid[y * size + x] {
                    return Err(ConfigError::OpenBorder { x, y });
                }
            }
        }

        if let Some((x, y)) = exit {
            if x >= size || y >= size {
                return Err(ConfigError::ExitOutOfBounds { x, y });
            }
            if solid[y * size + x] {
                return Err(ConfigError::ExitOccupied { x, y });
            }
        }

        Ok(Self {
            size,
            solid,
            colors,
            exit,
        })
    }

    /// Border-only map of uniform wall color.
    pub fn walled(size: usize, wall: Rgb) -> Result<Self, ConfigError> {
        let mut solid = vec![false; size * size];
        for y in 0..size {
            for x in 0..size {
                if x == 0 || y == 0 || x + 1 == size || y + 1 == size {
                    solid[y * size + x] = true;
                }
            }
        }
        Self::new(size, solid, vec![wall; size * size], None)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn exit(&self) -> Option<(usize, usize)> {
        self.exit
    }

    #[inline]
    pub fn occupied(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return true;
        }
        self.solid[y * self.size + x]
    }

    /// Occupancy of the cell containing a continuous map-space point.
    /// Anything outside the grid counts as solid.
    #[inline]
    pub fn occupied_at(&self, x: f32, y: f32) -> bool {
        match cell_of(x, y) {
            Some((cx, cy)) => self.occupied(cx, cy),
            None => true,
        }
    }

    #[inline]
    pub fn color(&self, x: usize, y: usize) -> Rgb {
        if x >= self.size || y >= self.size {
            return [0.0; 3];
        }
        self.colors[y * self.size + x]
    }

    /// Sets a cell, keeping the border intact. Level-load use only.
    pub fn set_cell(&mut self, x: usize, y: usize, solid: bool, color: Rgb) {
        let last = self.size - 1;
        if x >= self.size || y >= self.size {
            return;
        }
        let border = x == 0 || y == 0 || x == last || y == last;
        let idx = y * self.size + x;
        self.solid[idx] = solid || border;
        self.colors[idx] = color;
    }
}

/// Integer cell containing a map-space point, `None` for negative or
/// non-finite coordinates.
#[inline]
pub fn cell_of(x: f32, y: f32) -> Option<(usize, usize)> {
    if !(x >= 0.0 && y >= 0.0) || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some((x as usize, y as usize))
}
