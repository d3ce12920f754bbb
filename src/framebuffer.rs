use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::map::Rgb;

/// Internal-resolution frame, stored column by column so each screen
/// column is one contiguous slice.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Rgb {
        self.pixels[column * self.height + row]
    }

    #[inline]
    pub fn column(&self, column: usize) -> &[Rgb] {
        let start = column * self.height;
        &self.pixels[start..start + self.height]
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Disjoint mutable columns, handed out to render workers.
    pub fn par_columns_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [Rgb])> {
        self.pixels.par_chunks_mut(self.height).enumerate()
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Writes the frame into a row-major `0x00RRGGBB` buffer of the same
    /// size, for overlays or presentation.
    pub fn pack_rows(&self, out: &mut [u32]) {
        let (w, h) = (self.width, self.height);
        out[..w * h].par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = pack_rgb(self.pixels[x * h + y]);
            }
        });
    }
}

#[inline]
pub fn pack_rgb(c: Rgb) -> u32 {
    let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    // BGRA8 in little-endian memory, alpha at 0
    to8(c[2]) | (to8(c[1]) << 8) | (to8(c[0]) << 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb() {
        assert_eq!(pack_rgb([1.0, 0.0, 0.0]), 0x00FF0000);
        assert_eq!(pack_rgb([0.0, 1.0, 0.0]), 0x0000FF00);
        assert_eq!(pack_rgb([2.0, -1.0, 1.0]), 0x00FF00FF);
    }

    #[test]
    fn test_column_layout() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.par_columns_mut().for_each(|(i, col)| {
            for (j, px) in col.iter_mut().enumerate() {
                *px = [i as f32, j as f32, 0.0];
            }
        });
        assert_eq!(fb.get(2, 1), [2.0, 1.0, 0.0]);
        assert_eq!(fb.column(1), &[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);

        let mut rows = vec![0u32; 6];
        fb.pack_rows(&mut rows);
        // row 1, column 0 -> green channel saturated
        assert_eq!(rows[3], pack_rgb([0.0, 1.0, 0.0]));
    }
}
