use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

const OUTSIDE: usize = usize::MAX;

/// Precomputed nearest-neighbour mapping from window pixels to internal
/// frame pixels, letterboxed to keep the frame's aspect ratio.
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
        return ScaleLut {
            src_x: vec![OUTSIDE; dst_w],
            src_y: vec![OUTSIDE; dst_h],
        };
    }

    let scale = (dst_w as f32 / src_w as f32).min(dst_h as f32 / src_h as f32);
    let view_w = ((src_w as f32 * scale).round() as usize).clamp(1, dst_w);
    let view_h = ((src_h as f32 * scale).round() as usize).clamp(1, dst_h);
    let off_x = (dst_w - view_w) / 2;
    let off_y = (dst_h - view_h) / 2;

    let axis = |dst: usize, off: usize, view: usize, src: usize| -> Vec<usize> {
        (0..dst)
            .map(|d| {
                if d < off || d >= off + view {
                    OUTSIDE
                } else {
                    ((d - off) * src / view).min(src - 1)
                }
            })
            .collect()
    };

    ScaleLut {
        src_x: axis(dst_w, off_x, view_w, src_w),
        src_y: axis(dst_h, off_y, view_h, src_h),
    }
}

/// Parallel nearest-neighbour stretch of a packed row-major frame into the
/// window buffer. Rows are processed in parallel for cache friendly writes.
pub fn blit_letterboxed(
    dst: &mut [u32],
    dw: usize,
    src: &[u32],
    sw: usize,
    lut: &ScaleLut,
    border: u32,
) {
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let sy = lut.src_y.get(y).copied().unwrap_or(OUTSIDE);
        if sy == OUTSIDE {
            dst_row.fill(border);
            return;
        }
        let row = &src[sy * sw..(sy + 1) * sw];
        for (x, px) in dst_row.iter_mut().enumerate() {
            let sx = lut.src_x.get(x).copied().unwrap_or(OUTSIDE);
            *px = if sx == OUTSIDE { border } else { row[sx] };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_window() {
        // 2x2 source into an 8x4 window: 4x4 view centered horizontally
        let lut = build_scale_lut(8, 4, 2, 2);
        assert_eq!(lut.src_x, vec![OUTSIDE, OUTSIDE, 0, 0, 1, 1, OUTSIDE, OUTSIDE]);
        assert_eq!(lut.src_y, vec![0, 0, 1, 1]);

        let src = [1u32, 2, 3, 4];
        let mut dst = vec![7u32; 32];
        blit_letterboxed(&mut dst, 8, &src, 2, &lut, 0);
        assert_eq!(&dst[0..8], &[0, 0, 1, 1, 2, 2, 0, 0]);
        assert_eq!(&dst[24..32], &[0, 0, 3, 3, 4, 4, 0, 0]);
    }

    #[test]
    fn test_letterbox_tall_window() {
        let lut = build_scale_lut(4, 10, 4, 2);
        assert_eq!(lut.src_x, vec![0, 1, 2, 3]);
        assert_eq!(
            lut.src_y,
            vec![OUTSIDE, OUTSIDE, OUTSIDE, OUTSIDE, 0, 1, OUTSIDE, OUTSIDE, OUTSIDE, OUTSIDE]
        );
    }
}
