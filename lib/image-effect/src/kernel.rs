//! Fixed-kernel convolution filters.
//!
//! Each output sample is `round(sum(tap * sample) / divisor + offset)`,
//! clamped to `0..=255`. Pixels closer to the border than half the kernel
//! size are copied unchanged, and images smaller than the kernel are returned
//! as-is. The first kernel row is applied to the row below the centre pixel.

use crate::{EffectImage, Layout};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    pub name: &'static str,
    pub size: usize,
    pub divisor: f32,
    pub offset: f32,
    pub taps: &'static [i32],
}

#[rustfmt::skip]
pub const BLUR: Kernel = Kernel {
    name: "blur",
    size: 5,
    divisor: 16.0,
    offset: 0.0,
    taps: &[
        1, 1, 1, 1, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 1, 1, 1, 1,
    ],
};

#[rustfmt::skip]
pub const CONTOUR: Kernel = Kernel {
    name: "contour",
    size: 3,
    divisor: 1.0,
    offset: 255.0,
    taps: &[
        -1, -1, -1,
        -1,  8, -1,
        -1, -1, -1,
    ],
};

#[rustfmt::skip]
pub const DETAIL: Kernel = Kernel {
    name: "detail",
    size: 3,
    divisor: 6.0,
    offset: 0.0,
    taps: &[
         0, -1,  0,
        -1, 10, -1,
         0, -1,  0,
    ],
};

#[rustfmt::skip]
pub const EDGE_ENHANCE: Kernel = Kernel {
    name: "edge_enhance",
    size: 3,
    divisor: 2.0,
    offset: 0.0,
    taps: &[
        -1, -1, -1,
        -1, 10, -1,
        -1, -1, -1,
    ],
};

#[rustfmt::skip]
pub const EMBOSS: Kernel = Kernel {
    name: "emboss",
    size: 3,
    divisor: 1.0,
    offset: 128.0,
    taps: &[
        -1, 0, 0,
         0, 1, 0,
         0, 0, 0,
    ],
};

#[rustfmt::skip]
pub const SMOOTH: Kernel = Kernel {
    name: "smooth",
    size: 3,
    divisor: 13.0,
    offset: 0.0,
    taps: &[
        1, 1, 1,
        1, 5, 1,
        1, 1, 1,
    ],
};

#[rustfmt::skip]
pub const SMOOTH_MORE: Kernel = Kernel {
    name: "smooth_more",
    size: 5,
    divisor: 100.0,
    offset: 0.0,
    taps: &[
        1, 1,  1, 1, 1,
        1, 5,  5, 5, 1,
        1, 5, 44, 5, 1,
        1, 5,  5, 5, 1,
        1, 1,  1, 1, 1,
    ],
};

impl Kernel {
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// Convolve every colour channel of `image`. Alpha is copied.
    pub fn apply(&self, image: &EffectImage) -> EffectImage {
        let layout = image.layout();
        if layout.width < self.size || layout.height < self.size {
            log::debug!(
                "{} kernel skipped on {}x{} image",
                self.name,
                layout.width,
                layout.height
            );
            return image.clone();
        }

        image.map_samples(|src, dst, layout| self.convolve(src, dst, layout))
    }

    fn convolve(&self, src: &[u8], dst: &mut [u8], layout: Layout) {
        let half = self.half();
        let stride = layout.row_stride();

        dst.par_chunks_exact_mut(stride)
            .enumerate()
            .filter(|(y, _)| *y >= half && *y < layout.height - half)
            .for_each(|(y, row)| {
                for x in half..layout.width - half {
                    for c in 0..layout.color_channels {
                        let mut sum = 0i32;

                        for ky in 0..self.size {
                            let sy = y + half - ky;
                            let src_row = &src[sy * stride..(sy + 1) * stride];

                            for kx in 0..self.size {
                                let sx = x + kx - half;
                                let tap = self.taps[ky * self.size + kx];
                                sum += tap * src_row[sx * layout.channels + c] as i32;
                            }
                        }

                        let value = sum as f32 / self.divisor + self.offset;
                        row[x * layout.channels + c] = value.round().clamp(0.0, 255.0) as u8;
                    }
                }
            });
    }
}
