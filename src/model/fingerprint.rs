//! Block-mean fingerprints and their difference hash

use crate::error::{RecognitionError, Result};
use image::GrayImage;
use imageproc::integral_image::integral_image;
use serde::{Deserialize, Serialize};

/// Summed-area table over a grayscale image, one row and column larger than
/// the image with a zero first row and column.
pub(crate) struct IntegralImage {
    sums: Vec<u64>,
    stride: usize,
    width: u32,
    height: u32,
}

impl IntegralImage {
    pub(crate) fn new(gray: &GrayImage) -> Self {
        let table = integral_image::<_, u64>(gray);
        Self {
            stride: table.width() as usize,
            sums: table.into_raw(),
            width: gray.width(),
            height: gray.height(),
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn at(&self, x: u32, y: u32) -> u64 {
        self.sums[y as usize * self.stride + x as usize]
    }

    /// Sum of pixels in `[x0, x1) x [y0, y1)`.
    #[inline]
    fn sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        self.at(x1, y1) + self.at(x0, y0) - self.at(x0, y1) - self.at(x1, y0)
    }

    /// Fill `out` with the rounded mean of each of the `grid`x`grid` blocks of
    /// the `width`x`height` window at `(x, y)`, row-major.
    pub(crate) fn block_means(&self, x: u32, y: u32, width: u32, height: u32, grid: u32, out: &mut Vec<u8>) {
        out.clear();
        for row in 0..grid {
            let y0 = y + row * height / grid;
            let y1 = y + (row + 1) * height / grid;
            for col in 0..grid {
                let x0 = x + col * width / grid;
                let x1 = x + (col + 1) * width / grid;
                let area = (x1 - x0) as u64 * (y1 - y0) as u64;
                let mean = if area == 0 {
                    0
                } else {
                    (self.sum(x0, y0, x1, y1) + area / 2) / area
                };
                out.push(mean.min(255) as u8);
            }
        }
    }
}

/// Largest supported hash grid. Keeps cell counts and bit counts far from
/// `u32` overflow for grids read from untrusted model files.
pub const MAX_GRID: u32 = 64;

/// Number of hash bits for a grid: horizontal plus vertical neighbour comparisons.
pub fn bit_count(grid: u32) -> u32 {
    2 * grid * grid.saturating_sub(1)
}

/// Difference hash over block means, packed little-endian into 64-bit words.
pub(crate) fn hash_bits(cells: &[u8], grid: u32) -> Vec<u64> {
    let g = grid as usize;
    let mut words = vec![0u64; (bit_count(grid) as usize).div_ceil(64)];
    let mut bit = 0usize;
    let mut push = |set: bool| {
        if set {
            words[bit / 64] |= 1u64 << (bit % 64);
        }
        bit += 1;
    };
    for row in 0..g {
        for col in 0..g - 1 {
            push(cells[row * g + col] < cells[row * g + col + 1]);
        }
    }
    for row in 0..g - 1 {
        for col in 0..g {
            push(cells[row * g + col] < cells[(row + 1) * g + col]);
        }
    }
    words
}

/// Standard deviation of block means; near zero for textureless regions.
pub(crate) fn contrast(cells: &[u8]) -> f32 {
    if cells.is_empty() {
        return 0.0;
    }
    let n = cells.len() as f32;
    let mean = cells.iter().map(|&c| c as f32).sum::<f32>() / n;
    let var = cells
        .iter()
        .map(|&c| {
            let d = c as f32 - mean;
            d * d
        })
        .sum::<f32>()
        / n;
    var.sqrt()
}

/// Fingerprint of one reference image at one scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    width: u32,
    height: u32,
    grid: u32,
    cells: Vec<u8>,
    bits: Vec<u64>,
}

impl Fingerprint {
    /// Fingerprint a whole grayscale image.
    pub fn from_gray(gray: &GrayImage, grid: u32) -> Result<Self> {
        let (width, height) = gray.dimensions();
        if !(2..=MAX_GRID).contains(&grid) || width < grid || height < grid {
            return Err(RecognitionError::InvalidConfig {
                description: format!("cannot fingerprint {width}x{height} image with a {grid}x{grid} grid"),
            });
        }
        let integral = IntegralImage::new(gray);
        let mut cells = Vec::with_capacity((grid * grid) as usize);
        integral.block_means(0, 0, width, height, grid, &mut cells);
        Ok(Self::from_cells(width, height, grid, cells))
    }

    pub(crate) fn from_cells(width: u32, height: u32, grid: u32, cells: Vec<u8>) -> Self {
        let bits = hash_bits(&cells, grid);
        Self {
            width,
            height,
            grid,
            cells,
            bits,
        }
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid(&self) -> u32 {
        self.grid
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn bits(&self) -> &[u64] {
        &self.bits
    }

    pub fn bit_count(&self) -> u32 {
        bit_count(self.grid)
    }

    pub fn contrast(&self) -> f32 {
        contrast(&self.cells)
    }

    /// Hamming distance to another hash of the same length.
    pub fn hamming(&self, other: &[u64]) -> u32 {
        self.bits
            .iter()
            .zip(other)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Mean absolute difference of block means, scaled into `[0, 1)`.
    pub fn residual(&self, cells: &[u8]) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let total: u64 = self
            .cells
            .iter()
            .zip(cells)
            .map(|(&a, &b)| a.abs_diff(b) as u64)
            .sum();
        total as f64 / (self.cells.len() as f64 * 256.0)
    }

    /// Check internal consistency after deserialization.
    pub(crate) fn verify(&self) -> Result<()> {
        let fail = |description: String| Err(RecognitionError::ModelDecode { description });
        if !(2..=MAX_GRID).contains(&self.grid) {
            return fail(format!("grid {} is outside 2..={MAX_GRID}", self.grid));
        }
        if self.width < self.grid || self.height < self.grid {
            return fail(format!(
                "source {}x{} is smaller than the {}x{} grid",
                self.width, self.height, self.grid, self.grid
            ));
        }
        if self.cells.len() != (self.grid * self.grid) as usize {
            return fail(format!(
                "expected {} cells, found {}",
                self.grid * self.grid,
                self.cells.len()
            ));
        }
        if self.bits != hash_bits(&self.cells, self.grid) {
            return fail("hash bits do not match block means".to_string());
        }
        Ok(())
    }
}
