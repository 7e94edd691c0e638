use crate::error::{RecognitionError, Result};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Channel layout of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorFormat {
    Rgb,
    Rgba,
    Bgr,
    Bgra,
    Gray,
}

impl ColorFormat {
    pub fn channels(&self) -> usize {
        match self {
            ColorFormat::Rgb | ColorFormat::Bgr => 3,
            ColorFormat::Rgba | ColorFormat::Bgra => 4,
            ColorFormat::Gray => 1,
        }
    }

    /// Decode one pixel into `[r, g, b, a]`.
    pub(crate) fn to_rgba(&self, px: &[u8]) -> [u8; 4] {
        match self {
            ColorFormat::Rgb => [px[0], px[1], px[2], 255],
            ColorFormat::Rgba => [px[0], px[1], px[2], px[3]],
            ColorFormat::Bgr => [px[2], px[1], px[0], 255],
            ColorFormat::Bgra => [px[2], px[1], px[0], px[3]],
            ColorFormat::Gray => [px[0], px[0], px[0], 255],
        }
    }
}

/// A raster image supplied by a frame source. Read-only for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    id: u64,
    width: u32,
    height: u32,
    format: ColorFormat,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw pixel buffer, checking its length against the geometry.
    pub fn new(id: u64, width: u32, height: u32, format: ColorFormat, data: Vec<u8>) -> Result<Self> {
        let Some(expected) = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(format.channels()))
        else {
            return Err(RecognitionError::InvalidFrame {
                description: format!("{width}x{height} {format:?} is too large to address"),
            });
        };
        if data.len() != expected {
            return Err(RecognitionError::InvalidFrame {
                description: format!(
                    "{width}x{height} {format:?} needs {expected} bytes, got {}",
                    data.len()
                ),
            });
        }
        Ok(Self {
            id,
            width,
            height,
            format,
            data,
        })
    }

    /// Take ownership of a decoded image, keeping grayscale and alpha when present.
    pub fn from_image(id: u64, image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (format, data) = match image {
            DynamicImage::ImageLuma8(gray) => (ColorFormat::Gray, gray.into_raw()),
            DynamicImage::ImageRgb8(rgb) => (ColorFormat::Rgb, rgb.into_raw()),
            DynamicImage::ImageRgba8(rgba) => (ColorFormat::Rgba, rgba.into_raw()),
            other if other.color().has_alpha() => (ColorFormat::Rgba, other.to_rgba8().into_raw()),
            other => (ColorFormat::Rgb, other.to_rgb8().into_raw()),
        };
        Self {
            id,
            width,
            height,
            format,
            data,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Convert to an `image` buffer in its natural channel order.
    pub fn to_dynamic(&self) -> DynamicImage {
        let (w, h) = (self.width, self.height);
        let fallback = || DynamicImage::new_rgb8(w, h);
        match self.format {
            ColorFormat::Gray => GrayImage::from_raw(w, h, self.data.clone())
                .map(DynamicImage::ImageLuma8)
                .unwrap_or_else(fallback),
            ColorFormat::Rgb => RgbImage::from_raw(w, h, self.data.clone())
                .map(DynamicImage::ImageRgb8)
                .unwrap_or_else(fallback),
            ColorFormat::Rgba => RgbaImage::from_raw(w, h, self.data.clone())
                .map(DynamicImage::ImageRgba8)
                .unwrap_or_else(fallback),
            ColorFormat::Bgr => DynamicImage::ImageRgb8(self.to_rgb()),
            ColorFormat::Bgra => DynamicImage::ImageRgba8(self.to_rgba()),
        }
    }

    pub fn to_rgb(&self) -> RgbImage {
        let channels = self.format.channels();
        let mut out = RgbImage::new(self.width, self.height);
        for (dst, src) in out.pixels_mut().zip(self.data.chunks_exact(channels)) {
            let [r, g, b, _] = self.format.to_rgba(src);
            dst.0 = [r, g, b];
        }
        out
    }

    pub fn to_rgba(&self) -> RgbaImage {
        let channels = self.format.channels();
        let mut out = RgbaImage::new(self.width, self.height);
        for (dst, src) in out.pixels_mut().zip(self.data.chunks_exact(channels)) {
            dst.0 = self.format.to_rgba(src);
        }
        out
    }

    /// Grayscale view used for fingerprinting.
    pub fn to_gray(&self) -> GrayImage {
        match self.format {
            ColorFormat::Gray => GrayImage::from_raw(self.width, self.height, self.data.clone())
                .unwrap_or_else(|| GrayImage::new(self.width, self.height)),
            _ => self.to_dynamic().to_luma8(),
        }
    }
}
