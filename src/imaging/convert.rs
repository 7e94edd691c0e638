use super::frame::{ColorFormat, Frame};
use crate::error::Result;
use crate::geometry::Roi;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};

/// Fixed 16:9 working resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    S2048x1152,
    S1920x1080,
    S1600x900,
    S1408x792,
    S1344x756,
    S1280x720,
    S1152x648,
    S1024x576,
    S960x540,
    S896x504,
    S800x450,
    S768x432,
    S640x360,
    S320x180,
}

impl Scaling {
    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Scaling::S2048x1152 => (2048, 1152),
            Scaling::S1920x1080 => (1920, 1080),
            Scaling::S1600x900 => (1600, 900),
            Scaling::S1408x792 => (1408, 792),
            Scaling::S1344x756 => (1344, 756),
            Scaling::S1280x720 => (1280, 720),
            Scaling::S1152x648 => (1152, 648),
            Scaling::S1024x576 => (1024, 576),
            Scaling::S960x540 => (960, 540),
            Scaling::S896x504 => (896, 504),
            Scaling::S800x450 => (800, 450),
            Scaling::S768x432 => (768, 432),
            Scaling::S640x360 => (640, 360),
            Scaling::S320x180 => (320, 180),
        }
    }
}

/// Resize to one of the fixed resolutions.
pub fn resize_to_scaling(img: &DynamicImage, scaling: Scaling) -> DynamicImage {
    let (width, height) = scaling.dimensions();
    img.resize_exact(width, height, FilterType::Triangle)
}

/// Resize to `width`, keeping the aspect ratio.
pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    if img.width() == 0 || width == 0 {
        return img.clone();
    }
    let height = ((img.height() as u64 * width as u64) / img.width() as u64).max(1) as u32;
    img.resize_exact(width, height, FilterType::Triangle)
}

/// Grayscale counterpart of `resize_to_width` used on the hot path.
pub(crate) fn resize_gray_to_width(img: &GrayImage, width: u32) -> GrayImage {
    let height = ((img.height() as u64 * width as u64) / img.width().max(1) as u64).max(1) as u32;
    imageops::resize(img, width, height, FilterType::Triangle)
}

/// Cut the region out of an image. The region must lie inside the image.
pub fn cut_image(img: &DynamicImage, roi: &Roi) -> Result<DynamicImage> {
    roi.ensure_within(img.width(), img.height())?;
    Ok(img.crop_imm(roi.x, roi.y, roi.width, roi.height))
}

pub fn cut_gray(img: &GrayImage, roi: &Roi) -> Result<GrayImage> {
    roi.ensure_within(img.width(), img.height())?;
    Ok(imageops::crop_imm(img, roi.x, roi.y, roi.width, roi.height).to_image())
}

/// Re-emit every pixel as RGBA, reorder it, and keep the first `channels` bytes.
fn repack(frame: &Frame, channels: usize, order: impl Fn([u8; 4]) -> [u8; 4]) -> Vec<u8> {
    let source = frame.format();
    let mut data = Vec::with_capacity(frame.width() as usize * frame.height() as usize * channels);
    for px in frame.data().chunks_exact(source.channels()) {
        data.extend_from_slice(&order(source.to_rgba(px))[..channels]);
    }
    data
}

/// Convert a frame to another channel layout. Channel order of the source
/// is taken from the frame itself (BGR for camera captures).
pub fn convert_color(frame: &Frame, target: ColorFormat) -> Result<Frame> {
    if frame.format() == target {
        return Ok(frame.clone());
    }
    let data = match target {
        ColorFormat::Gray => frame.to_gray().into_raw(),
        ColorFormat::Rgb | ColorFormat::Rgba => repack(frame, target.channels(), |rgba| rgba),
        ColorFormat::Bgr | ColorFormat::Bgra => repack(frame, target.channels(), |[r, g, b, a]| [b, g, r, a]),
    };
    Frame::new(frame.id(), frame.width(), frame.height(), target, data)
}
