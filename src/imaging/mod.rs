//! In-memory frames and the small set of image utilities the pipeline needs
//! (colour conversion, resizing, cutting).

pub mod convert;
pub mod frame;

pub use convert::{Scaling, convert_color, cut_gray, cut_image, resize_to_scaling, resize_to_width};
pub use frame::{ColorFormat, Frame};
