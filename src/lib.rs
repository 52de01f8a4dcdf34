mod error;
mod image;
pub mod io;
mod spiral;
mod types;

pub use crate::error::{Result, SpiralError};
pub use crate::image::canvas::{Canvas, Surface};
pub use crate::image::luminance::{LuminanceSampler, OUTSIDE_LUMINANCE};
pub use spiral::*;
pub use types::mapping::CoordinateMapper;
pub use types::point::Point;
pub use types::polar::PolarPoint;
pub use types::rect::{Dimensions, Rect};
