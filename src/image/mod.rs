pub mod canvas;
pub mod luminance;
