pub mod mapping;
pub mod point;
pub mod polar;
pub mod rect;
