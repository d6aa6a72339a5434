pub mod geometry;
pub mod layered;
