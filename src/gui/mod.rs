pub mod frontend;
pub mod properties;
pub mod viewer;
