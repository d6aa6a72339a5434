pub mod config;
pub mod error;
pub mod graph_utils;
pub mod gui;
pub mod interaction;
pub mod layout;
pub mod scene;
pub mod viewport;

pub use error::InvalidGraphError;
