pub mod graph;
pub mod loader;
