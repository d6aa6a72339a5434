pub mod painter;
pub mod visual_node;
pub mod visual_scene;
