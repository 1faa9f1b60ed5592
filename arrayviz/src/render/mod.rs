//! Terminal preview of a scene.

mod render;

pub use render::{render_scene, Viewport};
