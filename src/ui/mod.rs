//! Rendering and windowing
//!
//! The scene and renderer are platform independent. The window that shows
//! frames and feeds pointer input back is Windows only.

pub mod renderer;
pub mod ruler;
pub mod scene;
pub mod text;
#[cfg(windows)]
pub mod window;

pub use renderer::{FrameOptions, RendererError, SceneRenderer};
pub use scene::{Canvas, Scene, Shape, ShapeId};
