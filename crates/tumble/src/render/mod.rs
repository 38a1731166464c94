//! Rendering - wgpu setup and sprite drawing

mod renderer;
pub mod sprite;

pub use renderer::Renderer;
pub use sprite::Sprite;
