//! # Tumble
//!
//! A box falls onto a tilted slab. rapier2d steps the world at a fixed 60 Hz
//! and wgpu draws both bodies as solid, rotated sprites.

pub mod app;
pub mod error;
pub mod render;
pub mod stats;

pub use app::App;
pub use error::{RendererError, StartupError};

