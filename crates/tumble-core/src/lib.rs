//! # Tumble core
//!
//! Everything the demo does that does not need a window: the fixed scene,
//! rigid body stepping, simulation-to-screen mapping and the loop state.

pub mod config;
pub mod physics;
pub mod scene;
pub mod state;
pub mod transform;

pub use config::SceneConfig;
pub use physics::{BodyId, PhysicsWorld, Pose};
pub use scene::{Frame, Scene};
pub use state::{LoopEvent, LoopState};

