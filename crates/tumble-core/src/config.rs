//! Scene configuration
//!
//! Every value here is a compile-time constant. The structs only group them so
//! the physics world, the mapping and the renderer read from one place.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::time::Duration;

use crate::transform::Viewport;

/// Window width in pixels
pub const SCREEN_WIDTH: u32 = 1280;
/// Window height in pixels
pub const SCREEN_HEIGHT: u32 = 720;
/// Meters to pixels (1 m = 10 px)
pub const MET2PIX: f32 = 10.0;

/// Whether a body is moved by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Infinite mass, never integrated
    Static,
    /// Finite mass, integrated every step
    Dynamic,
}

/// Collider material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

/// Initial state and shape of one rigid body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub kind: BodyKind,
    /// Initial position in meters
    pub position: Vec2,
    /// Initial angle in radians (counter-clockwise positive)
    pub angle: f32,
    /// Cuboid half extents in meters
    pub half_extents: Vec2,
    pub material: Material,
    /// RGBA fill colour of the sprite
    pub color: [u8; 4],
}

impl BodyConfig {
    /// The slab everything lands on
    pub fn ground() -> Self {
        Self {
            kind: BodyKind::Static,
            position: Vec2::new(0.0, -10.0),
            angle: -0.01 * PI,
            half_extents: Vec2::new(20.0, 0.2),
            material: Material {
                density: 0.0,
                friction: 0.2,
                restitution: 0.0,
            },
            color: [0xFF, 0xFF, 0xFF, 0xFF],
        }
    }

    /// The falling box
    pub fn falling_box() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position: Vec2::new(0.0, 10.0),
            angle: 0.0,
            half_extents: Vec2::new(1.0, 1.0),
            material: Material {
                density: 1.0,
                friction: 0.0,
                restitution: 0.01,
            },
            color: [0x1F, 0x6F, 0x0F, 0xFF],
        }
    }
}

/// Main scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Window width in pixels
    pub screen_width: u32,
    /// Window height in pixels
    pub screen_height: u32,
    /// Pixels per simulation meter
    pub met2pix: f32,
    /// Gravity in m/s^2
    pub gravity: Vec2,
    /// Fixed physics time step in seconds
    pub time_step: f32,
    /// Solver velocity iterations per step
    pub velocity_iterations: usize,
    /// Solver position iterations per step
    pub position_iterations: usize,
    /// Sleep between frames in milliseconds
    pub frame_delay_ms: u64,
    pub ground: BodyConfig,
    pub falling_box: BodyConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            met2pix: MET2PIX,
            gravity: Vec2::new(0.0, -9.81),
            time_step: 1.0 / 60.0,
            velocity_iterations: 6,
            position_iterations: 2,
            frame_delay_ms: 16,
            ground: BodyConfig::ground(),
            falling_box: BodyConfig::falling_box(),
        }
    }
}

impl SceneConfig {
    /// Load config with defaults
    pub fn load() -> Self {
        Self::default()
    }

    /// Screen dimensions and scale used by the coordinate mapping
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.screen_width,
            height: self.screen_height,
            scale: self.met2pix,
        }
    }

    /// Coarse frame pacing delay
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::load();
        assert_eq!(config.screen_width, 1280);
        assert_eq!(config.screen_height, 720);
        assert_eq!(config.met2pix, 10.0);
        assert_eq!(config.gravity, Vec2::new(0.0, -9.81));
        assert_eq!(config.velocity_iterations, 6);
        assert_eq!(config.position_iterations, 2);
        assert_eq!(config.frame_delay(), Duration::from_millis(16));
    }

    #[test]
    fn test_scene_bodies() {
        let config = SceneConfig::default();
        assert_eq!(config.ground.kind, BodyKind::Static);
        assert_eq!(config.falling_box.kind, BodyKind::Dynamic);
        assert_eq!(config.ground.half_extents, Vec2::new(20.0, 0.2));
        assert_eq!(config.falling_box.position, Vec2::new(0.0, 10.0));
        assert!((config.ground.angle + 0.0314159).abs() < 1e-5);
        assert_eq!(config.falling_box.material.restitution, 0.01);
    }
}
