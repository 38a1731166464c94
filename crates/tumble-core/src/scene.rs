//! The per-frame simulation work without a window
//!
//! `Scene` owns the physics world and the sprite sizes. Each call to
//! [`Scene::frame`] steps once, reads both poses and maps them to screen space.

use glam::Vec2;

use crate::config::SceneConfig;
use crate::physics::{BodyId, PhysicsWorld, Pose};
use crate::state::{LoopEvent, LoopState};
use crate::transform::{self, DrawTransform, Viewport};

/// One body as it should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityFrame {
    pub id: BodyId,
    pub pose: Pose,
    pub transform: DrawTransform,
}

/// Result of one loop iteration, entities in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frames stepped so far, starting at 1
    pub index: u64,
    pub entities: [EntityFrame; 2],
}

impl Frame {
    pub fn entity(&self, id: BodyId) -> &EntityFrame {
        match id {
            BodyId::Ground => &self.entities[0],
            BodyId::Box => &self.entities[1],
        }
    }

    /// Console diagnostic for the box
    pub fn box_report(&self) -> String {
        let pose = self.entity(BodyId::Box).pose;
        format!(
            "BOX: {:4.2} {:4.2} {:4.2}",
            pose.position.x, pose.position.y, pose.angle
        )
    }
}

pub struct Scene {
    config: SceneConfig,
    viewport: Viewport,
    physics: PhysicsWorld,
    ground_size: (u32, u32),
    box_size: (u32, u32),
    frame_count: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let viewport = config.viewport();
        let physics = PhysicsWorld::new(&config);
        let ground_size = transform::sprite_size(config.ground.half_extents, viewport.scale);
        let box_size = transform::sprite_size(config.falling_box.half_extents, viewport.scale);

        log::debug!(
            "Scene: ground sprite {}x{}, box sprite {}x{}",
            ground_size.0,
            ground_size.1,
            box_size.0,
            box_size.1
        );

        Self {
            config,
            viewport,
            physics,
            ground_size,
            box_size,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn half_extents(&self, id: BodyId) -> Vec2 {
        match id {
            BodyId::Ground => self.config.ground.half_extents,
            BodyId::Box => self.config.falling_box.half_extents,
        }
    }

    /// Fill colour of a body's sprite
    pub fn color(&self, id: BodyId) -> [u8; 4] {
        match id {
            BodyId::Ground => self.config.ground.color,
            BodyId::Box => self.config.falling_box.color,
        }
    }

    /// Sprite size in pixels, fixed for the lifetime of the scene
    pub fn sprite_size(&self, id: BodyId) -> (u32, u32) {
        match id {
            BodyId::Ground => self.ground_size,
            BodyId::Box => self.box_size,
        }
    }

    /// Map the current pose of a body without stepping
    pub fn draw_transform(&self, id: BodyId) -> DrawTransform {
        transform::to_screen(
            self.physics.pose(id),
            self.half_extents(id),
            self.sprite_size(id),
            &self.viewport,
        )
    }

    fn entity_frame(&self, id: BodyId) -> EntityFrame {
        EntityFrame {
            id,
            pose: self.physics.pose(id),
            transform: self.draw_transform(id),
        }
    }

    /// Step once, then read and map every body
    pub fn frame(&mut self) -> Frame {
        self.physics.step();
        self.frame_count += 1;

        let [first, second] = BodyId::ALL;
        Frame {
            index: self.frame_count,
            entities: [self.entity_frame(first), self.entity_frame(second)],
        }
    }

    /// One loop iteration: apply the drained event batch, then produce a
    /// frame only if the loop is still running
    pub fn advance<I>(&mut self, state: LoopState, events: I) -> (LoopState, Option<Frame>)
    where
        I: IntoIterator<Item = LoopEvent>,
    {
        let state = state.after_events(events);
        if !state.is_running() {
            return (state, None);
        }
        (state, Some(self.frame()))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_draw_order() {
        let mut scene = Scene::default();
        let frame = scene.frame();
        assert_eq!(frame.entities[0].id, BodyId::Ground);
        assert_eq!(frame.entities[1].id, BodyId::Box);
        assert_eq!(frame.index, 1);
        assert_eq!(scene.frame_count(), 1);
    }

    #[test]
    fn test_rect_size_constant() {
        let mut scene = Scene::default();
        for _ in 0..30 {
            let frame = scene.frame();
            let ground = frame.entity(BodyId::Ground).transform.rect;
            let falling_box = frame.entity(BodyId::Box).transform.rect;
            assert_eq!((ground.w, ground.h), (400, 4));
            assert_eq!((falling_box.w, falling_box.h), (20, 20));
        }
    }

    #[test]
    fn test_draw_transform_matches_frame() {
        let mut scene = Scene::default();
        let frame = scene.frame();
        assert_eq!(
            frame.entity(BodyId::Box).transform,
            scene.draw_transform(BodyId::Box)
        );
    }

    #[test]
    fn test_advance_steps_while_running() {
        let mut scene = Scene::default();
        let (state, frame) = scene.advance(LoopState::Running, [LoopEvent::Other]);
        assert_eq!(state, LoopState::Running);
        assert_eq!(frame.map(|f| f.index), Some(1));
        assert_eq!(scene.frame_count(), 1);
    }

    #[test]
    fn test_advance_quit_skips_frame() {
        let mut scene = Scene::default();
        let (state, frame) = scene.advance(
            LoopState::Running,
            [LoopEvent::Other, LoopEvent::Quit, LoopEvent::Other],
        );
        assert_eq!(state, LoopState::Stopped);
        assert!(frame.is_none());
        assert_eq!(scene.frame_count(), 0);

        let (state, frame) = scene.advance(state, [LoopEvent::Other]);
        assert_eq!(state, LoopState::Stopped);
        assert!(frame.is_none());
        assert_eq!(scene.frame_count(), 0);
    }

    #[test]
    fn test_box_report_format() {
        let mut scene = Scene::default();
        let report = scene.frame().box_report();
        let fields: Vec<&str> = report.split_whitespace().collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], "BOX:");
        let y: f32 = fields[2].parse().unwrap();
        assert!((y - 10.0).abs() < 0.01);
    }
}
