//! Simulation space to screen space
//!
//! Simulation: meters, origin at the screen center, +Y up, angles
//! counter-clockwise positive. Screen: pixels, origin top-left, +Y down,
//! rotations clockwise positive.

use glam::Vec2;

use crate::physics::Pose;

/// Screen dimensions plus the meters-to-pixels factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Pixels per meter
    pub scale: f32,
}

impl Viewport {
    /// Screen center in pixels
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Destination rectangle in pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Where and how to draw one sprite this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawTransform {
    pub rect: ScreenRect,
    /// Rotation around the rect center, clockwise positive
    pub angle_degrees: f32,
}

/// Pixel size of a sprite covering a cuboid with the given half extents.
///
/// Computed once when the sprite texture is created; every later
/// `DrawTransform` for that body reuses it.
pub fn sprite_size(half_extents: Vec2, scale: f32) -> (u32, u32) {
    let w = (half_extents.x * 2.0 * scale).round().max(1.0);
    let h = (half_extents.y * 2.0 * scale).round().max(1.0);
    (w as u32, h as u32)
}

/// Simulation angle (radians, CCW) to renderer angle (degrees, CW)
#[inline]
pub fn rotation_degrees(angle: f32) -> f32 {
    -angle.to_degrees()
}

/// Map a body pose to its draw rectangle and rotation.
///
/// The rect's top-left is the pose offset by the half extents, scaled and
/// shifted to the screen center, with Y flipped. Pixel coordinates truncate
/// toward zero.
pub fn to_screen(
    pose: Pose,
    half_extents: Vec2,
    size: (u32, u32),
    viewport: &Viewport,
) -> DrawTransform {
    let center = viewport.center();
    let x = (pose.position.x - half_extents.x) * viewport.scale + center.x;
    let y = -(pose.position.y + half_extents.y) * viewport.scale + center.y;

    log::trace!(
        "to_screen: world({:.2},{:.2}) → screen({:.1},{:.1})",
        pose.position.x,
        pose.position.y,
        x,
        y
    );

    DrawTransform {
        rect: ScreenRect {
            x: x as i32,
            y: y as i32,
            w: size.0,
            h: size.1,
        },
        angle_degrees: rotation_degrees(pose.angle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn viewport() -> Viewport {
        Viewport {
            width: 1280,
            height: 720,
            scale: 10.0,
        }
    }

    #[test]
    fn test_box_start_position() {
        let pose = Pose {
            position: Vec2::new(0.0, 10.0),
            angle: 0.0,
        };
        let t = to_screen(pose, Vec2::ONE, (20, 20), &viewport());
        // (0 - 1) * 10 + 640, -(10 + 1) * 10 + 360
        assert_eq!(t.rect.x, 630);
        assert_eq!(t.rect.y, 250);
        assert_eq!((t.rect.w, t.rect.h), (20, 20));
        assert_eq!(t.angle_degrees, 0.0);
    }

    #[test]
    fn test_ground_position() {
        let pose = Pose {
            position: Vec2::new(0.0, -10.0),
            angle: 0.0,
        };
        let half = Vec2::new(20.0, 0.2);
        let size = sprite_size(half, 10.0);
        let t = to_screen(pose, half, size, &viewport());
        // (0 - 20) * 10 + 640, -(-10 + 0.2) * 10 + 360
        assert_eq!(t.rect.x, 440);
        assert_eq!(t.rect.y, 458);
        assert_eq!(size, (400, 4));
    }

    #[test]
    fn test_rotation_sign() {
        assert!((rotation_degrees(PI / 2.0) + 90.0).abs() < 1e-4);
        assert!((rotation_degrees(-PI / 4.0) - 45.0).abs() < 1e-4);
        assert_eq!(rotation_degrees(0.0), 0.0);
    }

    #[test]
    fn test_y_axis_flipped() {
        let vp = viewport();
        let low = to_screen(
            Pose {
                position: Vec2::new(0.0, -5.0),
                angle: 0.0,
            },
            Vec2::ONE,
            (20, 20),
            &vp,
        );
        let high = to_screen(
            Pose {
                position: Vec2::new(0.0, 5.0),
                angle: 0.0,
            },
            Vec2::ONE,
            (20, 20),
            &vp,
        );
        assert!(high.rect.y < low.rect.y);
        assert_eq!(high.rect.x, low.rect.x);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let pose = Pose {
            position: Vec2::new(0.05, 0.0),
            angle: 0.0,
        };
        // (0.05 - 65) * 10 + 640 = -9.5
        let t = to_screen(pose, Vec2::new(65.0, 1.0), (1300, 20), &viewport());
        assert_eq!(t.rect.x, -9);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let pose = Pose {
            position: Vec2::new(3.25, -7.5),
            angle: 0.3,
        };
        let vp = viewport();
        let a = to_screen(pose, Vec2::ONE, (20, 20), &vp);
        let b = to_screen(pose, Vec2::ONE, (20, 20), &vp);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sprite_size_never_zero() {
        assert_eq!(sprite_size(Vec2::new(0.01, 0.01), 10.0), (1, 1));
        assert_eq!(sprite_size(Vec2::ONE, 10.0), (20, 20));
    }
}
