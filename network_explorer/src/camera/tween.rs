//! Timed camera transitions between two poses.

use bevy::prelude::*;

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub focus: Vec3,
}

impl CameraPose {
    pub fn new(eye: Vec3, focus: Vec3) -> Self {
        Self { eye, focus }
    }

    pub fn lerp(self, other: CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: self.eye.lerp(other.eye, t),
            focus: self.focus.lerp(other.focus, t),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye).looking_at(self.focus, Vec3::Y)
    }
}

/// Quadratic ease-in-out on `[0, 1]`.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Debug)]
pub struct CameraTween {
    from: CameraPose,
    to: CameraPose,
    elapsed: f32,
    duration: f32,
}

impl CameraTween {
    pub fn new(from: CameraPose, to: CameraPose, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn target(&self) -> CameraPose {
        self.to
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= f32::EPSILON {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Pose at the current progress. Exactly the target once finished.
    pub fn sample(&self) -> CameraPose {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, ease_in_out_quad(self.progress()))
    }

    /// Advances by `dt` seconds and returns the new pose.
    pub fn advance(&mut self, dt: f32) -> CameraPose {
        self.elapsed += dt.max(0.0);
        self.sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(x: f32) -> CameraPose {
        CameraPose::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO)
    }

    #[test]
    fn easing_is_symmetric_and_pinned() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_quad(0.25) + ease_in_out_quad(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tween_reaches_target_exactly() {
        let mut tween = CameraTween::new(pose(0.0), pose(10.0), 1.0);
        let mid = tween.advance(0.5);
        assert!((mid.eye.x - 5.0).abs() < 1e-4);
        let end = tween.advance(0.75);
        assert!(tween.is_finished());
        assert_eq!(end, pose(10.0));
    }

    #[test]
    fn zero_duration_snaps() {
        let tween = CameraTween::new(pose(0.0), pose(3.0), 0.0);
        assert!(tween.is_finished());
        assert_eq!(tween.sample(), pose(3.0));
    }
}
