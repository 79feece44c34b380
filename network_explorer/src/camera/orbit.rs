//! Orbit controls: drag to rotate around the focus point, scroll to zoom.

use std::f32::consts::PI;

use bevy::prelude::*;

const MIN_POLAR_EPSILON: f32 = 1e-3;

/// Distance and polar-angle limits for the orbiting camera.
/// Polar angle is measured from +Y: 0 looks straight down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_distance: 0.5,
            max_distance: 500.0,
            min_polar: 0.0,
            max_polar: PI,
        }
    }
}

impl OrbitBounds {
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_polar(&self, polar: f32) -> f32 {
        let min = self.min_polar.max(MIN_POLAR_EPSILON);
        let max = self.max_polar.min(PI - MIN_POLAR_EPSILON).max(min);
        polar.clamp(min, max)
    }

    pub fn contains(&self, focus: Vec3, eye: Vec3) -> bool {
        let (radius, polar, _) = spherical(eye - focus);
        radius >= self.min_distance - 1e-3
            && radius <= self.max_distance + 1e-3
            && polar >= self.min_polar - 1e-3
            && polar <= self.max_polar + 1e-3
    }

    /// Moves `eye` onto the nearest point around `focus` that satisfies the bounds.
    pub fn clamp_eye(&self, focus: Vec3, eye: Vec3) -> Vec3 {
        let (radius, polar, azimuth) = spherical(eye - focus);
        focus + from_spherical(self.clamp_distance(radius), self.clamp_polar(polar), azimuth)
    }
}

/// `(radius, polar, azimuth)` of an offset, azimuth around +Y from +Z.
pub fn spherical(offset: Vec3) -> (f32, f32, f32) {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
    let azimuth = offset.x.atan2(offset.z);
    (radius, polar, azimuth)
}

pub fn from_spherical(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let sin_polar = polar.sin();
    Vec3::new(
        radius * sin_polar * azimuth.sin(),
        radius * polar.cos(),
        radius * sin_polar * azimuth.cos(),
    )
}

/// Orbit state for the page camera.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub bounds: OrbitBounds,
    pub zoom_enabled: bool,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, focus: Vec3, bounds: OrbitBounds) -> Self {
        let mut orbit = Self {
            focus,
            radius: 0.0,
            polar: 0.0,
            azimuth: 0.0,
            bounds,
            zoom_enabled: true,
        };
        orbit.sync(eye, focus);
        orbit
    }

    /// Adopts an externally driven pose (tween frames) without clamping.
    pub fn sync(&mut self, eye: Vec3, focus: Vec3) {
        let (radius, polar, azimuth) = spherical(eye - focus);
        self.focus = focus;
        self.radius = radius;
        self.polar = polar;
        self.azimuth = azimuth;
    }

    pub fn eye(&self) -> Vec3 {
        self.focus + from_spherical(self.radius, self.polar, self.azimuth)
    }

    /// Drag delta in radians.
    pub fn rotate(&mut self, delta: Vec2) {
        self.azimuth -= delta.x;
        self.polar = self.bounds.clamp_polar(self.polar - delta.y);
        self.radius = self.bounds.clamp_distance(self.radius);
    }

    /// Positive `amount` zooms in. Ignored while zoom is disabled.
    pub fn zoom(&mut self, amount: f32) {
        if !self.zoom_enabled {
            return;
        }
        let scale = (1.0 - amount).clamp(0.5, 1.5);
        self.radius = self.bounds.clamp_distance(self.radius * scale);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }
}
