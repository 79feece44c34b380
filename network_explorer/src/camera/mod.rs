//! Page camera: orbit controls plus single-slot focus tweens.

mod orbit;
mod tween;

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

pub use orbit::{from_spherical, spherical, OrbitBounds, OrbitCamera};
pub use tween::{ease_in_out_quad, CameraPose, CameraTween};

use crate::scene::SelectionController;

const ROTATE_RADIANS_PER_PIXEL: f32 = 0.005;
const ZOOM_PER_LINE: f32 = 0.1;
const ZOOM_PER_PIXEL: f32 = 0.002;
const DEFAULT_TWEEN_SECS: f32 = 1.0;

/// Per-page camera policy plus the one in-flight tween.
#[derive(Resource, Clone, Debug)]
pub struct CameraRig {
    pub home: CameraPose,
    pub focus_offset: Vec3,
    pub duration: f32,
    pub idle_bounds: OrbitBounds,
    pub focused_bounds: OrbitBounds,
    tween: Option<CameraTween>,
}

impl CameraRig {
    pub fn new(home: CameraPose, focus_offset: Vec3) -> Self {
        Self {
            home,
            focus_offset,
            duration: DEFAULT_TWEEN_SECS,
            idle_bounds: OrbitBounds::default(),
            focused_bounds: OrbitBounds::default(),
            tween: None,
        }
    }

    pub fn with_bounds(mut self, idle: OrbitBounds, focused: OrbitBounds) -> Self {
        self.idle_bounds = idle;
        self.focused_bounds = focused;
        self
    }

    pub fn with_duration(mut self, secs: f32) -> Self {
        self.duration = secs;
        self
    }

    /// Pose that frames `anchor`, pulled inside the focused bounds.
    pub fn focus_pose(&self, anchor: Vec3) -> CameraPose {
        let eye = self
            .focused_bounds
            .clamp_eye(anchor, anchor + self.focus_offset);
        CameraPose::new(eye, anchor)
    }

    pub fn home_pose(&self) -> CameraPose {
        CameraPose::new(
            self.idle_bounds.clamp_eye(self.home.focus, self.home.eye),
            self.home.focus,
        )
    }

    /// Replaces any in-flight tween with one from `from` to `to`.
    pub fn start(&mut self, from: CameraPose, to: CameraPose) {
        self.tween = Some(CameraTween::new(from, to, self.duration));
    }

    pub fn focus_on(&mut self, from: CameraPose, anchor: Vec3) -> CameraPose {
        let to = self.focus_pose(anchor);
        self.start(from, to);
        to
    }

    pub fn return_home(&mut self, from: CameraPose) -> CameraPose {
        let to = self.home_pose();
        self.start(from, to);
        to
    }

    /// Tweens `orbit` onto `anchor` and locks it to the focused bounds.
    pub fn engage(&mut self, orbit: &mut OrbitCamera, anchor: Vec3) {
        self.focus_on(current_pose(orbit), anchor);
        orbit.bounds = self.focused_bounds;
        orbit.zoom_enabled = false;
    }

    /// Tweens `orbit` back home and relaxes its bounds.
    pub fn release(&mut self, orbit: &mut OrbitCamera) {
        self.return_home(current_pose(orbit));
        orbit.bounds = self.idle_bounds;
        orbit.zoom_enabled = true;
    }

    pub fn cancel(&mut self) {
        self.tween = None;
    }

    pub fn tween(&self) -> Option<&CameraTween> {
        self.tween.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Advances the tween. Returns the pose to apply and whether the tween
    /// just finished; the slot is emptied once it does.
    pub fn step(&mut self, dt: f32) -> Option<(CameraPose, bool)> {
        let tween = self.tween.as_mut()?;
        let pose = tween.advance(dt);
        let finished = tween.is_finished();
        if finished {
            self.tween = None;
        }
        Some((pose, finished))
    }
}

/// Current pose of the orbit camera, read from its controller state.
pub fn current_pose(orbit: &OrbitCamera) -> CameraPose {
    CameraPose::new(orbit.eye(), orbit.focus)
}

/// Camera bundle for a page, positioned at the rig's home pose.
pub fn page_camera(rig: &CameraRig) -> impl Bundle {
    let home = rig.home_pose();
    let orbit = OrbitCamera::new(home.eye, home.focus, rig.idle_bounds);
    (Camera3d::default(), home.transform(), orbit)
}

pub fn camera_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (orbit_input_system, camera_tween_system)
            .chain()
            .run_if(resource_exists::<CameraRig>),
    );
}

fn orbit_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    rig: Res<CameraRig>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y * ZOOM_PER_LINE,
            MouseScrollUnit::Pixel => w.y * ZOOM_PER_PIXEL,
        })
        .sum();

    if rig.is_animating() || contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    for (mut orbit, mut transform) in &mut cameras {
        let mut changed = false;
        if mouse.pressed(MouseButton::Left) && drag != Vec2::ZERO {
            orbit.rotate(drag * ROTATE_RADIANS_PER_PIXEL);
            changed = true;
        }
        if scroll != 0.0 && orbit.zoom_enabled {
            orbit.zoom(scroll);
            changed = true;
        }
        if changed {
            *transform = orbit.transform();
        }
    }
}

fn camera_tween_system(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    mut controller: ResMut<SelectionController>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let Some((pose, finished)) = rig.step(time.delta_secs()) else {
        return;
    };
    for (mut orbit, mut transform) in &mut cameras {
        orbit.sync(pose.eye, pose.focus);
        *transform = pose.transform();
    }
    if finished {
        controller.settle();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::scene::FocusPhase;

    fn rig() -> CameraRig {
        CameraRig::new(
            CameraPose::new(Vec3::new(0.0, 2.0, 20.0), Vec3::ZERO),
            Vec3::splat(10.0),
        )
        .with_bounds(
            OrbitBounds {
                min_distance: 5.0,
                max_distance: 40.0,
                min_polar: 0.0,
                max_polar: std::f32::consts::FRAC_PI_2,
            },
            OrbitBounds {
                min_distance: 15.0,
                max_distance: 20.0,
                min_polar: 0.0,
                max_polar: std::f32::consts::FRAC_PI_2,
            },
        )
    }

    #[test]
    fn newer_tween_replaces_in_flight_one() {
        let mut rig = rig();
        let start = rig.home_pose();

        let stale = rig.focus_on(start, Vec3::new(-30.0, 0.0, 0.0));
        let (midway, finished) = rig.step(0.4).unwrap();
        assert!(!finished);

        let newest = rig.focus_on(midway, Vec3::new(30.0, 5.0, 0.0));
        assert_eq!(rig.tween().unwrap().target(), newest);

        let mut last = midway;
        while let Some((pose, _)) = rig.step(0.1) {
            last = pose;
        }
        assert_eq!(last, newest);
        assert_ne!(last, stale);
        assert!(!rig.is_animating());
    }

    #[test]
    fn focus_pose_is_inside_focused_bounds() {
        let rig = rig();
        let anchor = Vec3::new(4.0, 1.0, -2.0);
        let pose = rig.focus_pose(anchor);
        assert_eq!(pose.focus, anchor);
        assert!(rig.focused_bounds.contains(anchor, pose.eye));
    }

    #[test]
    fn home_pose_is_inside_idle_bounds() {
        let rig = rig();
        let home = rig.home_pose();
        assert!(rig.idle_bounds.contains(home.focus, home.eye));
    }

    #[test]
    fn finished_tween_settles_selection_into_focused() {
        let mut camera_rig = rig();
        let home = camera_rig.home_pose();
        let anchor = Vec3::new(4.0, 1.0, -2.0);
        let target = camera_rig.focus_on(home, anchor);

        let selected = Entity::from_raw(42);
        let mut transforms = HashMap::from([(selected, Transform::from_translation(anchor))]);
        let mut controller = SelectionController::new(6.0);
        controller.select(selected, &mut transforms);

        let mut app = App::new();
        let camera = app
            .world_mut()
            .spawn((
                OrbitCamera::new(home.eye, home.focus, camera_rig.idle_bounds),
                home.transform(),
            ))
            .id();
        app.insert_resource(camera_rig)
            .insert_resource(controller)
            .insert_resource(Time::<()>::default())
            .add_systems(Update, camera_tween_system);

        let tick = |app: &mut App| {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(Duration::from_millis(400));
            app.update();
        };

        tick(&mut app);
        assert_eq!(
            app.world().resource::<SelectionController>().phase(),
            FocusPhase::Focusing
        );
        assert!(app.world().resource::<CameraRig>().is_animating());

        tick(&mut app);
        tick(&mut app);
        assert_eq!(
            app.world().resource::<SelectionController>().phase(),
            FocusPhase::Focused
        );
        assert!(!app.world().resource::<CameraRig>().is_animating());

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.abs_diff_eq(target.eye, 1e-4));
        let orbit = app.world().get::<OrbitCamera>(camera).unwrap();
        assert!(orbit.focus.abs_diff_eq(anchor, 1e-4));
    }
}
