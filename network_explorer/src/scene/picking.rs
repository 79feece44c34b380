//! Pointer picking: click a mesh, resolve the selectable it belongs to.
//!
//! Uses manual ray-AABB intersection instead of Bevy's mesh picking to avoid
//! input absorption conflicts with bevy_egui.

use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy_egui::EguiContexts;

use crate::scene::selection::Selectable;

/// A pointer press landed on a selectable object.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct SelectionClicked {
    pub entity: Entity,
    pub key: String,
}

#[allow(clippy::too_many_arguments)]
pub fn pick_selectable_system(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    meshes: Query<(Entity, &GlobalTransform, &Aabb)>,
    parents: Query<&Parent>,
    selectables: Query<&Selectable>,
    mut clicks: EventWriter<SelectionClicked>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    if contexts.ctx_mut().is_pointer_over_area() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, cursor_pos) else {
        return;
    };

    let ray_origin = ray.origin;
    let ray_dir: Vec3 = *ray.direction;

    let mut best_hit: Option<(Entity, f32)> = None;
    for (entity, transform, aabb) in &meshes {
        if let Some(dist) = ray_aabb_test(ray_origin, ray_dir, transform, aabb) {
            if best_hit.is_none_or(|(_, d)| dist < d) {
                best_hit = Some((entity, dist));
            }
        }
    }

    let Some((hit_entity, _)) = best_hit else {
        return;
    };

    let Some(owner) = selectable_ancestor(hit_entity, |e| parents.get(e).ok().map(Parent::get), |e| {
        selectables.contains(e)
    }) else {
        return;
    };
    if let Ok(selectable) = selectables.get(owner) {
        clicks.send(SelectionClicked {
            entity: owner,
            key: selectable.key.clone(),
        });
    }
}

/// Walks from `entity` up through its parents to the first selectable.
pub fn selectable_ancestor(
    entity: Entity,
    parent_of: impl Fn(Entity) -> Option<Entity>,
    is_selectable: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let mut current = Some(entity);
    while let Some(e) = current {
        if is_selectable(e) {
            return Some(e);
        }
        current = parent_of(e);
    }
    None
}

/// World-space AABB of a local box under a full affine transform.
pub fn world_aabb(transform: &GlobalTransform, aabb: &Aabb) -> (Vec3, Vec3) {
    let center: Vec3 = aabb.center.into();
    let half: Vec3 = aabb.half_extents.into();
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for corner in 0..8u8 {
        let sign = Vec3::new(
            if corner & 1 == 0 { -1.0 } else { 1.0 },
            if corner & 2 == 0 { -1.0 } else { 1.0 },
            if corner & 4 == 0 { -1.0 } else { 1.0 },
        );
        let world = transform.transform_point(center + half * sign);
        min = min.min(world);
        max = max.max(world);
    }
    (min, max)
}

fn ray_aabb_test(
    ray_origin: Vec3,
    ray_dir: Vec3,
    transform: &GlobalTransform,
    aabb: &Aabb,
) -> Option<f32> {
    let (aabb_min, aabb_max) = world_aabb(transform, aabb);
    ray_aabb_intersect(ray_origin, ray_dir, aabb_min, aabb_max)
}

pub fn ray_aabb_intersect(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let inv_dir = 1.0 / dir;
    let t1 = (aabb_min - origin) * inv_dir;
    let t2 = (aabb_max - origin) * inv_dir;
    let t_min = t1.min(t2);
    let t_max = t1.max(t2);
    let t_enter = t_min.x.max(t_min.y).max(t_min.z);
    let t_exit = t_max.x.min(t_max.y).min(t_max.z);
    if t_enter <= t_exit && t_exit > 0.0 {
        Some(t_enter.max(0.0))
    } else {
        None
    }
}
