//! Shared material and color helpers for the procedural models.

use bevy::prelude::*;

pub const NODE_GREEN: Color = Color::srgb(0.0, 1.0, 0.0);
pub const NODE_BLUE: Color = Color::srgb(0.0, 0.0, 1.0);
pub const ROUTER_RED: Color = Color::srgb(1.0, 0.0, 0.0);
pub const PACKET_RED: Color = Color::srgb(1.0, 0.0, 0.0);
pub const LINK_WHITE: Color = Color::WHITE;

/// Flat, unlit material so the diagram reads the same from every angle.
pub fn flat_material(
    materials: &mut Assets<StandardMaterial>,
    color: Color,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    })
}
