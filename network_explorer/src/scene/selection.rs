//! Single-slot selection with a side-table of original transforms.

use std::collections::HashMap;

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

/// Marks an entity the pointer can select. `key` selects the overlay content.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Selectable {
    pub key: String,
}

impl Selectable {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusPhase {
    #[default]
    Idle,
    Focusing,
    Focused,
}

/// What a controller call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionChange {
    /// `anchor` is the object's original translation, the point to focus on.
    Selected { entity: Entity, anchor: Vec3 },
    Deselected { entity: Entity },
    /// The clicked entity has no transform any more.
    Ignored,
}

/// Mutable transform lookup the controller works through.
pub trait TransformAccess {
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform>;
}

impl<F: QueryFilter> TransformAccess for Query<'_, '_, &mut Transform, F> {
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.get_mut(entity).ok().map(Mut::into_inner)
    }
}

impl TransformAccess for HashMap<Entity, Transform> {
    fn transform_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.get_mut(&entity)
    }
}

/// Tracks the active selection and restores displaced objects.
#[derive(Resource, Debug)]
pub struct SelectionController {
    active: Option<Entity>,
    originals: HashMap<Entity, Transform>,
    phase: FocusPhase,
    /// Distance the selected object moves along its local X axis.
    pub pop_out: f32,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(6.0)
    }
}

impl SelectionController {
    pub fn new(pop_out: f32) -> Self {
        Self {
            active: None,
            originals: HashMap::new(),
            phase: FocusPhase::Idle,
            pop_out,
        }
    }

    pub fn active(&self) -> Option<Entity> {
        self.active
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn original(&self, entity: Entity) -> Option<&Transform> {
        self.originals.get(&entity)
    }

    /// Click semantics: the active entity toggles off, anything else is selected.
    pub fn click(&mut self, entity: Entity, transforms: &mut impl TransformAccess) -> SelectionChange {
        if self.active == Some(entity) {
            self.clear(transforms);
            return SelectionChange::Deselected { entity };
        }
        self.select(entity, transforms)
    }

    /// Reverts the previous selection, then pops `entity` out.
    pub fn select(&mut self, entity: Entity, transforms: &mut impl TransformAccess) -> SelectionChange {
        self.clear(transforms);

        let Some(transform) = transforms.transform_mut(entity) else {
            return SelectionChange::Ignored;
        };
        let original = *self.originals.entry(entity).or_insert(*transform);

        *transform = original;
        transform.translation += transform.local_x().as_vec3() * self.pop_out;

        self.active = Some(entity);
        self.phase = FocusPhase::Focusing;
        SelectionChange::Selected {
            entity,
            anchor: original.translation,
        }
    }

    /// Restores the active entity, if any, and returns to idle.
    pub fn clear(&mut self, transforms: &mut impl TransformAccess) -> Option<Entity> {
        let entity = self.active.take()?;
        self.phase = FocusPhase::Idle;
        if let (Some(original), Some(transform)) =
            (self.originals.get(&entity), transforms.transform_mut(entity))
        {
            *transform = *original;
        }
        Some(entity)
    }

    /// Called when the focus tween completes.
    pub fn settle(&mut self) {
        if self.phase == FocusPhase::Focusing && self.active.is_some() {
            self.phase = FocusPhase::Focused;
        }
    }

    /// Drops all bookkeeping without touching transforms. Used when the
    /// entities it refers to are despawned.
    pub fn forget(&mut self) {
        self.active = None;
        self.originals.clear();
        self.phase = FocusPhase::Idle;
    }

    /// Drops bookkeeping for one despawned entity.
    pub fn forget_entity(&mut self, entity: Entity) {
        if self.active == Some(entity) {
            self.active = None;
            self.phase = FocusPhase::Idle;
        }
        self.originals.remove(&entity);
    }
}
