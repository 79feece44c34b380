//! glTF model loading and load-state tracking.

use bevy::asset::LoadState;
use bevy::prelude::*;

/// Scene handles still loading for the current page.
#[derive(Resource, Default)]
pub struct PendingModels {
    handles: Vec<(String, Handle<Scene>)>,
}

impl PendingModels {
    pub fn track(&mut self, path: impl Into<String>, handle: Handle<Scene>) {
        self.handles.push((path.into(), handle));
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

/// Starts loading the first scene of a glTF file and tracks it.
pub fn load_model(
    asset_server: &AssetServer,
    pending: &mut PendingModels,
    path: &str,
) -> Handle<Scene> {
    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.to_string()));
    pending.track(path, handle.clone());
    handle
}

/// Drops settled handles. A failed model is logged and the page carries on without it.
pub fn track_model_loads(asset_server: Res<AssetServer>, mut pending: ResMut<PendingModels>) {
    if pending.is_empty() {
        return;
    }
    pending
        .handles
        .retain(|(path, handle)| match asset_server.load_state(handle.id()) {
            LoadState::Loaded => {
                debug!("model {path} loaded");
                false
            }
            LoadState::Failed(err) => {
                warn!("model {path} failed to load, continuing without it: {err}");
                false
            }
            _ => true,
        });
}
