//! Preloaded-asset registry with built-in fallbacks.
//!
//! The hosting presentation preloads textures and hands them over by key.
//! The core never fails on a missing key: lookups fall back to a flat
//! material (or procedural geometry, for shapes) so a dropped asset costs
//! a decorative detail, not a scene.

use bevy::prelude::*;
use std::collections::HashMap;

/// Opaque mapping from resource identifier to preloaded handles.
///
/// Injected as a resource; never reachable as ambient global state.
#[derive(Resource, Default)]
pub struct SceneAssets {
    textures: HashMap<String, Handle<Image>>,
}

impl SceneAssets {
    /// Register a preloaded texture under a key.
    pub fn insert_texture(&mut self, key: impl Into<String>, handle: Handle<Image>) {
        self.textures.insert(key.into(), handle);
    }

    /// Look up a texture by key. Returns `None` if not registered.
    pub fn texture(&self, key: &str) -> Option<Handle<Image>> {
        self.textures.get(key).cloned()
    }

    /// Build a material for a keyed texture, falling back to a flat
    /// color when the key is absent.
    pub fn material_for(
        &self,
        key: &str,
        fallback_color: Color,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        match self.textures.get(key) {
            Some(texture) => materials.add(StandardMaterial {
                base_color_texture: Some(texture.clone()),
                perceptual_roughness: 0.8,
                ..default()
            }),
            None => {
                debug!("no texture registered for {key:?}; using flat material");
                materials.add(StandardMaterial {
                    base_color: fallback_color,
                    perceptual_roughness: 0.8,
                    ..default()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_returns_none() {
        let assets = SceneAssets::default();
        assert!(assets.texture("nonexistent").is_none());
    }

    #[test]
    fn test_registered_texture_is_returned() {
        let mut images = Assets::<Image>::default();
        let handle = images.add(Image::default());

        let mut assets = SceneAssets::default();
        assets.insert_texture("earth", handle.clone());
        assert_eq!(assets.texture("earth"), Some(handle));
        assert!(assets.texture("moon").is_none());
    }

    #[test]
    fn test_missing_key_falls_back_to_flat_material() {
        let assets = SceneAssets::default();
        let mut materials = Assets::<StandardMaterial>::default();
        let handle = assets.material_for("missing", Color::WHITE, &mut materials);
        let material = materials.get(&handle).unwrap();
        assert!(material.base_color_texture.is_none());
    }
}
