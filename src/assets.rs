//! Key-addressed asset cache
//!
//! Full visual mode asks for a fixed set of textures and models. Each request
//! either yields an asset or records its absence; neither case is an error,
//! and gameplay falls back to primitives whenever something is missing.
//! Loading itself belongs to the host through [`AssetLoader`].

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::{ModelSet, ObstacleKind};

/// What kind of asset a request is for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AssetKind {
    /// Image texture, tiled `repeat` times along (u, v)
    Texture { repeat: (f32, f32) },
    /// 3D model
    Model,
}

/// One entry of the full-mode asset set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetRequest {
    pub key: &'static str,
    pub url: &'static str,
    pub kind: AssetKind,
}

/// Everything full mode tries to load
pub const FULL_ASSET_SET: [AssetRequest; 6] = [
    AssetRequest {
        key: "ground",
        url: "/textures/ground2.jpg",
        kind: AssetKind::Texture {
            repeat: (12.0, 1.0),
        },
    },
    AssetRequest {
        key: "badger",
        url: "/textures/badger.jpg",
        kind: AssetKind::Texture {
            repeat: (1.0, 1.0),
        },
    },
    AssetRequest {
        key: "coin",
        url: "/models/coin.glb",
        kind: AssetKind::Model,
    },
    AssetRequest {
        key: "wall",
        url: "/models/obstacle_wall.glb",
        kind: AssetKind::Model,
    },
    AssetRequest {
        key: "hurdle",
        url: "/models/obstacle_hurdle.glb",
        kind: AssetKind::Model,
    },
    AssetRequest {
        key: "overhead",
        url: "/models/obstacle_overhead.glb",
        kind: AssetKind::Model,
    },
];

/// A successfully loaded asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Asset {
    Texture { url: String, repeat: (f32, f32) },
    /// Model with the extents of its bounding box
    Model { url: String, size: Vec3 },
}

/// Host-side loading capability
pub trait AssetLoader {
    /// Load a texture; `None` if it is unavailable
    fn load_texture(&mut self, url: &str, repeat: (f32, f32)) -> Option<Asset>;

    /// Load a model; `None` if it is unavailable
    fn load_model(&mut self, url: &str) -> Option<Asset>;
}

/// Loader with nothing available (prototype-only hosts, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLoader;

impl AssetLoader for NullLoader {
    fn load_texture(&mut self, _url: &str, _repeat: (f32, f32)) -> Option<Asset> {
        None
    }

    fn load_model(&mut self, _url: &str) -> Option<Asset> {
        None
    }
}

/// Loader answering from assets the host already fetched.
///
/// Models are registered by URL with their bounding box extents.
#[derive(Debug, Clone, Default)]
pub struct PreloadedAssets {
    textures: HashSet<String>,
    models: HashMap<String, Vec3>,
    requests: usize,
}

impl PreloadedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture(mut self, url: impl Into<String>) -> Self {
        self.textures.insert(url.into());
        self
    }

    pub fn with_model(mut self, url: impl Into<String>, size: Vec3) -> Self {
        self.models.insert(url.into(), size);
        self
    }

    /// Every URL of the full set, with the given model size
    pub fn everything(size: Vec3) -> Self {
        FULL_ASSET_SET.iter().fold(Self::new(), |loader, req| match req.kind {
            AssetKind::Texture { .. } => loader.with_texture(req.url),
            AssetKind::Model => loader.with_model(req.url, size),
        })
    }

    /// Number of load calls served so far
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl AssetLoader for PreloadedAssets {
    fn load_texture(&mut self, url: &str, repeat: (f32, f32)) -> Option<Asset> {
        self.requests += 1;
        self.textures.contains(url).then(|| Asset::Texture {
            url: url.to_string(),
            repeat,
        })
    }

    fn load_model(&mut self, url: &str) -> Option<Asset> {
        self.requests += 1;
        self.models.get(url).map(|&size| Asset::Model {
            url: url.to_string(),
            size,
        })
    }
}

/// Results of each key, loaded at most once
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    entries: HashMap<&'static str, Option<Asset>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `req` unless already attempted. Returns the cached result.
    pub fn ensure(&mut self, req: &AssetRequest, loader: &mut dyn AssetLoader) -> Option<&Asset> {
        self.entries
            .entry(req.key)
            .or_insert_with(|| {
                let asset = match req.kind {
                    AssetKind::Texture { repeat } => loader.load_texture(req.url, repeat),
                    AssetKind::Model => loader.load_model(req.url),
                };
                if asset.is_none() {
                    log::warn!("Asset '{}' unavailable ({}), using primitive", req.key, req.url);
                }
                asset
            })
            .as_ref()
    }

    /// Attempt every asset of the full set
    pub fn ensure_full_set(&mut self, loader: &mut dyn AssetLoader) {
        for req in &FULL_ASSET_SET {
            self.ensure(req, loader);
        }
    }

    /// Cached asset for `key`, if loaded
    pub fn get(&self, key: &str) -> Option<&Asset> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Whether `key` was attempted (present or absent)
    pub fn attempted(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn model_size(&self, key: &str) -> Option<Vec3> {
        match self.get(key) {
            Some(Asset::Model { size, .. }) => Some(*size),
            _ => None,
        }
    }

    /// Model availability for the simulation
    pub fn model_set(&self) -> ModelSet {
        let obstacle = |kind: ObstacleKind| self.model_size(kind.model_key());
        ModelSet {
            hurdle: obstacle(ObstacleKind::Hurdle),
            wall: obstacle(ObstacleKind::Wall),
            overhead: obstacle(ObstacleKind::Overhead),
            coin: self.model_size("coin").is_some(),
        }
    }

    pub fn has_texture(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Asset::Texture { .. }))
    }
}
