use std::path::Path;

use crate::detection::domain::detector_factory::{Backend, ModelSpec};
use crate::shared::constants::{MEAN_VALS, MODEL_BASE_URL, MODEL_NAMES, NORM_VALS, TARGET_SIZES};

/// Model variant, one per control-plane selector value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Tiny,
    Nano,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Darknet,
}

impl ModelKind {
    /// Control-plane selector mapping (0..=6).
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(ModelKind::Tiny),
            1 => Some(ModelKind::Nano),
            2 => Some(ModelKind::Small),
            3 => Some(ModelKind::Medium),
            4 => Some(ModelKind::Large),
            5 => Some(ModelKind::ExtraLarge),
            6 => Some(ModelKind::Darknet),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ModelKind::Tiny => 0,
            ModelKind::Nano => 1,
            ModelKind::Small => 2,
            ModelKind::Medium => 3,
            ModelKind::Large => 4,
            ModelKind::ExtraLarge => 5,
            ModelKind::Darknet => 6,
        }
    }

    pub fn name(self) -> &'static str {
        MODEL_NAMES[self.index()]
    }

    pub fn target_size(self) -> u32 {
        TARGET_SIZES[self.index()]
    }

    /// Weight asset file names (graph definition, weight blob).
    pub fn asset_files(self) -> (String, String) {
        (format!("{}.param", self.name()), format!("{}.bin", self.name()))
    }

    /// Download URLs for the weight assets.
    pub fn asset_urls(self) -> (String, String) {
        (
            format!("{MODEL_BASE_URL}/{}.param", self.name()),
            format!("{MODEL_BASE_URL}/{}.bin", self.name()),
        )
    }

    /// Full load spec for the detector factory.
    pub fn spec(self, assets: &Path, backend: Backend) -> ModelSpec {
        ModelSpec {
            assets: assets.to_path_buf(),
            name: self.name(),
            target_size: self.target_size(),
            means: MEAN_VALS,
            scales: NORM_VALS,
            backend,
        }
    }
}
