use std::path::PathBuf;

use crate::detection::domain::object_detector::ObjectDetector;

/// Compute target for running the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Cpu,
    Gpu,
}

impl Backend {
    /// Control-plane selector mapping: 0 = cpu, 1 = gpu.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Backend::Cpu),
            1 => Some(Backend::Gpu),
            _ => None,
        }
    }

    pub fn is_accelerated(self) -> bool {
        self == Backend::Gpu
    }
}

/// Everything a detector implementation needs to load itself: the asset
/// directory, model identity, input geometry, normalization constants,
/// and the compute target.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    pub assets: PathBuf,
    pub name: &'static str,
    pub target_size: u32,
    pub means: [f32; 3],
    pub scales: [f32; 3],
    pub backend: Backend,
}

/// Builds a ready-to-run detector from a model spec.
///
/// This is the seam where the real inference collaborator attaches; the
/// gate owns whatever the factory returns and replaces it wholesale on
/// reconfiguration.
pub trait DetectorFactory: Send + Sync {
    fn load(&self, spec: &ModelSpec) -> Result<Box<dyn ObjectDetector>, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_index() {
        assert_eq!(Backend::from_index(0), Some(Backend::Cpu));
        assert_eq!(Backend::from_index(1), Some(Backend::Gpu));
        assert_eq!(Backend::from_index(2), None);
        assert_eq!(Backend::from_index(-1), None);
    }

    #[test]
    fn test_only_gpu_is_accelerated() {
        assert!(Backend::Gpu.is_accelerated());
        assert!(!Backend::Cpu.is_accelerated());
    }
}
