use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("camera facing {0} outside 0..=1")]
pub struct FacingInputError(pub i32);

/// Which physical camera to open. Index 0 is the world-facing camera,
/// index 1 the user-facing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraFacing {
    Back,
    Front,
}

impl CameraFacing {
    pub fn from_index(index: i32) -> Result<Self, FacingInputError> {
        match index {
            0 => Ok(CameraFacing::Back),
            1 => Ok(CameraFacing::Front),
            other => Err(FacingInputError(other)),
        }
    }

    pub fn index(self) -> i32 {
        match self {
            CameraFacing::Back => 0,
            CameraFacing::Front => 1,
        }
    }
}

/// Opens a frame source for a given camera facing.
pub trait CameraProvider: Send + Sync {
    fn open(&self, facing: CameraFacing) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_from_index() {
        assert_eq!(CameraFacing::from_index(0), Ok(CameraFacing::Back));
        assert_eq!(CameraFacing::from_index(1), Ok(CameraFacing::Front));
    }

    #[test]
    fn test_invalid_facing_rejected() {
        assert_eq!(CameraFacing::from_index(-1), Err(FacingInputError(-1)));
        assert_eq!(CameraFacing::from_index(2), Err(FacingInputError(2)));
    }

    #[test]
    fn test_index_round_trip() {
        for i in 0..=1 {
            assert_eq!(CameraFacing::from_index(i).unwrap().index(), i);
        }
    }
}
