use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("sampling input {0} outside 0..=9")]
pub struct SamplingInputError(pub i32);

/// Detection cadence: run inference once every `rate` frames.
///
/// The host-facing input is off by one from the internal rate: input 0
/// means detect every frame, input 9 every 10th frame. That mapping is
/// part of the control contract and must not drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingRate(u32);

impl SamplingRate {
    pub const MAX_INPUT: i32 = 9;

    /// Map a host-facing sampling input (0..=9) to a rate (input + 1).
    pub fn from_input(input: i32) -> Result<Self, SamplingInputError> {
        if !(0..=Self::MAX_INPUT).contains(&input) {
            return Err(SamplingInputError(input));
        }
        Ok(Self(input as u32 + 1))
    }

    /// Rate 1: detect on every frame.
    pub fn every_frame() -> Self {
        Self(1)
    }

    /// Frames per detection invocation; always >= 1.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SamplingRate {
    fn default() -> Self {
        Self::every_frame()
    }
}
