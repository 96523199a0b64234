//! Host-facing control plane.
//!
//! Mirrors a foreign-function surface: raw integer selectors in, a bare
//! success boolean out. Validation failures are logged and reported as
//! `false` without touching any runtime state; richer errors stay inside
//! the crate.

use crate::capture::domain::camera_provider::CameraFacing;
use crate::capture::domain::render_sink::RenderSink;
use crate::context::CameraContext;
use crate::detection::domain::detector_factory::Backend;
use crate::detection::domain::model::ModelKind;
use crate::pipeline::sampling::SamplingRate;
use crate::shared::feature_flags::FeatureFlags;

/// Validate the raw selectors and swap the detector configuration.
///
/// `model` selects the variant (0..=6), `backend` the compute target
/// (0 = cpu, 1 = gpu), `sampling` the detection cadence (0..=9, meaning
/// every `sampling + 1` frames). Any out-of-range selector fails the
/// whole call before anything is loaded.
pub fn load_model(
    ctx: &CameraContext,
    model: i32,
    backend: i32,
    sampling: i32,
    flags: FeatureFlags,
) -> bool {
    let Some(model) = ModelKind::from_index(model) else {
        log::error!("rejecting model selector {model}");
        return false;
    };
    let Some(backend) = Backend::from_index(backend) else {
        log::error!("rejecting backend selector {backend}");
        return false;
    };
    let sampling = match SamplingRate::from_input(sampling) {
        Ok(rate) => rate,
        Err(e) => {
            log::error!("rejecting sampling selector: {e}");
            return false;
        }
    };

    log::debug!(
        "load_model: {} backend {:?} every {} frame(s) flags {:?}",
        model.name(),
        backend,
        sampling.get(),
        flags
    );
    match ctx.load_model(model, backend, sampling, flags) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{e}");
            false
        }
    }
}

/// Open the camera behind selector `facing` (0 = back, 1 = front).
pub fn open_camera(ctx: &mut CameraContext, facing: i32) -> bool {
    let facing = match CameraFacing::from_index(facing) {
        Ok(facing) => facing,
        Err(e) => {
            log::error!("rejecting camera selector: {e}");
            return false;
        }
    };
    match ctx.open_camera(facing) {
        Ok(()) => true,
        Err(e) => {
            log::error!("failed to open camera: {e}");
            false
        }
    }
}

/// Close the camera. Always succeeds, open or not.
pub fn close_camera(ctx: &mut CameraContext) -> bool {
    ctx.close_camera();
    true
}

/// Point rendering at a new output, or detach it with `None`.
pub fn set_output_window(ctx: &mut CameraContext, sink: Option<Box<dyn RenderSink>>) -> bool {
    ctx.set_output_window(sink);
    true
}
