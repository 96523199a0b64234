/// Host-controlled toggles threaded through configuration into drawing
/// and notification.
///
/// The upstream host passed these through without interpreting all of
/// them; here `enabled` gates the detection overlay, `dataset` suppresses
/// text labels (box-only output), and `delegate` activates the score
/// notification channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub enabled: bool,
    pub delegate: bool,
    pub dataset: bool,
}

impl FeatureFlags {
    pub fn new(enabled: bool, delegate: bool, dataset: bool) -> Self {
        Self {
            enabled,
            delegate,
            dataset,
        }
    }

    /// Overlay drawn, no notification, labels on.
    pub fn overlay_only() -> Self {
        Self::new(true, false, false)
    }
}
