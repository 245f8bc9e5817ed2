//! Per-element GUI scale.
//!
//! Scales are stored normalized to `[0, 1]` (the slider position) and mapped
//! into `[GUI_SCALE_MINIMUM, GUI_SCALE_MAXIMUM]` for rendering.  Values within
//! 5% of `1.0` snap to exactly `1.0` so a slider dragged close to "no scaling"
//! lands on it.

pub const GUI_SCALE_MINIMUM: f32 = 0.5;
pub const GUI_SCALE_MAXIMUM: f32 = 5.0;

const SNAP_BAND: f32 = 0.05;

/// Collapses values inside the snap band around `1.0` to `1.0`.
pub fn snap_near_default(value: f32) -> f32 {
    if value != 1.0 && value > 1.0 - SNAP_BAND && value < 1.0 + SNAP_BAND {
        return 1.0;
    }
    value
}

/// Maps a real scale into the normalized `[0, 1]` range.
pub fn normalize_scale(real: f32) -> f32 {
    ((snap_near_default(real) - GUI_SCALE_MINIMUM) / (GUI_SCALE_MAXIMUM - GUI_SCALE_MINIMUM))
        .clamp(0.0, 1.0)
}

/// Maps a normalized value back into the real scale range.
pub fn denormalize_scale(normalized: f32) -> f32 {
    snap_near_default(
        GUI_SCALE_MINIMUM + (GUI_SCALE_MAXIMUM - GUI_SCALE_MINIMUM) * normalized.clamp(0.0, 1.0),
    )
}

/// Normalized scale of an element the user never resized.
pub fn default_normalized_scale() -> f32 {
    normalize_scale(1.0)
}
