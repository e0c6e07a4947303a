//! Animation presets for common entrance animations
//!
//! Pre-built tween templates that can be handed straight to a choreographer.

use crate::easing::Easing;
use crate::property::ViewProperty;
use crate::tween::TweenTemplate;

const GROW_SCALE: f64 = 1.5;
const SHRINK_SCALE: f64 = 0.1;
const ORIGINAL_SCALE: f64 = 1.0;
const FADE_AWAY_TO: f64 = 0.0;
const FADE_IN_TO: f64 = 1.0;
const START_ROTATION: f64 = 0.0;
const END_ROTATION: f64 = 360.0;

/// Pre-built tween templates
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Scale animations
    // ========================================================================

    /// Start enlarged and settle to the original size
    pub fn grow(duration_ms: u64) -> TweenTemplate {
        TweenTemplate::new(duration_ms)
            .animate_from(ViewProperty::ScaleX, GROW_SCALE, ORIGINAL_SCALE)
            .animate_from(ViewProperty::ScaleY, GROW_SCALE, ORIGINAL_SCALE)
    }

    /// Start tiny and expand to the original size
    pub fn shrink(duration_ms: u64) -> TweenTemplate {
        TweenTemplate::new(duration_ms)
            .animate_from(ViewProperty::ScaleX, SHRINK_SCALE, ORIGINAL_SCALE)
            .animate_from(ViewProperty::ScaleY, SHRINK_SCALE, ORIGINAL_SCALE)
    }

    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade from the current alpha to transparent
    pub fn fade_away(duration_ms: u64) -> TweenTemplate {
        TweenTemplate::new(duration_ms).animate(ViewProperty::Alpha, FADE_AWAY_TO)
    }

    /// Fade from the current alpha to opaque
    pub fn fade_in(duration_ms: u64) -> TweenTemplate {
        TweenTemplate::new(duration_ms).animate(ViewProperty::Alpha, FADE_IN_TO)
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    /// One full turn
    pub fn spin(duration_ms: u64) -> TweenTemplate {
        TweenTemplate::new(duration_ms)
            .animate_from(ViewProperty::Rotation, START_ROTATION, END_ROTATION)
            .easing(Easing::EASE_IN_OUT)
    }
}
