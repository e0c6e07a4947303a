//! Animatable properties and how tasks reach them
//!
//! The core never touches pixels. A task writes plain floats through an
//! [`AnimatedProperty`], and the host decides what that float means on screen.

use cadence_core::{CadenceError, Element};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Smallest change worth animating for pixel based properties
pub const MIN_VISIBLE_CHANGE_PIXELS: f64 = 1.0;
/// Smallest change worth animating for rotations, in degrees
pub const MIN_VISIBLE_CHANGE_ROTATION_DEGREES: f64 = 1.0 / 10.0;
/// Smallest change worth animating for alpha
pub const MIN_VISIBLE_CHANGE_ALPHA: f64 = 1.0 / 256.0;
/// Smallest change worth animating for scale factors
pub const MIN_VISIBLE_CHANGE_SCALE: f64 = 1.0 / 500.0;

/// Element properties a task can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewProperty {
    TranslationX,
    TranslationY,
    TranslationZ,
    ScaleX,
    ScaleY,
    Rotation,
    RotationX,
    RotationY,
    X,
    Y,
    Z,
    Alpha,
    ScrollX,
    ScrollY,
}

impl ViewProperty {
    pub const ALL: [ViewProperty; 14] = [
        ViewProperty::TranslationX,
        ViewProperty::TranslationY,
        ViewProperty::TranslationZ,
        ViewProperty::ScaleX,
        ViewProperty::ScaleY,
        ViewProperty::Rotation,
        ViewProperty::RotationX,
        ViewProperty::RotationY,
        ViewProperty::X,
        ViewProperty::Y,
        ViewProperty::Z,
        ViewProperty::Alpha,
        ViewProperty::ScrollX,
        ViewProperty::ScrollY,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewProperty::TranslationX => "translation_x",
            ViewProperty::TranslationY => "translation_y",
            ViewProperty::TranslationZ => "translation_z",
            ViewProperty::ScaleX => "scale_x",
            ViewProperty::ScaleY => "scale_y",
            ViewProperty::Rotation => "rotation",
            ViewProperty::RotationX => "rotation_x",
            ViewProperty::RotationY => "rotation_y",
            ViewProperty::X => "x",
            ViewProperty::Y => "y",
            ViewProperty::Z => "z",
            ViewProperty::Alpha => "alpha",
            ViewProperty::ScrollX => "scroll_x",
            ViewProperty::ScrollY => "scroll_y",
        }
    }

    /// Default equilibrium sensitivity for this property
    pub fn min_visible_change(self) -> f64 {
        match self {
            ViewProperty::Rotation | ViewProperty::RotationX | ViewProperty::RotationY => {
                MIN_VISIBLE_CHANGE_ROTATION_DEGREES
            }
            ViewProperty::ScaleX | ViewProperty::ScaleY => MIN_VISIBLE_CHANGE_SCALE,
            ViewProperty::Alpha => MIN_VISIBLE_CHANGE_ALPHA,
            _ => MIN_VISIBLE_CHANGE_PIXELS,
        }
    }
}

impl FromStr for ViewProperty {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewProperty::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| CadenceError::invalid_argument(format!("unknown view property '{s}'")))
    }
}

/// A float the host exposes for animation
pub trait AnimatedProperty: Send + Sync {
    fn get(&self) -> f64;
    fn set(&self, value: f64);
}

/// Resolves element properties to live bindings.
///
/// Implemented by the host; the choreographer calls it once per
/// (element, property) pair it instantiates a task for.
pub trait PropertyBinder: Send + Sync {
    fn bind(&self, element: &Element, property: ViewProperty) -> Arc<dyn AnimatedProperty>;
}

/// A standalone float not attached to any element
#[derive(Debug, Default)]
pub struct ValueHolder {
    bits: AtomicU64,
}

impl ValueHolder {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn shared(value: f64) -> Arc<Self> {
        Arc::new(Self::new(value))
    }
}

impl AnimatedProperty for ValueHolder {
    fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}
