//! Animatable value types
//!
//! Provides the [`Interpolate`] trait and implementations for scalars,
//! offsets, colors and composite [`StyleFrame`]s.

use vista_core::{Color, Vec2};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// Scalars
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t as f64
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon as f64
    }
}

// ============================================================================
// Vec2 / Color
// ============================================================================

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// Style Frame
// ============================================================================

/// Opacity, translation and scale of an element, interpolated together
///
/// This is the "small vector" output of scroll effects like the hero
/// section's fade-shrink-drift, where all three channels follow one progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleFrame {
    pub opacity: f32,
    pub offset: Vec2,
    pub scale: f32,
}

impl StyleFrame {
    /// Fully opaque, untranslated, unscaled
    pub const IDENTITY: StyleFrame = StyleFrame {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    pub const fn new(opacity: f32, offset: Vec2, scale: f32) -> Self {
        Self {
            opacity,
            offset,
            scale,
        }
    }

    /// Transparent and pushed down by `offset_y`: the pre-reveal state
    pub const fn hidden(offset_y: f32) -> Self {
        Self {
            opacity: 0.0,
            offset: Vec2::new(0.0, offset_y),
            scale: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for StyleFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Interpolate for StyleFrame {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        StyleFrame {
            opacity: self.opacity.lerp(&other.opacity, t),
            offset: self.offset.lerp(&other.offset, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.offset.approx_eq(&other.offset, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_interpolation() {
        let mid = Vec2::new(0.0, 100.0).lerp(&Vec2::new(-50.0, -100.0), 0.5);
        assert!(mid.approx_eq(&Vec2::new(-25.0, 0.0), 1e-6));
    }

    #[test]
    fn test_style_frame_interpolates_all_channels() {
        let from = StyleFrame::IDENTITY;
        let to = StyleFrame::new(0.0, Vec2::new(0.0, 200.0), 0.9);
        let mid = from.lerp(&to, 0.5);

        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.offset.y - 100.0).abs() < 1e-4);
        assert!((mid.scale - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_hidden_frame() {
        let hidden = StyleFrame::hidden(40.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.offset, Vec2::new(0.0, 40.0));
        assert_eq!(hidden.scale, 1.0);
    }
}
