//! Breakpoint mapping
//!
//! A [`Mapper`] turns a progress value into an output value by piecewise
//! linear interpolation over an ordered set of breakpoints. It is how scroll
//! progress becomes parallax offsets, fades and progress-bar widths:
//!
//! ```rust
//! use vista_animation::Mapper;
//!
//! // Hero fades out over the first half of its scroll range
//! let opacity = Mapper::new([(0.0, 1.0f32), (0.5, 0.0)]).unwrap();
//! assert_eq!(opacity.map(0.25), 0.5);
//! assert_eq!(opacity.map(0.9), 0.0); // clamps past the last breakpoint
//! ```
//!
//! Mappers are immutable and hold no state between calls, so the same mapper
//! can be evaluated every frame or shared across threads.

use smallvec::SmallVec;
use vista_core::{Result, VistaError};

use crate::values::Interpolate;

/// One `(input, output)` pair of a mapper
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint<T> {
    pub input: f32,
    pub output: T,
}

/// Piecewise-linear map from progress to `T`
#[derive(Clone, Debug)]
pub struct Mapper<T: Interpolate> {
    breakpoints: SmallVec<[Breakpoint<T>; 4]>,
}

impl<T: Interpolate> Mapper<T> {
    /// Build a mapper from `(input, output)` pairs
    ///
    /// Requires at least two pairs with finite inputs in non-decreasing order.
    pub fn new(points: impl IntoIterator<Item = (f32, T)>) -> Result<Self> {
        let breakpoints: SmallVec<[Breakpoint<T>; 4]> = points
            .into_iter()
            .map(|(input, output)| Breakpoint { input, output })
            .collect();

        if breakpoints.len() < 2 {
            return Err(VistaError::InvalidBreakpoints(format!(
                "need at least 2 breakpoints, got {}",
                breakpoints.len()
            )));
        }
        if let Some(bad) = breakpoints.iter().find(|b| !b.input.is_finite()) {
            return Err(VistaError::InvalidBreakpoints(format!(
                "breakpoint input {} is not finite",
                bad.input
            )));
        }
        if let Some(pair) = breakpoints.windows(2).find(|w| w[1].input < w[0].input) {
            return Err(VistaError::InvalidBreakpoints(format!(
                "inputs must be non-decreasing ({} follows {})",
                pair[1].input, pair[0].input
            )));
        }

        Ok(Self { breakpoints })
    }

    /// Two-point mapper, the `[x0, x1] -> [y0, y1]` case
    pub fn linear(input: [f32; 2], output: [T; 2]) -> Result<Self> {
        let [y0, y1] = output;
        Self::new([(input[0], y0), (input[1], y1)])
    }

    /// Map `p` to an output value
    ///
    /// Inputs outside the breakpoint range clamp to the first/last output;
    /// a zero-width bracket resolves to its lower output. NaN maps to the
    /// first output.
    pub fn map(&self, p: f32) -> T {
        let first = &self.breakpoints[0];
        let last = &self.breakpoints[self.breakpoints.len() - 1];

        if p.is_nan() || p <= first.input {
            return first.output.clone();
        }
        if p >= last.input {
            return last.output.clone();
        }

        for pair in self.breakpoints.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if lo.input <= p && p <= hi.input {
                let width = hi.input - lo.input;
                if width == 0.0 {
                    return lo.output.clone();
                }
                let t = (p - lo.input) / width;
                return lo.output.lerp(&hi.output, t);
            }
        }

        // Unreachable with sorted breakpoints and first < p < last
        last.output.clone()
    }

    /// The breakpoints, in input order
    pub fn breakpoints(&self) -> &[Breakpoint<T>] {
        &self.breakpoints
    }
}

/// Map `p` from `input` to `output` with clamping, without building a [`Mapper`]
///
/// A degenerate input range (`input[0] == input[1]`) yields `output[0]`.
pub fn map_range(p: f32, input: [f32; 2], output: [f32; 2]) -> f32 {
    let [x0, x1] = input;
    let [y0, y1] = output;
    if p.is_nan() || p <= x0 || x1 <= x0 {
        return y0;
    }
    if p >= x1 {
        return y1;
    }
    y0 + (p - x0) / (x1 - x0) * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::StyleFrame;
    use vista_core::{Color, Vec2};

    #[test]
    fn test_midpoint() {
        let mapper = Mapper::new([(0.0, 0.0f32), (1.0, 200.0)]).unwrap();
        assert_eq!(mapper.map(0.5), 100.0);
    }

    #[test]
    fn test_clamps_outside_range() {
        let mapper = Mapper::new([(0.2, -50.0f32), (0.5, 0.0)]).unwrap();
        assert_eq!(mapper.map(0.0), -50.0);
        assert_eq!(mapper.map(0.2), -50.0);
        assert_eq!(mapper.map(0.5), 0.0);
        assert_eq!(mapper.map(1.0), 0.0);
        assert_eq!(mapper.map(f32::NAN), -50.0);
    }

    #[test]
    fn test_output_stays_within_breakpoint_range() {
        let mapper = Mapper::new([
            (0.0, 100.0f32),
            (0.25, -100.0),
            (0.5, 40.0),
            (0.5, 60.0),
            (1.0, 0.0),
        ])
        .unwrap();

        for i in 0..=1000 {
            let p = i as f32 / 1000.0;
            let y = mapper.map(p);
            assert!(
                (-100.0 - 1e-3..=100.0 + 1e-3).contains(&y),
                "map({p}) = {y} escaped the output range"
            );
        }
    }

    #[test]
    fn test_zero_width_bracket_returns_lower_output() {
        let mapper = Mapper::new([(0.0, 0.0f32), (0.5, 10.0), (0.5, 20.0), (1.0, 30.0)]).unwrap();
        // On the duplicated input the left segment already ends at 10
        assert_eq!(mapper.map(0.5), 10.0);
        // Just past it, interpolation continues from the upper duplicate
        assert!((mapper.map(0.75) - 25.0).abs() < 1e-4);

        let flat = Mapper::new([(0.3, 1.0f32), (0.3, 2.0)]).unwrap();
        assert_eq!(flat.map(0.3), 1.0);
        assert_eq!(flat.map(0.31), 2.0);
    }

    #[test]
    fn test_multi_segment() {
        let mapper = Mapper::new([(0.0, 0.0f32), (0.5, 100.0), (1.0, 0.0)]).unwrap();
        assert!((mapper.map(0.25) - 50.0).abs() < 1e-4);
        assert!((mapper.map(0.75) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_breakpoints() {
        assert!(matches!(
            Mapper::new([(0.0, 1.0f32)]),
            Err(VistaError::InvalidBreakpoints(_))
        ));
        assert!(matches!(
            Mapper::new([(1.0, 0.0f32), (0.0, 1.0)]),
            Err(VistaError::InvalidBreakpoints(_))
        ));
        assert!(matches!(
            Mapper::new([(0.0, 0.0f32), (f32::INFINITY, 1.0)]),
            Err(VistaError::InvalidBreakpoints(_))
        ));
    }

    #[test]
    fn test_maps_colors_and_frames() {
        let color = Mapper::linear([0.0, 1.0], [Color::BLACK, Color::WHITE]).unwrap();
        assert_eq!(color.map(0.5).to_array(), [0.5, 0.5, 0.5, 1.0]);

        let hero = Mapper::linear(
            [0.0, 0.5],
            [
                StyleFrame::IDENTITY,
                StyleFrame::new(0.0, Vec2::new(0.0, 100.0), 0.9),
            ],
        )
        .unwrap();
        let frame = hero.map(0.25);
        assert!((frame.opacity - 0.5).abs() < 1e-6);
        assert!((frame.scale - 0.95).abs() < 1e-6);
        assert!((frame.offset.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.5, [0.0, 1.0], [0.0, 100.0]), 50.0);
        assert_eq!(map_range(-1.0, [0.0, 1.0], [0.0, 100.0]), 0.0);
        assert_eq!(map_range(2.0, [0.0, 1.0], [0.0, 100.0]), 100.0);
        assert_eq!(map_range(0.4, [0.4, 0.4], [7.0, 9.0]), 7.0);
    }
}
