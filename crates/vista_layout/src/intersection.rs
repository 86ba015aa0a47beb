//! Viewport intersection
//!
//! A [`RootMargin`] grows or shrinks the viewport before intersection is
//! tested, using CSS margin shorthand: `"-50px"` shrinks every edge by 50px,
//! so an element only counts as visible once it is 50px inside the viewport.

use std::str::FromStr;

use vista_core::{Rect, Result, VistaError};

use crate::viewport::Viewport;

/// One margin edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginValue {
    Px(f32),
    /// Percentage of the viewport's height (top/bottom) or width (left/right)
    Percent(f32),
}

impl MarginValue {
    fn resolve(&self, extent: f32) -> f32 {
        match *self {
            MarginValue::Px(px) => px,
            MarginValue::Percent(pct) => extent * pct / 100.0,
        }
    }

    fn parse(token: &str) -> Result<Self> {
        let invalid = || VistaError::InvalidMargin(format!("cannot parse {token:?}"));

        let (number, unit): (&str, fn(f32) -> MarginValue) =
            if let Some(number) = token.strip_suffix("px") {
                (number, MarginValue::Px)
            } else if let Some(number) = token.strip_suffix('%') {
                (number, MarginValue::Percent)
            } else {
                // Only a bare zero may omit its unit
                (token, MarginValue::Px)
            };

        let value: f32 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        if !token.ends_with("px") && !token.ends_with('%') && value != 0.0 {
            return Err(invalid());
        }
        Ok(unit(value))
    }
}

/// Margin applied around the viewport before testing intersection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin::px(0.0);

    /// The same pixel margin on every edge
    pub const fn px(px: f32) -> Self {
        Self {
            top: MarginValue::Px(px),
            right: MarginValue::Px(px),
            bottom: MarginValue::Px(px),
            left: MarginValue::Px(px),
        }
    }

    /// Parse CSS margin shorthand with one to four values
    pub fn parse(source: &str) -> Result<Self> {
        let values = source
            .split_whitespace()
            .map(MarginValue::parse)
            .collect::<Result<Vec<_>>>()?;

        let [top, right, bottom, left] = match values.as_slice() {
            [all] => [*all; 4],
            [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
            [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
            [top, right, bottom, left] => [*top, *right, *bottom, *left],
            _ => {
                return Err(VistaError::InvalidMargin(format!(
                    "expected 1 to 4 values, got {:?}",
                    source
                )))
            }
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// The viewport rectangle with this margin applied
    pub fn apply(&self, viewport: &Viewport) -> Rect {
        viewport.rect().expand(
            self.top.resolve(viewport.height),
            self.right.resolve(viewport.width),
            self.bottom.resolve(viewport.height),
            self.left.resolve(viewport.width),
        )
    }

    /// Whether `bounds` intersects the margin-adjusted viewport
    pub fn intersects(&self, bounds: &Rect, viewport: &Viewport) -> bool {
        bounds.intersects(&self.apply(viewport))
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = VistaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
