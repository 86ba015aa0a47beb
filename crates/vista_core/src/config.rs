//! Engine configuration presets.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VistaError};

/// Tunables shared by the Vista controllers.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```rust
/// use vista_core::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("counter_duration_ms = 1500").unwrap();
/// assert_eq!(config.counter_duration_ms, 1500);
/// assert_eq!(config.tick_interval_ms, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed tick interval of the animation scheduler (ms).
    pub tick_interval_ms: u32,
    /// Default duration of a count-up animation (ms).
    pub counter_duration_ms: u32,
    /// Default viewport margin for reveals, CSS-like (`"-50px"`).
    pub reveal_margin: String,
    /// Duration of the reveal entrance transition (ms).
    pub reveal_duration_ms: u32,
    /// Vertical offset an element starts from before it is revealed (px).
    pub reveal_offset_y: f32,
    /// Delay between consecutive items of a staggered reveal (ms).
    pub stagger_step_ms: u32,
    /// Default number of items per carousel page.
    pub carousel_page_size: usize,
    /// Scroll distance after which the page counts as scrolled (px).
    pub scrolled_threshold_px: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineConfig {
    /// Standard configuration matching the landing page defaults.
    pub fn standard() -> Self {
        Self {
            tick_interval_ms: 16, // one animation frame
            counter_duration_ms: 2000,
            reveal_margin: "0px".to_string(),
            reveal_duration_ms: 600,
            reveal_offset_y: 40.0,
            stagger_step_ms: 100,
            carousel_page_size: 3,
            scrolled_threshold_px: 50.0,
        }
    }

    /// Reduced motion: content appears and counters land immediately.
    pub fn reduced_motion() -> Self {
        Self {
            counter_duration_ms: 0,
            reveal_duration_ms: 0,
            reveal_offset_y: 0.0,
            stagger_step_ms: 0,
            ..Self::standard()
        }
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(?config, "engine config loaded");
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| VistaError::Config(err.to_string()))
    }

    /// Reject values no controller can work with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(VistaError::Config(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.carousel_page_size == 0 {
            return Err(VistaError::Config(
                "carousel_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the scheduler tick interval.
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the default counter duration.
    pub fn with_counter_duration_ms(mut self, ms: u32) -> Self {
        self.counter_duration_ms = ms;
        self
    }

    /// Set the default reveal margin.
    pub fn with_reveal_margin(mut self, margin: impl Into<String>) -> Self {
        self.reveal_margin = margin.into();
        self
    }

    /// Set the default carousel page size.
    pub fn with_carousel_page_size(mut self, size: usize) -> Self {
        self.carousel_page_size = size;
        self
    }

    /// Set the scrolled threshold.
    pub fn with_scrolled_threshold_px(mut self, px: f32) -> Self {
        self.scrolled_threshold_px = px;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            reveal_margin = "-100px"
            carousel_page_size = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.reveal_margin, "-100px");
        assert_eq!(config.carousel_page_size, 2);
        assert_eq!(config.counter_duration_ms, 2000);
        assert_eq!(config.scrolled_threshold_px, 50.0);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("tick_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, VistaError::Config(_)));
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let err = EngineConfig::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, VistaError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::reduced_motion().with_carousel_page_size(4);
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
