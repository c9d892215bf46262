//! Compiler configuration.

use serde::{Deserialize, Serialize};

use crate::settings::Breakpoint;

/// Errors from loading a [`CompilerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid compiler config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mobile breakpoint ({mobile}px) must be narrower than tablet ({tablet}px)")]
    BreakpointOrder { tablet: u32, mobile: u32 },
    #[error("breakpoint widths must be positive")]
    ZeroWidth,
}

/// `max-width` pixel values for the narrower breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub tablet: u32,
    pub mobile: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet: 1023,
            mobile: 767,
        }
    }
}

impl Breakpoints {
    /// The media-query width for `breakpoint`; desktop is unscoped.
    pub fn max_width(&self, breakpoint: Breakpoint) -> Option<u32> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(self.tablet),
            Breakpoint::Mobile => Some(self.mobile),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tablet == 0 || self.mobile == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.mobile >= self.tablet {
            return Err(ConfigError::BreakpointOrder {
                tablet: self.tablet,
                mobile: self.mobile,
            });
        }
        Ok(())
    }
}

/// Configuration for the CSS compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Media-query widths for tablet and mobile overrides.
    pub breakpoints: Breakpoints,
    /// Emit a `/* key.path */` comment before each field's rules.
    pub emit_comments: bool,
}

impl CompilerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.breakpoints.validate()?;
        Ok(config)
    }

    /// Set the breakpoints (builder).
    ///
    /// Unlike [`from_json`](Self::from_json) this does not validate; a
    /// programmatic config is trusted.
    pub fn with_breakpoints(mut self, tablet: u32, mobile: u32) -> Self {
        self.breakpoints = Breakpoints { tablet, mobile };
        self
    }

    /// Toggle field-path comments (builder).
    pub fn with_comments(mut self, emit: bool) -> Self {
        self.emit_comments = emit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.breakpoints.tablet, 1023);
        assert_eq!(config.breakpoints.mobile, 767);
        assert!(!config.emit_comments);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CompilerConfig::from_json(r#"{"breakpoints": {"mobile": 600}}"#).unwrap();
        assert_eq!(config.breakpoints, Breakpoints { tablet: 1023, mobile: 600 });
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(CompilerConfig::from_json("{}").unwrap(), CompilerConfig::default());
    }

    #[test]
    fn test_from_json_rejects_inverted_breakpoints() {
        let err = CompilerConfig::from_json(r#"{"breakpoints": {"tablet": 700, "mobile": 800}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::BreakpointOrder { tablet: 700, mobile: 800 }));
    }

    #[test]
    fn test_from_json_rejects_zero() {
        let err = CompilerConfig::from_json(r#"{"breakpoints": {"mobile": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWidth));
    }

    #[test]
    fn test_from_json_rejects_bad_json() {
        assert!(matches!(
            CompilerConfig::from_json("{").unwrap_err(),
            ConfigError::Json(_)
        ));
    }

    #[test]
    fn test_builder() {
        let config = CompilerConfig::new().with_breakpoints(1200, 640).with_comments(true);
        assert_eq!(config.breakpoints.max_width(Breakpoint::Tablet), Some(1200));
        assert_eq!(config.breakpoints.max_width(Breakpoint::Mobile), Some(640));
        assert_eq!(config.breakpoints.max_width(Breakpoint::Desktop), None);
        assert!(config.emit_comments);
    }
}
