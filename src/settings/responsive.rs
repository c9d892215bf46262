//! Breakpoints and values that vary by breakpoint.

use serde_json::{Map, Value};

/// A viewport tier a value can vary by.
///
/// Ordered widest first: desktop rules are emitted unscoped, then tablet, then
/// mobile, so narrower viewports win on equal specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// All breakpoints in emission order.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    /// The key used for this breakpoint in a stored responsive map.
    pub fn key(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    /// Look up a breakpoint by its stored key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "desktop" => Some(Breakpoint::Desktop),
            "tablet" => Some(Breakpoint::Tablet),
            "mobile" => Some(Breakpoint::Mobile),
            _ => None,
        }
    }
}

/// A value that may differ per breakpoint: `{ desktop, tablet?, mobile? }`.
///
/// `desktop` is optional here only while the value is being assembled from a
/// stored document; [`ResponsiveValue::with_desktop_fallback`] fills it from the
/// field default before compilation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponsiveValue {
    pub desktop: Option<Value>,
    pub tablet: Option<Value>,
    pub mobile: Option<Value>,
}

impl ResponsiveValue {
    /// A value that only has a desktop entry.
    pub fn desktop_only(value: Value) -> Self {
        Self {
            desktop: Some(value),
            tablet: None,
            mobile: None,
        }
    }

    /// Returns `true` when `value` is an object whose keys are all breakpoint names.
    pub fn is_responsive_map(value: &Value) -> bool {
        match value {
            Value::Object(map) => {
                !map.is_empty() && map.keys().all(|k| Breakpoint::from_key(k).is_some())
            }
            _ => false,
        }
    }

    /// Interpret a stored value as a responsive map.
    ///
    /// Returns `None` when `value` is not a breakpoint-keyed object. Explicit
    /// `null` entries count as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        if !Self::is_responsive_map(value) {
            return None;
        }
        let map = value.as_object()?;
        let take = |bp: Breakpoint| map.get(bp.key()).filter(|v| !v.is_null()).cloned();
        Some(Self {
            desktop: take(Breakpoint::Desktop),
            tablet: take(Breakpoint::Tablet),
            mobile: take(Breakpoint::Mobile),
        })
    }

    /// Interpret any stored value: a responsive map as-is, anything else as desktop-only.
    pub fn from_stored(value: &Value) -> Self {
        Self::from_json(value).unwrap_or_else(|| Self::desktop_only(value.clone()))
    }

    /// Fill a missing desktop entry from `fallback`'s desktop entry.
    pub fn with_desktop_fallback(mut self, fallback: &ResponsiveValue) -> Self {
        if self.desktop.is_none() {
            self.desktop = fallback.desktop.clone();
        }
        self
    }

    /// The entry for one breakpoint.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&Value> {
        match breakpoint {
            Breakpoint::Desktop => self.desktop.as_ref(),
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Mobile => self.mobile.as_ref(),
        }
    }

    /// Present entries in emission order (desktop, tablet, mobile).
    pub fn entries(&self) -> impl Iterator<Item = (Breakpoint, &Value)> {
        Breakpoint::ALL
            .into_iter()
            .filter_map(move |bp| self.get(bp).map(|v| (bp, v)))
    }

    /// Convert back to the stored JSON shape.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (bp, value) in self.entries() {
            map.insert(bp.key().to_owned(), value.clone());
        }
        Value::Object(map)
    }
}
