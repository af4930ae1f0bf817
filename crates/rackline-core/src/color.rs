//! Color handling for rendered rack wireframes.
//!
//! Wraps `DynamicColor` from the `color` crate so configuration can accept any
//! CSS color string ("#202020", "rgb(40, 40, 40)", "steelblue", ...).

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending string if it is not a valid
    /// CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use rackline_core::color::Color;
    ///
    /// assert!(Color::new("#1e1e1e").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns a copy of this color with the given alpha (0.0 to 1.0).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}
