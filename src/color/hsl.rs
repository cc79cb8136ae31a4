use std::fmt;

/// Step between successive hues; consecutive color classes land far apart on the wheel.
const GOLDEN_ANGLE: f64 = 137.50776405;

/// Fill color for one color class, rendered as a CSS `hsl()` token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, any sign; wrapped on display.
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Hue wrapped into [0, 360).
    fn hue(&self) -> f64 {
        self.h.rem_euclid(360.0)
    }

    fn percent(fraction: f64) -> f64 {
        (fraction * 100.0).clamp(0.0, 100.0)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.1},{:.0}%,{:.0}%)", self.hue(), Self::percent(self.s), Self::percent(self.l))
    }
}

/// Token for color class `class`. Pastel saturation and lightness keep
/// district outlines and label text readable on top of the fill.
pub fn golden_angle_color(class: usize) -> Hsl {
    Hsl { h: class as f64 * GOLDEN_ANGLE, s: 0.60, l: 0.75 }
}
