use crate::error::ConfigError;
use glam::{Vec3, Vec4};

/// RGBA color with components in [0, 1], parsed from CSS hex notation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim_start_matches('#');
        let bad = || ConfigError::InvalidColor(hex.to_string());
        if !digits.is_ascii() {
            return Err(bad());
        }

        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| bad());
        match digits.len() {
            3 => {
                let mut c = [0.0f32; 3];
                for (i, slot) in c.iter_mut().enumerate() {
                    let d = byte(&digits[i..i + 1])?;
                    *slot = f32::from(d * 16 + d) / 255.0;
                }
                Ok(Self::rgb(c[0], c[1], c[2]))
            }
            6 | 8 => {
                let r = byte(&digits[0..2])?;
                let g = byte(&digits[2..4])?;
                let b = byte(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    byte(&digits[6..8])?
                } else {
                    0xff
                };
                Ok(Self::new(
                    f32::from(r) / 255.0,
                    f32::from(g) / 255.0,
                    f32::from(b) / 255.0,
                    f32::from(a) / 255.0,
                ))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// CSS hex form for DOM label styling.
    pub fn to_css(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }
}

/// The four roles a chart palette fills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub base: Color,
    pub secondary: Color,
    pub highlight: Color,
    pub label: Color,
}

impl Palette {
    pub fn from_hex(
        base: &str,
        secondary: &str,
        highlight: &str,
        label: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base: Color::from_hex(base)?,
            secondary: Color::from_hex(secondary)?,
            highlight: Color::from_hex(highlight)?,
            label: Color::from_hex(label)?,
        })
    }
}
