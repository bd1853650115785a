// src/math/types/color.rs

use crate::math::{
    error::{MathError, MathResult},
    types::color_space::{Channel, ColorSpace},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA-Farbe mit Kanälen in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Ungültige Farbe, z.B. für "kein Fill"
    pub const NONE: Self = Self::new(-1.0, -1.0, -1.0, -1.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    pub const fn from_gray(gray: f32, alpha: f32) -> Self {
        Self::new(gray, gray, gray, alpha)
    }

    /// Erstellt eine Farbe aus 8-Bit Kanälen
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(
            red as f32 / 255.0,
            green as f32 / 255.0,
            blue as f32 / 255.0,
            alpha as f32 / 255.0,
        )
    }

    pub fn red8(&self) -> u8 {
        to_u8(self.red)
    }

    pub fn green8(&self) -> u8 {
        to_u8(self.green)
    }

    pub fn blue8(&self) -> u8 {
        to_u8(self.blue)
    }

    pub fn alpha8(&self) -> u8 {
        to_u8(self.alpha)
    }

    /// Eine Farbe ist gültig, wenn kein Kanal negativ ist
    pub fn is_valid(&self) -> bool {
        self.red >= 0.0 && self.green >= 0.0 && self.blue >= 0.0 && self.alpha >= 0.0
    }

    /// Mittelwert aus Rot, Grün und Blau
    pub fn gray(&self) -> f32 {
        (self.red + self.green + self.blue) / 3.0
    }

    fn channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::Alpha => self.alpha,
            Channel::Gray => self.gray(),
            Channel::Padding => 0.0,
        }
    }

    fn set_channel(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
            Channel::Alpha => self.alpha = value,
            Channel::Gray => {
                self.red = value;
                self.green = value;
                self.blue = value;
            }
            Channel::Padding => {}
        }
    }

    /// Schreibt die Farbe als einzelnes Pixel in `pixel` (native Byte-Reihenfolge).
    ///
    /// Füllbytes bleiben unverändert.
    pub fn write_pixel(&self, space: ColorSpace, pixel: &mut [u8]) -> MathResult<()> {
        check_buffer(space, pixel.len())?;
        let width = space.bytes_per_channel();

        for (i, &channel) in space.channels().iter().enumerate() {
            if channel == Channel::Padding {
                continue;
            }
            let value = self.channel(channel);
            let out = &mut pixel[i * width..(i + 1) * width];
            if space.is_float() {
                out.copy_from_slice(&value.to_ne_bytes());
                continue;
            }
            match width {
                1 => out[0] = to_u8(value),
                2 => {
                    let v = (value.clamp(0.0, 1.0) * u16::MAX as f32) as u16;
                    out.copy_from_slice(&v.to_ne_bytes());
                }
                _ => {
                    let v = (value.clamp(0.0, 1.0) as f64 * u32::MAX as f64) as u32;
                    out.copy_from_slice(&v.to_ne_bytes());
                }
            }
        }
        Ok(())
    }

    /// Liest ein einzelnes Pixel; fehlendes Alpha wird 1.
    pub fn from_pixel(space: ColorSpace, pixel: &[u8]) -> MathResult<Self> {
        check_buffer(space, pixel.len())?;
        let width = space.bytes_per_channel();
        let mut color = Color::BLACK;

        for (i, &channel) in space.channels().iter().enumerate() {
            let raw = &pixel[i * width..(i + 1) * width];
            let value = if space.is_float() {
                f32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]])
            } else {
                match width {
                    1 => raw[0] as f32 / u8::MAX as f32,
                    2 => u16::from_ne_bytes([raw[0], raw[1]]) as f32 / u16::MAX as f32,
                    _ => {
                        (u32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]) as f64
                            / u32::MAX as f64) as f32
                    }
                }
            };
            color.set_channel(channel, value);
        }
        Ok(color)
    }
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn check_buffer(space: ColorSpace, len: usize) -> MathResult<()> {
    if len < space.bytes_per_pixel() {
        return Err(MathError::invalid_argument(format!(
            "pixel buffer of {len} bytes is too small for {space} ({} bytes)",
            space.bytes_per_pixel()
        )));
    }
    Ok(())
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
