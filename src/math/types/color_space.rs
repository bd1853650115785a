// src/math/types/color_space.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixelformate für das Packen einzelner Farben
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpaceType {
    GRAY_8,
    GRAY_16,
    GRAY_32,
    RGB_888,
    RGBA_8888,
    ARGB_8888,
    RGBX_8888,
    XRGB_8888,
    BGR_888,
    BGRA_8888,
    ABGR_8888,
    BGRX_8888,
    XBGR_8888,
    GRAY_float,
    RGB_float,
    RGBA_float,
    ARGB_float,
    BGR_float,
    BGRA_float,
    ABGR_float,
}

/// Kanal innerhalb eines gepackten Pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    /// Füllbyte ohne Bedeutung
    Padding,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpace {
    kind: ColorSpaceType,
}

impl ColorSpace {
    pub fn new(kind: ColorSpaceType) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ColorSpaceType {
        self.kind
    }

    /// Kanäle in Speicherreihenfolge
    pub fn channels(&self) -> &'static [Channel] {
        use Channel::*;
        use ColorSpaceType::*;
        match self.kind {
            GRAY_8 | GRAY_16 | GRAY_32 | GRAY_float => &[Gray],
            RGB_888 | RGB_float => &[Red, Green, Blue],
            RGBA_8888 | RGBA_float => &[Red, Green, Blue, Alpha],
            ARGB_8888 | ARGB_float => &[Alpha, Red, Green, Blue],
            RGBX_8888 => &[Red, Green, Blue, Padding],
            XRGB_8888 => &[Padding, Red, Green, Blue],
            BGR_888 | BGR_float => &[Blue, Green, Red],
            BGRA_8888 | BGRA_float => &[Blue, Green, Red, Alpha],
            ABGR_8888 | ABGR_float => &[Alpha, Blue, Green, Red],
            BGRX_8888 => &[Blue, Green, Red, Padding],
            XBGR_8888 => &[Padding, Blue, Green, Red],
        }
    }

    /// Bytes pro Kanal
    pub fn bytes_per_channel(&self) -> usize {
        use ColorSpaceType::*;
        match self.kind {
            GRAY_16 => 2,
            GRAY_32 => 4,
            _ if self.is_float() => 4,
            _ => 1,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.channels().len() * self.bytes_per_channel()
    }

    pub fn bits_per_pixel(&self) -> usize {
        self.bytes_per_pixel() * 8
    }

    pub fn is_float(&self) -> bool {
        use ColorSpaceType::*;
        matches!(
            self.kind,
            GRAY_float | RGB_float | RGBA_float | ARGB_float | BGR_float | BGRA_float | ABGR_float
        )
    }

    pub fn is_gray(&self) -> bool {
        self.channels() == [Channel::Gray]
    }

    pub fn has_alpha(&self) -> bool {
        self.channels().contains(&Channel::Alpha)
    }

    pub fn has_skip(&self) -> bool {
        self.channels().contains(&Channel::Padding)
    }

    pub fn is_rgb(&self) -> bool {
        !self.is_gray() && !self.is_bgr()
    }

    pub fn is_bgr(&self) -> bool {
        let channels = self.channels();
        let blue = channels.iter().position(|c| *c == Channel::Blue);
        let red = channels.iter().position(|c| *c == Channel::Red);
        matches!((blue, red), (Some(b), Some(r)) if b < r)
    }
}

impl From<ColorSpaceType> for ColorSpace {
    fn from(kind: ColorSpaceType) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_sizes() {
        assert_eq!(ColorSpace::new(ColorSpaceType::GRAY_8).bytes_per_pixel(), 1);
        assert_eq!(ColorSpace::new(ColorSpaceType::GRAY_16).bytes_per_pixel(), 2);
        assert_eq!(ColorSpace::new(ColorSpaceType::GRAY_32).bits_per_pixel(), 32);
        assert_eq!(ColorSpace::new(ColorSpaceType::RGB_888).bytes_per_pixel(), 3);
        assert_eq!(ColorSpace::new(ColorSpaceType::XRGB_8888).bytes_per_pixel(), 4);
        assert_eq!(ColorSpace::new(ColorSpaceType::RGBA_float).bytes_per_pixel(), 16);
        assert_eq!(ColorSpace::new(ColorSpaceType::GRAY_float).bytes_per_pixel(), 4);
    }

    #[test]
    fn test_channel_classification() {
        let bgra = ColorSpace::new(ColorSpaceType::BGRA_8888);
        assert!(bgra.is_bgr());
        assert!(!bgra.is_rgb());
        assert!(bgra.has_alpha());

        let xrgb = ColorSpace::new(ColorSpaceType::XRGB_8888);
        assert!(xrgb.is_rgb());
        assert!(xrgb.has_skip());
        assert!(!xrgb.has_alpha());

        let gray = ColorSpace::new(ColorSpaceType::GRAY_16);
        assert!(gray.is_gray());
        assert!(!gray.is_rgb());
        assert!(!gray.is_float());
    }
}
