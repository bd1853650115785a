// src/math/geometry/polygon/style.rs

use crate::math::{
    error::{MathError, MathResult},
    utils::constants::DEFAULT_MITER_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form der Enden offener Linienzüge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapType {
    #[default]
    Butt,
    Round,
    Square,
}

/// Form der Ecken zwischen zwei Segmenten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    #[default]
    Miter,
    Round,
    Square,
}

impl TryFrom<i32> for CapType {
    type Error = MathError;

    fn try_from(value: i32) -> MathResult<Self> {
        match value {
            0 => Ok(Self::Butt),
            1 => Ok(Self::Round),
            2 => Ok(Self::Square),
            _ => Err(MathError::invalid_argument(format!(
                "invalid cap type: {value}"
            ))),
        }
    }
}

impl TryFrom<i32> for JoinType {
    type Error = MathError;

    fn try_from(value: i32) -> MathResult<Self> {
        match value {
            0 => Ok(Self::Miter),
            1 => Ok(Self::Round),
            2 => Ok(Self::Square),
            _ => Err(MathError::invalid_argument(format!(
                "invalid join type: {value}"
            ))),
        }
    }
}

impl FromStr for CapType {
    type Err = MathError;

    fn from_str(s: &str) -> MathResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "butt" | "cap_butt" => Ok(Self::Butt),
            "round" | "cap_round" => Ok(Self::Round),
            "square" | "cap_square" => Ok(Self::Square),
            _ => Err(MathError::invalid_argument(format!("invalid cap type: {s}"))),
        }
    }
}

impl FromStr for JoinType {
    type Err = MathError;

    fn from_str(s: &str) -> MathResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "miter" | "join_miter" => Ok(Self::Miter),
            "round" | "join_round" => Ok(Self::Round),
            "square" | "join_square" => Ok(Self::Square),
            _ => Err(MathError::invalid_argument(format!(
                "invalid join type: {s}"
            ))),
        }
    }
}

impl fmt::Display for CapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        };
        f.write_str(name)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Square => "square",
        };
        f.write_str(name)
    }
}

/// Strichparameter für Kontur-Erzeugung
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: CapType,
    pub join: JoinType,
    pub miter_limit: f32,
    /// 0 = Strich innen, 0.5 = zentriert, 1 = außen (nur geschlossene Konturen)
    pub outset: f32,
}

impl StrokeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_cap(mut self, cap: CapType) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: JoinType) -> Self {
        self.join = join;
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: f32) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    pub fn with_outset(mut self, outset: f32) -> Self {
        self.outset = outset;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Stroke width must be finite and not negative".to_string(),
            });
        }

        if !self.miter_limit.is_finite() || self.miter_limit < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: "Miter limit must be finite and not negative".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.outset) {
            return Err(MathError::InvalidConfiguration {
                message: "Stroke outset must be between 0.0 and 1.0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: CapType::default(),
            join: JoinType::default(),
            miter_limit: DEFAULT_MITER_LIMIT,
            outset: 0.5,
        }
    }
}
