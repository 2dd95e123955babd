//! Predefined vibration effects

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hardware-defined vibration patterns addressable by id.
///
/// The discriminants are the ids understood by platform vibration services.
/// A service without a native implementation of an effect substitutes a
/// generic pattern; that substitution is invisible to callers.
///
/// # Examples
///
/// ```
/// use tactile_command::EffectId;
///
/// assert_eq!(EffectId::from_raw(5), Some(EffectId::HeavyClick));
/// assert_eq!(EffectId::from_raw(3), None);
/// assert_eq!("double-click".parse::<EffectId>(), Ok(EffectId::DoubleClick));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum EffectId {
    Click = 0,
    DoubleClick = 1,
    Tick = 2,
    HeavyClick = 5,
}

impl EffectId {
    /// Every predefined effect, in id order.
    pub const ALL: [EffectId; 4] = [
        EffectId::Click,
        EffectId::DoubleClick,
        EffectId::Tick,
        EffectId::HeavyClick,
    ];

    /// Look up an effect by its platform id.
    #[must_use]
    pub fn from_raw(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Click),
            1 => Some(Self::DoubleClick),
            2 => Some(Self::Tick),
            5 => Some(Self::HeavyClick),
            _ => None,
        }
    }

    /// Platform id of the effect.
    #[must_use]
    pub fn to_raw(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "double-click",
            Self::Tick => "tick",
            Self::HeavyClick => "heavy-click",
        }
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown effect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect name '{0}' (expected click, double-click, tick or heavy-click)")]
pub struct ParseEffectError(pub String);

impl FromStr for EffectId {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        EffectId::ALL
            .into_iter()
            .find(|effect| effect.as_str() == normalized)
            .ok_or_else(|| ParseEffectError(s.to_string()))
    }
}
