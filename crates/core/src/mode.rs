//! Comparator modes
//!
//! Three independent leniency flags applied to a whole comparison:
//! - `IgnoreDefaults`: a default value on the expected (left) side matches anything
//! - `LenientDates`: two dates are equal when both are set or both are null
//! - `LenientOrder`: element order of collections is ignored

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single leniency flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorMode {
    /// Default values on the left side are ignored
    IgnoreDefaults,
    /// Only the presence of dates is compared
    LenientDates,
    /// Collection element order is ignored
    LenientOrder,
}

impl fmt::Display for ComparatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComparatorMode::IgnoreDefaults => "ignore_defaults",
            ComparatorMode::LenientDates => "lenient_dates",
            ComparatorMode::LenientOrder => "lenient_order",
        };
        f.write_str(name)
    }
}

/// Set of active comparator modes
///
/// Read-only for the duration of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComparatorModes {
    ignore_defaults: bool,
    lenient_dates: bool,
    lenient_order: bool,
}

impl ComparatorModes {
    /// No leniency
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient order and ignore defaults
    pub fn lenient() -> Self {
        Self::strict()
            .with(ComparatorMode::LenientOrder)
            .with(ComparatorMode::IgnoreDefaults)
    }

    /// Create a mode set from a slice of modes
    pub fn of(modes: &[ComparatorMode]) -> Self {
        modes.iter().copied().collect()
    }

    /// Builder: enable a mode
    pub fn with(mut self, mode: ComparatorMode) -> Self {
        self.set(mode, true);
        self
    }

    /// Builder: disable a mode
    pub fn without(mut self, mode: ComparatorMode) -> Self {
        self.set(mode, false);
        self
    }

    /// Check whether a mode is enabled
    pub fn contains(&self, mode: ComparatorMode) -> bool {
        match mode {
            ComparatorMode::IgnoreDefaults => self.ignore_defaults,
            ComparatorMode::LenientDates => self.lenient_dates,
            ComparatorMode::LenientOrder => self.lenient_order,
        }
    }

    /// Check whether no mode is enabled
    pub fn is_strict(&self) -> bool {
        *self == Self::strict()
    }

    /// Enabled modes, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = ComparatorMode> + '_ {
        [
            ComparatorMode::IgnoreDefaults,
            ComparatorMode::LenientDates,
            ComparatorMode::LenientOrder,
        ]
        .into_iter()
        .filter(move |m| self.contains(*m))
    }

    fn set(&mut self, mode: ComparatorMode, on: bool) {
        match mode {
            ComparatorMode::IgnoreDefaults => self.ignore_defaults = on,
            ComparatorMode::LenientDates => self.lenient_dates = on,
            ComparatorMode::LenientOrder => self.lenient_order = on,
        }
    }
}

impl FromIterator<ComparatorMode> for ComparatorModes {
    fn from_iter<I: IntoIterator<Item = ComparatorMode>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ComparatorModes::strict(), |modes, mode| modes.with(mode))
    }
}

/// Per-flag setting: off, on, or taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetting {
    /// Flag off
    Strict,
    /// Flag on
    Lenient,
    /// Use the configured default
    #[default]
    Default,
}

/// Settings of all three flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeSettings {
    /// Setting for ignore-defaults
    #[serde(default)]
    pub ignore_defaults: ModeSetting,
    /// Setting for lenient-dates
    #[serde(default)]
    pub lenient_dates: ModeSetting,
    /// Setting for lenient-order
    #[serde(default)]
    pub lenient_order: ModeSetting,
}

impl ModeSettings {
    /// Resolve the settings against configured defaults
    pub fn resolve(&self, defaults: ComparatorModes) -> ComparatorModes {
        let pick = |setting: ModeSetting, mode: ComparatorMode| match setting {
            ModeSetting::Strict => false,
            ModeSetting::Lenient => true,
            ModeSetting::Default => defaults.contains(mode),
        };
        [
            (self.ignore_defaults, ComparatorMode::IgnoreDefaults),
            (self.lenient_dates, ComparatorMode::LenientDates),
            (self.lenient_order, ComparatorMode::LenientOrder),
        ]
        .into_iter()
        .filter(|(setting, mode)| pick(*setting, *mode))
        .map(|(_, mode)| mode)
        .collect()
    }
}
