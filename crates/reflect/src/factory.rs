//! Comparator chain construction
//!
//! Chain order, most specific first:
//! 1. `LenientDatesComparator` (lenient-dates mode only)
//! 2. `IgnoreDefaultsComparator` (ignore-defaults mode only)
//! 3. `SimpleCasesComparator`
//! 4. `LazyProxyComparator`
//! 5. `LenientOrderCollectionComparator` in lenient-order mode, else `CollectionComparator`
//! 6. `MapComparator`
//! 7. `ObjectComparator`

use crate::comparator::{
    CollectionComparator, Comparator, IgnoreDefaultsComparator, LazyProxyComparator,
    LenientDatesComparator, LenientOrderCollectionComparator, MapComparator, ObjectComparator,
    SimpleCasesComparator,
};
use crate::reflection::ReflectionComparator;
use fixturekit_core::{ComparatorMode, ComparatorModes, FixtureConfig, ModeSettings, Result, Value};

/// Builds reflection comparators for a mode set
pub struct ComparatorFactory;

impl ComparatorFactory {
    /// Comparator for the given modes
    pub fn create(modes: &[ComparatorMode]) -> ReflectionComparator {
        Self::with_modes(ComparatorModes::of(modes))
    }

    /// Comparator for a mode set
    pub fn with_modes(modes: ComparatorModes) -> ReflectionComparator {
        ReflectionComparator::new(Self::chain(modes), modes)
    }

    /// Comparator without leniency
    pub fn strict() -> ReflectionComparator {
        Self::with_modes(ComparatorModes::strict())
    }

    /// Comparator with lenient order and ignored defaults
    pub fn lenient() -> ReflectionComparator {
        Self::with_modes(ComparatorModes::lenient())
    }

    /// Comparator for the configured default modes
    pub fn from_config(config: &FixtureConfig) -> ReflectionComparator {
        Self::with_modes(config.reflect.modes())
    }

    /// Comparator for per-flag settings, resolving defaults from configuration
    pub fn from_settings(settings: &ModeSettings, config: &FixtureConfig) -> ReflectionComparator {
        Self::with_modes(settings.resolve(config.reflect.modes()))
    }

    /// The comparator chain for a mode set
    pub fn chain(modes: ComparatorModes) -> Vec<Box<dyn Comparator>> {
        let mut chain: Vec<Box<dyn Comparator>> = Vec::new();
        if modes.contains(ComparatorMode::LenientDates) {
            chain.push(Box::new(LenientDatesComparator));
        }
        if modes.contains(ComparatorMode::IgnoreDefaults) {
            chain.push(Box::new(IgnoreDefaultsComparator));
        }
        chain.push(Box::new(SimpleCasesComparator));
        chain.push(Box::new(LazyProxyComparator));
        if modes.contains(ComparatorMode::LenientOrder) {
            chain.push(Box::new(LenientOrderCollectionComparator::default()));
        } else {
            chain.push(Box::new(CollectionComparator));
        }
        chain.push(Box::new(MapComparator::new()));
        chain.push(Box::new(ObjectComparator));
        chain
    }
}

/// Check whether two graphs are equal under the given modes
///
/// # Errors
///
/// Fails when a field cannot be accessed.
pub fn is_equal(left: &Value, right: &Value, modes: &[ComparatorMode]) -> Result<bool> {
    ComparatorFactory::create(modes).is_equal(left, right)
}
