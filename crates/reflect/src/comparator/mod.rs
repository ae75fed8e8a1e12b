//! Comparator strategy chain
//!
//! Each comparator handles one family of value pairs. The reflection
//! comparator consults its chain in a fixed priority order and the first
//! comparator whose `can_compare` returns true performs the comparison,
//! recursing through the traversal for nested pairs. `ObjectComparator` is
//! the catch-all at the end of every chain.

mod collection;
mod dates;
mod defaults;
mod lazy;
mod lenient_order;
mod map;
mod object;
mod simple;

pub use collection::CollectionComparator;
pub use dates::LenientDatesComparator;
pub use defaults::IgnoreDefaultsComparator;
pub use lazy::LazyProxyComparator;
pub use lenient_order::LenientOrderCollectionComparator;
pub use map::MapComparator;
pub use object::ObjectComparator;
pub use simple::SimpleCasesComparator;

use crate::difference::Difference;
use crate::reflection::Traversal;
use fixturekit_core::{Result, Value};

/// A comparison strategy for one family of value pairs
pub trait Comparator {
    /// Check whether this comparator handles the pair
    fn can_compare(&self, left: &Value, right: &Value) -> bool;

    /// Compare the pair
    ///
    /// Nested pairs must be compared through `root` so that the visited-pair
    /// registry sees them. With `only_first_difference` the comparator may
    /// stop at the first discrepancy it finds.
    ///
    /// Returns `None` when the values are equal.
    fn compare(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
        root: &Traversal<'_>,
    ) -> Result<Option<Difference>>;

    /// Name of the comparator (for logs)
    fn name(&self) -> &'static str;
}
