//! Order-insensitive collection comparison

use super::Comparator;
use crate::difference::{CollectionDifference, Difference, ElementDifference};
use crate::reflection::Traversal;
use crate::score::MatchingScoreVisitor;
use fixturekit_core::{Result, Value};
use tracing::trace;

/// Compares collections ignoring element order
///
/// First every left element is paired with an equal, not yet consumed right
/// element. Each remaining left element then consumes the remaining right
/// element with the lowest matching score, and that pair is reported as an
/// element difference. Elements left over on either side are missing.
///
/// This is a greedy best match with O(n²) element comparisons.
#[derive(Debug, Default)]
pub struct LenientOrderCollectionComparator {
    scorer: MatchingScoreVisitor,
}

impl Comparator for LenientOrderCollectionComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::Seq(_), Value::Seq(_)))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
        root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        let left_items = left.items().unwrap_or_default();
        let right_items = right.items().unwrap_or_default();
        let mut consumed = vec![false; right_items.len()];

        // Pass 1: exact matches
        let mut unmatched = Vec::new();
        for (li, l) in left_items.iter().enumerate() {
            let mut found = false;
            for (ri, r) in right_items.iter().enumerate() {
                if consumed[ri] {
                    continue;
                }
                if root.get_difference(l, r, true)?.is_none() {
                    consumed[ri] = true;
                    found = true;
                    break;
                }
            }
            if !found {
                unmatched.push(li);
            }
        }
        if unmatched.is_empty() && consumed.iter().all(|c| *c) {
            return Ok(None);
        }

        // Pass 2: best match for what is left
        let mut difference = Difference::collection("Different elements", left, right);
        for li in unmatched {
            let l = &left_items[li];
            let mut best: Option<(usize, u32, Option<Difference>)> = None;
            for (ri, r) in right_items.iter().enumerate() {
                if consumed[ri] {
                    continue;
                }
                let element = root.get_difference(l, r, false)?;
                let score = element.as_ref().map_or(0, |d| self.scorer.score(d));
                if best.as_ref().map_or(true, |(_, s, _)| score < *s) {
                    best = Some((ri, score, element));
                }
            }
            match best {
                Some((ri, score, element)) => {
                    trace!(
                        left_index = li,
                        right_index = ri,
                        score,
                        "Best matching element"
                    );
                    consumed[ri] = true;
                    if let Some(element) = element {
                        difference.elements.push(ElementDifference {
                            left_index: li,
                            right_index: ri,
                            difference: element,
                        });
                    }
                }
                None => difference.left_missing.push((li, l.clone())),
            }
            if only_first_difference && has_entries(&difference) {
                return Ok(Some(difference.into()));
            }
        }

        for (ri, r) in right_items.iter().enumerate() {
            if !consumed[ri] {
                difference.right_missing.push((ri, r.clone()));
                if only_first_difference {
                    break;
                }
            }
        }

        if !has_entries(&difference) {
            return Ok(None);
        }
        Ok(Some(difference.into()))
    }

    fn name(&self) -> &'static str {
        "lenient_order_collection"
    }
}

fn has_entries(difference: &CollectionDifference) -> bool {
    !difference.elements.is_empty()
        || !difference.left_missing.is_empty()
        || !difference.right_missing.is_empty()
}
