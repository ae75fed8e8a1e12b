//! Difference model
//!
//! A comparison that finds the two graphs unequal produces a tree of
//! `Difference` nodes, built bottom-up in one traversal and never mutated
//! afterwards. Equality is `None`, never an empty node.
//!
//! This module provides:
//! - Difference: tagged variant over the five node kinds
//! - DifferenceVisitor: one method per node kind
//! - The node structs carrying kind-specific children

use fixturekit_core::Value;

// ============================================================================
// Kind
// ============================================================================

/// Kind of a difference node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceKind {
    /// Leaf: two values that differ
    Scalar,
    /// Leaf: two objects of different classes
    Class,
    /// Collections with element differences or missing elements
    Collection,
    /// Maps with value differences or missing keys
    Map,
    /// Objects with field differences
    Object,
}

// ============================================================================
// Node types
// ============================================================================

/// Two values that differ, without further structure
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDifference {
    /// Description of the mismatch
    pub message: String,
    /// Expected value
    pub left: Value,
    /// Actual value
    pub right: Value,
}

/// Two objects of different runtime classes
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDifference {
    /// Description of the mismatch
    pub message: String,
    /// Expected value
    pub left: Value,
    /// Actual value
    pub right: Value,
    /// Class name of the expected value
    pub left_class: String,
    /// Class name of the actual value
    pub right_class: String,
}

/// Objects whose fields differ
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDifference {
    /// Description of the mismatch
    pub message: String,
    /// Expected value
    pub left: Value,
    /// Actual value
    pub right: Value,
    /// Field name to difference, in field declaration order
    pub fields: Vec<(String, Difference)>,
}

impl ObjectDifference {
    /// Difference of a single field
    pub fn field(&self, name: &str) -> Option<&Difference> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }
}

/// A pair of collection elements that differ
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDifference {
    /// Index in the expected collection
    pub left_index: usize,
    /// Index in the actual collection
    pub right_index: usize,
    /// Difference between the two elements
    pub difference: Difference,
}

/// Collections whose elements differ
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDifference {
    /// Description of the mismatch
    pub message: String,
    /// Expected value
    pub left: Value,
    /// Actual value
    pub right: Value,
    /// Paired elements that differ, in left index order
    pub elements: Vec<ElementDifference>,
    /// Elements of the left collection without counterpart on the right
    pub left_missing: Vec<(usize, Value)>,
    /// Elements of the right collection without counterpart on the left
    pub right_missing: Vec<(usize, Value)>,
}

impl CollectionDifference {
    /// Difference of the element at a left index
    pub fn element(&self, left_index: usize) -> Option<&Difference> {
        self.elements
            .iter()
            .find(|e| e.left_index == left_index)
            .map(|e| &e.difference)
    }
}

/// Maps whose entries differ
#[derive(Debug, Clone, PartialEq)]
pub struct MapDifference {
    /// Description of the mismatch
    pub message: String,
    /// Expected value
    pub left: Value,
    /// Actual value
    pub right: Value,
    /// Left key to value difference, for keys present on both sides
    pub values: Vec<(Value, Difference)>,
    /// Keys only present in the left map
    pub left_missing_keys: Vec<Value>,
    /// Keys only present in the right map
    pub right_missing_keys: Vec<Value>,
}

// ============================================================================
// Difference
// ============================================================================

/// One discrepancy node of a difference tree
#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    /// Leaf value mismatch
    Scalar(ScalarDifference),
    /// Runtime class mismatch
    Class(ClassDifference),
    /// Object field mismatches
    Object(ObjectDifference),
    /// Collection element mismatches
    Collection(CollectionDifference),
    /// Map entry mismatches
    Map(MapDifference),
}

impl Difference {
    /// Create a scalar difference
    pub fn scalar(message: impl Into<String>, left: &Value, right: &Value) -> Self {
        Difference::Scalar(ScalarDifference {
            message: message.into(),
            left: left.clone(),
            right: right.clone(),
        })
    }

    /// Create a class difference
    pub fn class(left: &Value, right: &Value) -> Self {
        let left_class = left.kind_name();
        let right_class = right.kind_name();
        Difference::Class(ClassDifference {
            message: format!(
                "Different classes. Left: {}, right: {}",
                left_class, right_class
            ),
            left: left.clone(),
            right: right.clone(),
            left_class,
            right_class,
        })
    }

    /// Create an object difference without field differences
    pub fn object(message: impl Into<String>, left: &Value, right: &Value) -> ObjectDifference {
        ObjectDifference {
            message: message.into(),
            left: left.clone(),
            right: right.clone(),
            fields: Vec::new(),
        }
    }

    /// Create an empty collection difference
    pub fn collection(
        message: impl Into<String>,
        left: &Value,
        right: &Value,
    ) -> CollectionDifference {
        CollectionDifference {
            message: message.into(),
            left: left.clone(),
            right: right.clone(),
            elements: Vec::new(),
            left_missing: Vec::new(),
            right_missing: Vec::new(),
        }
    }

    /// Create an empty map difference
    pub fn map(message: impl Into<String>, left: &Value, right: &Value) -> MapDifference {
        MapDifference {
            message: message.into(),
            left: left.clone(),
            right: right.clone(),
            values: Vec::new(),
            left_missing_keys: Vec::new(),
            right_missing_keys: Vec::new(),
        }
    }

    /// Node kind
    pub fn kind(&self) -> DifferenceKind {
        match self {
            Difference::Scalar(_) => DifferenceKind::Scalar,
            Difference::Class(_) => DifferenceKind::Class,
            Difference::Object(_) => DifferenceKind::Object,
            Difference::Collection(_) => DifferenceKind::Collection,
            Difference::Map(_) => DifferenceKind::Map,
        }
    }

    /// Human-readable description of the mismatch
    pub fn message(&self) -> &str {
        match self {
            Difference::Scalar(d) => &d.message,
            Difference::Class(d) => &d.message,
            Difference::Object(d) => &d.message,
            Difference::Collection(d) => &d.message,
            Difference::Map(d) => &d.message,
        }
    }

    /// Expected value
    pub fn left(&self) -> &Value {
        match self {
            Difference::Scalar(d) => &d.left,
            Difference::Class(d) => &d.left,
            Difference::Object(d) => &d.left,
            Difference::Collection(d) => &d.left,
            Difference::Map(d) => &d.left,
        }
    }

    /// Actual value
    pub fn right(&self) -> &Value {
        match self {
            Difference::Scalar(d) => &d.right,
            Difference::Class(d) => &d.right,
            Difference::Object(d) => &d.right,
            Difference::Collection(d) => &d.right,
            Difference::Map(d) => &d.right,
        }
    }

    /// Difference of an object field, if this is an object difference
    pub fn field(&self, name: &str) -> Option<&Difference> {
        match self {
            Difference::Object(d) => d.field(name),
            _ => None,
        }
    }

    /// Dispatch to the visitor method for this node kind
    pub fn accept<V: DifferenceVisitor<A>, A>(&self, visitor: &V, arg: A) -> V::Output {
        match self {
            Difference::Scalar(d) => visitor.visit_scalar(d, arg),
            Difference::Class(d) => visitor.visit_class(d, arg),
            Difference::Object(d) => visitor.visit_object(d, arg),
            Difference::Collection(d) => visitor.visit_collection(d, arg),
            Difference::Map(d) => visitor.visit_map(d, arg),
        }
    }
}

impl From<ObjectDifference> for Difference {
    fn from(d: ObjectDifference) -> Self {
        Difference::Object(d)
    }
}

impl From<CollectionDifference> for Difference {
    fn from(d: CollectionDifference) -> Self {
        Difference::Collection(d)
    }
}

impl From<MapDifference> for Difference {
    fn from(d: MapDifference) -> Self {
        Difference::Map(d)
    }
}

/// Visitor over difference nodes
///
/// `A` is a caller-chosen argument threaded through the traversal (for
/// example the field path being rendered).
pub trait DifferenceVisitor<A> {
    /// Result of visiting a node
    type Output;

    /// Visit a scalar difference
    fn visit_scalar(&self, difference: &ScalarDifference, arg: A) -> Self::Output;

    /// Visit a class difference
    fn visit_class(&self, difference: &ClassDifference, arg: A) -> Self::Output;

    /// Visit an object difference
    fn visit_object(&self, difference: &ObjectDifference, arg: A) -> Self::Output;

    /// Visit a collection difference
    fn visit_collection(&self, difference: &CollectionDifference, arg: A) -> Self::Output;

    /// Visit a map difference
    fn visit_map(&self, difference: &MapDifference, arg: A) -> Self::Output;
}
