//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances with the same attribute
/// values are interchangeable. Line items, party blocks and salary parameters
/// are all value objects owned by the invoice aggregate.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
