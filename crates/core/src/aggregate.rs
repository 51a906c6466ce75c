//! Editable documents modelled as a chain of immutable snapshots.

/// A document that keeps its identity across edits.
pub trait AggregateRoot {
    /// Document identity, stable for the whole editing session.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of edits accepted so far; a fresh document starts at 0.
    fn version(&self) -> u64;
}

/// Applies one edit to a document snapshot.
///
/// `execute` returns the edited copy with `version` one higher and the same
/// `id`; `self` is never changed. A rejected edit returns the error and no
/// snapshot, so the caller keeps the one it had. No IO happens here.
pub trait Aggregate: AggregateRoot + Sized {
    type Command: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn execute(&self, command: &Self::Command) -> Result<Self, Self::Error>;
}
