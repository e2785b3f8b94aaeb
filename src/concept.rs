//! The two traits tying a concept descriptor to the types that satisfy it.

/// Descriptor of an abstract capability set.
///
/// Implemented by [`concept!`](macro@crate::concept) for the `dyn Trait` type of
/// the declared interface trait, so the descriptor's identity is the trait's
/// declaration site and `TypeId::of::<dyn MyConcept>()` is well defined.
/// `Table` is the tuple of erased call adapters, one entry per operation in
/// declaration order.
pub trait Concept: 'static {
    /// Ordered adapter table for this concept's operations.
    type Table: Send + Sync + 'static;
}

/// Implementation mapping for one (concept, concrete type) pair.
///
/// Implemented by [`implement!`](crate::implement). `dispatch_table` builds
/// the full adapter table for `Self`; the registry calls it at most once per
/// pair and keeps the result for the lifetime of the process, so the cost of
/// building is irrelevant and the table itself must not capture any state.
pub trait Implements<C: Concept + ?Sized>: Sized + 'static {
    /// Builds the complete adapter table for `Self` under concept `C`.
    fn dispatch_table() -> C::Table;
}
