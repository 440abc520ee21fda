use thiserror::Error;

#[cfg(doc)]
use crate::State;

/// Errors related to adding constraints to the [`State`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// Error which indicates that adding a propagator led to infeasibility at the root.
    #[error("Adding the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator,
    /// Error which indicates that a constraint was attempted to be added while the [`State`] was
    /// in an infeasible state.
    #[error("Adding constraint failed because the state is infeasible")]
    InfeasibleState,
    /// The arguments of a constraint which have to be given per item (or per bin) differ in
    /// length.
    #[error("Expected {expected} {argument} but {actual} were provided")]
    ArgumentSizeMismatch {
        argument: &'static str,
        expected: usize,
        actual: usize,
    },
    /// An item was given a negative size.
    #[error("Item {item} has negative size {size}")]
    NegativeSize { item: usize, size: i32 },
    /// A capacity of a multi-dimensional packing is negative.
    #[error("The capacity {capacity} of dimension {dimension} is negative")]
    NegativeCapacity { dimension: usize, capacity: i32 },
    /// The total size of the items cannot be represented in the domain of a load variable.
    #[error("The total size of the items exceeds the largest representable load")]
    SizeOverflow,
}
