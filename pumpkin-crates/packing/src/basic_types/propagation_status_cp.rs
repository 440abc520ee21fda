use crate::engine::EmptyDomain;

/// The result of invoking a propagator. The propagation can either succeed, in which case the
/// [`PropagationOutcome`] tells the store how to treat the propagator from now on, or it identifies
/// an [`Inconsistency`].
pub type PropagationStatusCP = Result<PropagationOutcome, Inconsistency>;

/// How a propagator left its constraint after a successful call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagationOutcome {
    /// The propagator is at fixpoint; it only needs to run again after another propagator (or a
    /// decision) changes one of its variables.
    Stable,
    /// The propagator changed its own variables and may be able to derive more from those
    /// changes.
    NotYetAtFixpoint,
    /// The constraint is entailed by the current domains; the propagator never needs to run again
    /// in this branch.
    Subsumed,
}

/// The ways in which propagation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain became empty while applying a deduction.
    EmptyDomain,
    /// The propagator recognised that the current domains cannot be extended to a solution.
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator which is _not_ an empty domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    pub kind: ConflictKind,
}

impl From<ConflictKind> for PropagatorConflict {
    fn from(kind: ConflictKind) -> Self {
        PropagatorConflict { kind }
    }
}

impl From<ConflictKind> for Inconsistency {
    fn from(kind: ConflictKind) -> Self {
        Inconsistency::Conflict(kind.into())
    }
}

/// The reason given with a [`PropagatorConflict`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// An item is forced into two different bins.
    ContradictingBins,
    /// No subset of the sizes which can still go into the bin reaches its load bounds.
    UnreachableLoad { bin: usize },
    /// The items which remain cannot be packed in the available bins.
    InsufficientBins { required: usize, available: usize },
    /// More committed to a bin than its capacity.
    ExceededCapacity { bin: usize },
    /// Two variables which have to differ are fixed to the same value.
    EqualValues,
    /// A set of variables which have to take pairwise different values has fewer values than
    /// variables.
    TooFewValues { variables: usize, values: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_convert_into_inconsistencies() {
        let inconsistency = Inconsistency::from(ConflictKind::UnreachableLoad { bin: 1 });
        let status: PropagationStatusCP = Err(inconsistency);

        assert_eq!(status, Err(inconsistency));
        assert_eq!(
            inconsistency,
            Inconsistency::Conflict(PropagatorConflict {
                kind: ConflictKind::UnreachableLoad { bin: 1 }
            })
        );
        assert_ne!(Inconsistency::from(EmptyDomain), inconsistency);
    }
}
