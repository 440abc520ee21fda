use crate::basic_types::ConflictKind;
use crate::basic_types::Inconsistency;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::variables::IntegerVariable;

/// Collects what is derived about the bin of a single item, so that it can be applied at once.
///
/// Any number of bins can be excluded. At most one bin can be forced: forcing a second, different
/// bin makes [`TellCache::tell`] fail before anything is applied to the domain.
#[derive(Debug)]
pub struct TellCache {
    excluded: Vec<i32>,
    forced: Forced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Forced {
    Nothing,
    Bin(i32),
    Contradiction,
}

impl TellCache {
    pub fn with_capacity(num_bins: usize) -> Self {
        TellCache {
            excluded: Vec::with_capacity(num_bins),
            forced: Forced::Nothing,
        }
    }

    pub fn exclude(&mut self, bin: i32) {
        self.excluded.push(bin);
    }

    pub fn force(&mut self, bin: i32) {
        self.forced = match self.forced {
            Forced::Nothing => Forced::Bin(bin),
            Forced::Bin(forced) if forced == bin => Forced::Bin(bin),
            _ => Forced::Contradiction,
        };
    }

    /// Applies the collected facts to `var` and resets the cache.
    pub fn tell<Var: IntegerVariable>(
        &mut self,
        context: &mut PropagationContextMut<'_>,
        var: &Var,
    ) -> Result<(), Inconsistency> {
        let forced = std::mem::replace(&mut self.forced, Forced::Nothing);

        match forced {
            Forced::Contradiction => {
                self.excluded.clear();
                return Err(ConflictKind::ContradictingBins.into());
            }
            Forced::Bin(bin) => context.assign(var, bin)?,
            Forced::Nothing => {}
        }

        for bin in self.excluded.drain(..) {
            context.remove(var, bin)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::*;
    use crate::engine::Assignments;

    #[test]
    fn two_forced_bins_fail_without_changes() {
        let mut assignments = Assignments::default();
        let bin = assignments.grow(0, 3);
        let mut context = PropagationContextMut::new(&mut assignments, EnumSet::empty());

        let mut tell_cache = TellCache::with_capacity(4);
        tell_cache.exclude(3);
        tell_cache.force(0);
        tell_cache.force(1);

        let result = tell_cache.tell(&mut context, &bin);

        assert!(matches!(
            result,
            Err(Inconsistency::Conflict(conflict)) if conflict.kind == ConflictKind::ContradictingBins
        ));
        assert!(!context.has_modified_domains());
        assert_eq!(assignments.get_upper_bound(bin), 3);
    }

    #[test]
    fn exclusions_are_applied_and_the_cache_is_reset() {
        let mut assignments = Assignments::default();
        let bin = assignments.grow(0, 3);
        let mut context = PropagationContextMut::new(&mut assignments, EnumSet::empty());

        let mut tell_cache = TellCache::with_capacity(4);
        tell_cache.exclude(1);
        tell_cache.exclude(1);
        tell_cache.exclude(3);
        tell_cache
            .tell(&mut context, &bin)
            .expect("values remain");

        tell_cache.force(2);
        tell_cache.force(2);
        tell_cache
            .tell(&mut context, &bin)
            .expect("2 is in the domain");

        assert_eq!(assignments.get_assigned_value(bin), Some(2));
    }

    #[test]
    fn excluding_the_forced_bin_empties_the_domain() {
        let mut assignments = Assignments::default();
        let bin = assignments.grow(0, 3);
        let mut context = PropagationContextMut::new(&mut assignments, EnumSet::empty());

        let mut tell_cache = TellCache::with_capacity(4);
        tell_cache.force(2);
        tell_cache.exclude(2);

        assert_eq!(
            tell_cache.tell(&mut context, &bin),
            Err(Inconsistency::EmptyDomain)
        );
    }
}
