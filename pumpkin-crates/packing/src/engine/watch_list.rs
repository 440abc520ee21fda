use enumset::EnumSet;

use crate::containers::KeyedVec;
use crate::engine::domain_events::IntDomainEvent;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::DomainId;

/// For every domain, the propagators which subscribed to it and the events they are interested
/// in.
#[derive(Clone, Debug, Default)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, Vec<Watcher>>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Watcher {
    pub(crate) propagator: PropagatorId,
    pub(crate) events: EnumSet<IntDomainEvent>,
}

impl WatchList {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Vec::new());
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: IntDomainEvent,
        domain: DomainId,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.watchers[domain]
            .iter()
            .filter(move |watcher| watcher.events.contains(event))
            .map(|watcher| watcher.propagator)
    }

    fn add_watcher(&mut self, domain: DomainId, propagator: PropagatorId, events: EnumSet<IntDomainEvent>) {
        let watchers = &mut self.watchers[domain];

        // A propagator which watches the same domain through several views is notified once.
        if let Some(watcher) = watchers
            .iter_mut()
            .find(|watcher| watcher.propagator == propagator)
        {
            watcher.events |= events;
        } else {
            watchers.push(Watcher { propagator, events });
        }
    }
}

/// Used to register a propagator for notifications about events to a particular variable.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator: PropagatorId,
    watch_list: &'a mut WatchList,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator: PropagatorId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator,
            watch_list,
        }
    }

    pub fn watch_all(&mut self, domain: DomainId, events: EnumSet<IntDomainEvent>) {
        self.watch_list.add_watcher(domain, self.propagator, events);
    }
}
