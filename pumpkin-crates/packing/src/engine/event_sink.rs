use enumset::EnumSet;

use crate::containers::KeyedVec;
use crate::engine::domain_events::IntDomainEvent;
use crate::engine::variables::DomainId;

/// While a propagator runs, the changes it makes to domains are captured as events in the event
/// sink. When the propagator finishes, the event sink is drained to notify all the propagators
/// that subscribe to those events.
///
/// The event sink ignores an event for a domain which is already recorded and not drained yet.
#[derive(Default, Clone, Debug)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<IntDomainEvent>>,
    events: Vec<(IntDomainEvent, DomainId)>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: IntDomainEvent, domain: DomainId) {
        let elem = &mut self.present[domain];

        if elem.insert(event) {
            self.events.push((event, domain));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (IntDomainEvent, DomainId)> + '_ {
        self.events.drain(..).inspect(|&(event, domain)| {
            let _ = self.present[domain].remove(event);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_sink_is_empty() {
        let mut sink = EventSink::default();

        let events = sink.drain().collect::<Vec<_>>();
        assert!(events.is_empty());
    }

    #[test]
    fn duplicate_events_are_recorded_once() {
        let mut sink = EventSink::default();
        sink.grow();

        sink.event_occurred(IntDomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(IntDomainEvent::LowerBound, DomainId::new(0));

        let events = sink.drain().collect::<Vec<_>>();
        assert_eq!(events, vec![(IntDomainEvent::LowerBound, DomainId::new(0))]);
    }

    #[test]
    fn an_event_can_occur_again_after_draining() {
        let mut sink = EventSink::default();
        sink.grow();
        sink.grow();

        sink.event_occurred(IntDomainEvent::Assign, DomainId::new(1));
        let _ = sink.drain().count();

        sink.event_occurred(IntDomainEvent::Assign, DomainId::new(1));
        sink.event_occurred(IntDomainEvent::Removal, DomainId::new(0));

        let events = sink.drain().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                (IntDomainEvent::Assign, DomainId::new(1)),
                (IntDomainEvent::Removal, DomainId::new(0))
            ]
        );
    }
}
