/// Receives solver events and decides how the iteration should proceed.
///
/// Solvers report every recorded iteration to an observer. Observers can log,
/// capture, or steer the run: returning `Some(action)` requests a
/// solver-specific action, while `None` lets the solver continue unchanged.
///
/// Closures `FnMut(&E) -> Option<A>` are observers, `()` is the no-op
/// observer, and a pair `(first, second)` forwards every event to both.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

/// Both observers always see the event; the first one's action wins.
impl<E, A, O1, O2> Observer<E, A> for (O1, O2)
where
    O1: Observer<E, A>,
    O2: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let first = self.0.observe(event);
        let second = self.1.observe(event);
        first.or(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
        Skip,
    }

    fn drive<O: Observer<usize, Action>>(mut observer: O, events: usize) -> Option<Action> {
        (1..=events).find_map(|event| observer.observe(&event))
    }

    #[test]
    fn unit_never_acts() {
        assert_eq!(drive((), 10), None);
    }

    #[test]
    fn closure_can_stop() {
        let action = drive(|event: &usize| (*event == 3).then_some(Action::Stop), 10);
        assert_eq!(action, Some(Action::Stop));
    }

    #[test]
    fn pair_sees_every_event_and_prefers_first() {
        let mut seen = Vec::new();
        let first = |event: &usize| (*event == 2).then_some(Action::Skip);
        let second = |event: &usize| {
            seen.push(*event);
            (*event == 2).then_some(Action::Stop)
        };

        let action = drive((first, second), 5);

        assert_eq!(action, Some(Action::Skip));
        assert_eq!(seen, vec![1, 2]);
    }
}
