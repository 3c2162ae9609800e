//! The exit boundary: where finished and abandoned records go.

use crate::machine::Event;

/// Receives the accumulated record when a session ends.
///
/// Implementations own everything that happens afterwards (persistence,
/// navigation away from the flow); the controller only reports.
pub trait ExitGateway<R> {
    /// The terminal step completed. Called once per session.
    fn on_flow_complete(&mut self, record: R);

    /// The user left early, via save-and-exit or back from the first step.
    fn on_early_exit(&mut self, record: R);
}

impl<R: Clone> Event<R> {
    /// Forward session-ending events to `gateway`; other events are ignored.
    pub fn dispatch<G>(&self, gateway: &mut G)
    where
        G: ExitGateway<R> + ?Sized,
    {
        match self {
            Event::Completed(record) => gateway.on_flow_complete(record.clone()),
            Event::ExitedEarly(record) => gateway.on_early_exit(record.clone()),
            Event::Merged | Event::Navigated { .. } | Event::Rejected(_) => {}
        }
    }
}

/// Gateway that keeps every record it receives, in order.
#[derive(Debug, Clone)]
pub struct RecordingGateway<R> {
    pub completed: Vec<R>,
    pub exited: Vec<R>,
}

impl<R> RecordingGateway<R> {
    pub fn new() -> Self {
        Self {
            completed: Vec::new(),
            exited: Vec::new(),
        }
    }

    /// The most recent completed record.
    pub fn last_completed(&self) -> Option<&R> {
        self.completed.last()
    }

    pub fn last_exited(&self) -> Option<&R> {
        self.exited.last()
    }
}

impl<R> Default for RecordingGateway<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ExitGateway<R> for RecordingGateway<R> {
    fn on_flow_complete(&mut self, record: R) {
        self.completed.push(record);
    }

    fn on_early_exit(&mut self, record: R) {
        self.exited.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Rejection;

    #[test]
    fn test_dispatch_routes_by_event() {
        let mut gateway = RecordingGateway::new();

        Event::Completed("full").dispatch(&mut gateway);
        Event::ExitedEarly("partial").dispatch(&mut gateway);
        Event::<&str>::Merged.dispatch(&mut gateway);
        Event::<&str>::Navigated { from: 1, to: 2 }.dispatch(&mut gateway);
        Event::<&str>::Rejected(Rejection::FlowFinished).dispatch(&mut gateway);

        assert_eq!(gateway.completed, vec!["full"]);
        assert_eq!(gateway.exited, vec!["partial"]);
    }
}
