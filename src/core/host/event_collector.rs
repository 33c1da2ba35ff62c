//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → FrameInput → TickControl
//
// Bounded polling prevents starvation; anything left over is picked up
// on the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::HostEvent;
use crate::core::input::FrameInput;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events into a per-frame [`FrameInput`].
pub(crate) struct EventCollector {
    receiver: Receiver<HostEvent>,
    input: FrameInput,
}

impl EventCollector {
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            input: FrameInput::new(),
        }
    }

    /// Collects pending host events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input = FrameInput::new();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(HostEvent::WindowClosed) => return TickControl::Exit,
                Ok(event) => {
                    self.input.record(event);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "engine", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Takes the collected input, leaving an empty snapshot.
    pub(crate) fn take_input(&mut self) -> FrameInput {
        std::mem::take(&mut self.input)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{ElementId, PointerPhase};
    use crossbeam_channel::unbounded;

    fn click(element: ElementId) -> HostEvent {
        HostEvent::Pointer { element, phase: PointerPhase::Up }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<HostEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.take_input().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(click(ElementId::Website)).unwrap();
        tx.send(HostEvent::PointerDrag { held: true, delta_y: 4.0 }).unwrap();
        tx.send(click(ElementId::Website)).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        let input = collector.take_input();
        assert_eq!(input.pointer.len(), 2);
        assert_eq!(input.drag_delta, 4.0);
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(HostEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(click(ElementId::Start)).unwrap();
        collector.collect_frame();
        assert_eq!(collector.take_input().pointer.len(), 1);

        collector.collect_frame();
        assert!(collector.take_input().is_empty());
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..EventCollector::MAX_EVENTS_PER_FRAME + 5 {
            tx.send(click(ElementId::Website)).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.take_input().pointer.len(), EventCollector::MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.take_input().pointer.len(), 5);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<HostEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
