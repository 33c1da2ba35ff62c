//=========================================================================
// Frame Input
//=========================================================================
//
// Snapshot of everything the host reported during one frame.
//
//=========================================================================

use crate::core::host::{ElementId, HostEvent, PointerPhase};

/// Host input gathered for a single update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer events in arrival order.
    pub pointer: Vec<(ElementId, PointerPhase)>,

    /// True if the primary button was held at the last drag report.
    pub drag_held: bool,

    /// Vertical drag distance accumulated while held.
    pub drag_delta: f32,

    /// Answer to a name prompt, if one arrived. The inner `None` is a
    /// cancelled prompt.
    pub name_entry: Option<Option<String>>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one host event into the snapshot.
    ///
    /// `WindowClosed` is handled by the collector and ignored here.
    pub fn record(&mut self, event: HostEvent) {
        match event {
            HostEvent::Pointer { element, phase } => self.pointer.push((element, phase)),
            HostEvent::PointerDrag { held, delta_y } => {
                self.drag_held = held;
                if held {
                    self.drag_delta += delta_y;
                }
            }
            HostEvent::NameEntered(name) => self.name_entry = Some(name),
            HostEvent::WindowClosed => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pointer.is_empty() && self.drag_delta == 0.0 && self.name_entry.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
