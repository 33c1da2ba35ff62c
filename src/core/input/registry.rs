//=========================================================================
// Handler Registry
//=========================================================================
//
// Maps (element, pointer phase) pairs to scene-defined actions.
//
// Architecture:
//   FrameInput.pointer ──> dispatch() ──> [A] ──> Scene::handle(action)
//
// Scenes bind their actions once on enter and toggle whole elements on
// and off as the round progresses. Actions carry no references into the
// scene, so the registry can be owned by the scene it dispatches to.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::FrameInput;
use crate::core::host::{ElementId, PointerPhase};

//=== Action Trait ========================================================

/// Marker trait for scene-defined action enums.
///
/// # Example
///
/// ```
/// use deep_debt::core::input::Action;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Start, Rename }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== HandlerRegistry =====================================================

/// Element/phase bindings for one scene.
pub struct HandlerRegistry<A: Action> {
    bindings: HashMap<(ElementId, PointerPhase), A>,
    disabled: HashSet<ElementId>,
}

impl<A: Action> HandlerRegistry<A> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            disabled: HashSet::new(),
        }
    }

    //--- Binding ----------------------------------------------------------

    /// Binds `action` to `phase` on `element`, replacing any previous binding.
    pub fn bind(&mut self, element: ElementId, phase: PointerPhase, action: A) {
        if let Some(previous) = self.bindings.insert((element, phase), action) {
            warn!(target: "scene", "Rebound {:?}/{:?} from {:?} to {:?}", element, phase, previous, action);
        }
    }

    /// Enables or disables every binding on `element`.
    pub fn set_enabled(&mut self, element: ElementId, enabled: bool) {
        let changed = if enabled {
            self.disabled.remove(&element)
        } else {
            self.disabled.insert(element)
        };

        if changed {
            debug!(target: "scene", "{:?} handlers {}", element, if enabled { "enabled" } else { "disabled" });
        }
    }

    pub fn is_enabled(&self, element: ElementId) -> bool {
        !self.disabled.contains(&element)
    }

    //--- Dispatch ---------------------------------------------------------

    /// Resolves this frame's pointer events to actions, in arrival order.
    pub fn dispatch(&self, input: &FrameInput) -> Vec<A> {
        input
            .pointer
            .iter()
            .filter(|(element, _)| self.is_enabled(*element))
            .filter_map(|key| self.bindings.get(key).copied())
            .collect()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Action> Default for HandlerRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
