//=========================================================================
// Input
//=========================================================================
//
// Per-frame host input and the element→action handler tables scenes
// dispatch through.
//
// Architecture:
//   HostEvent ──EventCollector──> FrameInput ──HandlerRegistry──> [Action]
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_input;
mod registry;

//=== Public API ==========================================================

pub use frame_input::FrameInput;
pub use registry::{Action, HandlerRegistry};
