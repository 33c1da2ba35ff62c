//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the host (renderer, audio, windowing) with the game core.
//
// Components:
// - `interface`: event and command types (the contract)
// - `event_collector`: core-side event draining, once per frame
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::{
    website_texture, ElementId, HostCommand, HostEvent, HostFrame, PointerPhase, SoundCue, Tint,
    BLOCKED_WEBSITE, MENU_MUSIC, PLAY_MUSIC,
};
