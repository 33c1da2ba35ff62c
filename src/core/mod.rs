//=========================================================================
// Core Systems
//
// Game logic that runs on the engine's logic thread.
//
// Modules:
// - `tasks`:   time-driven animation and delay records
// - `timer`:   round countdown and beat oscillator
// - `economy`: ledger, generators and purchase rules
// - `remote`:  identity and leaderboard client over a transport
// - `storage`: key-value persistence for the login token
// - `host`:    events in, presentation commands out
// - `input`:   per-frame input snapshot and handler registry
// - `scene`:   menu and play scenes plus the state machine
// - `globals`: per-frame context and the system container
//
//=========================================================================

pub mod economy;
pub mod globals;
pub mod host;
pub mod input;
pub mod remote;
pub mod scene;
pub mod storage;
pub mod tasks;
pub mod timer;
