//=========================================================================
// Deep Debt Library Root
//
// This crate is the headless core of a two-screen clicker game: a menu
// with remote identity and leaderboard, and a timed play round with an
// incremental economy.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`, `HostLink`)
// - Expose the core systems for hosts and tests that drive them directly
// - Keep presentation out: the host renders `HostCommand`s and reports
//   `HostEvent`s
//
// Typical usage:
// ```no_run
// use deep_debt::core::remote::OfflineTransport;
// use deep_debt::core::storage::MemoryStore;
// use deep_debt::EngineBuilder;
//
// fn main() {
//     let (engine, link) = EngineBuilder::new().build(OfflineTransport, MemoryStore::new());
//     let handle = engine.spawn();
//     // feed link.events, drain link.commands
//     drop(link);
//     handle.join().ok();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the game systems (scenes, economy, tasks, remote).
// `config` holds every tunable of a round.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the builder and the fixed-rate logic loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use config::GameConfig;
pub use engine::{Engine, EngineBuilder, HostLink};
