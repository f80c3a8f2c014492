//! Fire Room: a small incremental game engine.
//!
//! A fire to keep alive, a stranger who becomes a builder, and a village
//! economy of wood, traps, huts and a cart. Presentation layers drive the
//! engine through `GameEngine` and observe it only through the `EventBus`.

pub mod bus;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod narrative;
pub mod rng;
pub mod room;
pub mod room_timers;
pub mod scheduler;
pub mod service;
pub mod snapshot;
pub mod state;
pub mod text;
pub mod trap;
pub mod types;
pub mod vehicle;
