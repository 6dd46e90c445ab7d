//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Terminal, FileSystem)
//! but are themselves concrete structs, not traits.

mod session;
mod store;

pub use session::{GameSession, RoundOutcome};
pub use store::TreeStore;
