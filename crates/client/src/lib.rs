//! Local duel client.
//!
//! # Architecture
//!
//! ```text
//! main
//!   ├─→ ClientConfig + RuntimeConfig (environment, .env)
//!   ├─→ ContentFactory (data/*.ron, data/config.toml)
//!   ├─→ CombatService (runtime)
//!   └─→ Pilot (picks player actions from the view)
//! ```
//!
//! The binary plays one duel for a configured character and prints the
//! final combat view as JSON.

pub mod config;
pub mod logging;
pub mod pilot;

pub use config::ClientConfig;
pub use pilot::Pilot;
