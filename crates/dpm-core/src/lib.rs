//! `dpm-core` — foundational types for the `dpm` (decide → plan → move)
//! agent framework.
//!
//! This crate is a dependency of every other `dpm-*` crate.  It has no
//! `dpm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `Vec2`, angle helpers                                 |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Vec2, wrap_angle};
pub use ids::{EdgeId, NodeId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
