//! Timed replay of search traces, and the [`Session`] that ties a live grid
//! to the search engine.
//!
//! A search runs to completion on a snapshot; playback then applies its
//! trace to the live grid one node at a time. Callers either drive a
//! [`Playback`] step by step from their own loop or hand it to
//! [`Playback::run`], which sleeps between steps and wakes early on
//! cancellation.
//!
//! ```
//! use gridpath_playback::{Outcome, Session, SessionConfig, Speed};
//!
//! let mut session = Session::new(SessionConfig {
//!     speed: Speed::Instant,
//!     ..SessionConfig::default()
//! })
//! .unwrap();
//! let playback = session.run().unwrap();
//! let outcome = session.play(playback, |_| {});
//! assert!(matches!(outcome, Outcome::Completed(_)));
//! ```

mod context;
mod error;
mod scheduler;
mod session;
mod timing;

pub use context::Context;
pub use error::{PlaybackError, SessionError};
pub use scheduler::{
    CancelHandle, Outcome, Playback, PlaybackState, Scheduler, Stats, Step, replay_order,
};
pub use session::{Session, SessionConfig};
pub use timing::{Speed, Timing};
