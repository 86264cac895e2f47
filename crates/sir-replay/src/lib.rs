//! Presentation layer: replay scenes, epidemic curves and playback.
//!
//! Everything here reads a recorded [`sir_events::Timeline`]; nothing
//! re-derives simulation outcomes.

pub mod curve;
pub mod error;
pub mod loader;
pub mod palette;
pub mod playback;
pub mod scene;
pub mod summary;

pub use curve::EpidemicCurve;
pub use error::{ReplayError, ReplayResult};
pub use loader::{load_run, write_replay, LoadedRun};
pub use playback::Playback;
pub use scene::ReplayScene;
pub use summary::summary_panel;
