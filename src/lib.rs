//! Playback of recorded hand-tracking capture as an animated hand skeleton.
//!
//! A capture file maps frame indices to per-frame records holding joint
//! positions for a left and a right hand. [`parse`] turns such a file into a
//! [`store::FrameStore`], and [`playback::PlaybackController`] replays it at a
//! fixed rate, handing world-space joints and bone segments to a
//! [`playback::Renderer`].
//!
//! ```no_run
//! use hand_replay::parse::load_frames_from_file;
//! use hand_replay::playback::PlaybackController;
//! use hand_replay::pose::PoseRenderer;
//! use hand_replay::topology::Topology;
//!
//! let store = load_frames_from_file("hand_poses.json", Topology::ManoReduced)?;
//! let mut controller = PlaybackController::new(store, 30.0, PoseRenderer::new(Topology::ManoReduced))?;
//! controller.on_toggle_play();
//! controller.on_time_advanced(1.0 / 30.0);
//! # Ok::<(), hand_replay::error::Error>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod parse;
pub mod playback;
pub mod pose;
pub mod store;
pub mod topology;
pub mod types;
pub mod utils;
#[cfg(feature = "visualize")]
pub mod visualize;

pub use error::{Error, Result};
