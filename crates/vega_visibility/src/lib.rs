//! Nightly viewing windows and scheduling queries for fixed stars.
//!
//! This crate provides:
//! - Tonight's viewing window: the star's above-horizon interval intersected
//!   with the night's darkness, including re-rise before dawn
//! - Scheduling queries: visible now, next visibility start, visibility end
//!   with its reason
//! - A bounded stepped search, used as a fallback when the closed form has
//!   no bound
//! - The presentation aggregate with formatted times
//! - A fixed-clock diurnal track for overlays
//!
//! Every query validates the [`VisibilityConfig`](vega_sky::VisibilityConfig)
//! it is given and is otherwise a pure function of its inputs.

pub mod error;
pub mod format;
pub mod info;
pub mod schedule;
pub mod search;
pub mod track;
pub mod window;
pub mod window_types;

pub use error::VisibilityError;
pub use format::format_time;
pub use info::visibility_info;
pub use schedule::{is_visible, next_visibility_start, visibility_end};
pub use search::{search_next_visibility_start, search_visibility_end};
pub use track::{DiurnalTrack, TRACK_POINTS, TRACK_STEP_MINUTES, TrackPoint, diurnal_track};
pub use window::{next_window, night_windows, tonight_window};
pub use window_types::{
    EndReason, ViewingWindow, VisibilityEnd, VisibilityInfo, VisibilityStatus,
};
