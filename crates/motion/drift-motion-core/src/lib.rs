//! Drift Motion Core (engine-agnostic)
//!
//! Small frame-stepped integrators behind the landing page's decorative
//! interactions. Nothing here touches a DOM: hosts forward timestamps and
//! input samples, then apply the returned offsets and transform strings.
//!
//! - [`CarouselEngine`]: constant drift, wheel/drag momentum, seamless looping.
//! - [`PointerFollower`]: eased cursor ring with a raw dot and hover regions.
//! - [`PillRotator`]: timed rotation through text variants.
//! - [`FrameLoop`]: explicit ownership of the "frame scheduled" flag.

pub mod carousel;
pub mod config;
pub mod easing;
pub mod error;
pub mod follower;
pub mod frame;
pub mod pill;
pub mod spotlight;
pub mod track;

pub use carousel::{
    CarouselEngine, CarouselFrame, CarouselState, DragCursor, VelocitySource, WheelInput,
    WheelOutcome,
};
pub use config::{CarouselConfig, Config, EaseShaping, FollowerConfig, PillConfig};
pub use error::MotionError;
pub use follower::{
    marker_transform, CursorRegion, FollowerFrame, FollowerState, Point, PointerEnvironment,
    PointerFollower,
};
pub use frame::FrameLoop;
pub use pill::{PillRotator, PillVariant};
pub use spotlight::{relative_percent, Rect};
pub use track::{loop_sequence, LoopSlot, TrackLayout};
