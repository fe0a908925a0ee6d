//! Conway's Game of Life on a fixed backing array with a resizable, centered
//! active window, a throttled display-synced step loop, and a surface-agnostic
//! renderer. Hosts own a [`Life`] and forward frames and input to it.

pub mod config;
pub mod grid;
pub mod life;
pub mod mapper;
pub mod patterns;
pub mod render;
pub mod scheduler;
pub mod stepper;

pub use config::{ConfigError, LifeConfig};
pub use grid::{GridStore, Snapshot};
pub use life::{FrameOutcome, Life};
pub use mapper::{Cell, Layout};
pub use patterns::{PATTERNS, Pattern};
pub use render::{DrawCommand, DrawList, Palette, PixelRect, Rgb, Stats, Surface};
pub use scheduler::{RunState, Scheduler, SpeedTable};
