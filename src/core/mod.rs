//! Platform-agnostic core - shared between the browser mount, CLI and preview

pub mod animator;
pub mod config;
pub mod error;
pub mod field;
pub mod stats;
pub mod surface;

pub use animator::{Animator, LoopState, TickSource};
pub use config::FieldConfig;
pub use error::ConfigError;
pub use field::{DotStyle, Field, Point, PointerState};
pub use stats::FrameStats;
pub use surface::{DrawCommand, RecordingSurface, Rgba, Surface};
