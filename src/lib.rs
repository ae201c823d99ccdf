//! Hero particle background
//!
//! An ambient, animated backdrop for a landing page hero section: a fixed
//! set of drifting points joined by fading lines when close, with dots that
//! glow near the pointer.
//!
//! - [`core`] holds the platform-agnostic simulation and drawing interface
//! - `web` (feature `wasm`) mounts it on a page canvas, driven by `requestAnimationFrame`
//! - `preview` (feature `native`) paints it in an egui window for local tuning

pub mod core;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

#[cfg(feature = "native")]
pub mod preview;
#[cfg(feature = "native")]
pub mod theme;
