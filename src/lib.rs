//! Layout computation for raster image resizing and rotation.
//!
//! Pure geometry: no pixel operations and no decoding. `no_std` compatible.
//! Given an image's dimensions and a target, computes where the image is
//! drawn, how large the canvas is, which letterbox bars to fill, and the
//! transform for arbitrary-angle rotation. A rendering backend does the
//! actual drawing.
//!
//! # Modules
//!
//! - [`resize`]: Resize modes (ExtendConstrained, Fill, FixWidth, ...) and render layouts
//! - [`bars`]: Letterbox bars around the render rectangle
//! - [`rotate`]: Arbitrary-angle rotation layout and placement transform
//! - [`plan`]: Ordered draw operations for a renderer (needs `alloc`)
//! - [`geometry`]: Sizes, rects, affine transforms, errors
//! - [`color`]: Canvas colors for background, bars and borders
//! - `svg`: SVG diagrams of resize and rotation layouts (needs `svg`)
//!
//! # Example
//!
//! ```
//! use raster_layout::{Resize, ResizeMode, Size};
//!
//! let layout = Resize::new(ResizeMode::Fill, 50.0, 200.0)
//!     .compute(Size::new(100.0, 100.0))
//!     .unwrap();
//!
//! // Scaled to cover the target; the canvas crops the horizontal overflow.
//! assert_eq!(layout.render.size(), Size::new(200.0, 200.0));
//! assert_eq!(layout.render.x, -75.0);
//! assert_eq!(layout.canvas_pixels(), (50, 200));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Structured events when the `tracing` feature is on; nothing otherwise.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

pub mod bars;
pub mod color;
pub mod geometry;
#[cfg(feature = "alloc")]
pub mod plan;
pub mod resize;
pub mod rotate;
#[cfg(feature = "svg")]
pub mod svg;

pub use bars::{Bar, BarEdge, Bars, compute_bars};
pub use color::CanvasColor;
pub use geometry::{Affine, LayoutError, Point, RectF, Size};
#[cfg(feature = "alloc")]
pub use plan::{DrawOp, ResizePlan, RotationPlan};
pub use resize::{RenderLayout, Resize, ResizeFlags, ResizeMode, compute_layout};
pub use rotate::{Border, QuarterTurn, Rotate, RotationLayout, compute_rotation};
