//! Resize layout computation.
//!
//! Translates a target box and a [`ResizeMode`] into a render rectangle and
//! a canvas size. Pure geometry: the renderer allocates the canvas, paints
//! any background and bars, and draws the source into the render rectangle.
//!
//! # Example
//!
//! ```
//! use raster_layout::{Resize, ResizeMode, Size};
//!
//! let layout = Resize::new(ResizeMode::ExtendConstrained, 400.0, 400.0)
//!     .compute(Size::new(800.0, 600.0))
//!     .unwrap();
//!
//! // Shrunk to fit, letterboxed onto the requested 400×400 canvas.
//! assert_eq!(layout.render.size(), Size::new(400.0, 300.0));
//! assert_eq!(layout.canvas, Size::new(400.0, 400.0));
//! assert_eq!(layout.render.y, 50.0);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::bars::{Bars, compute_bars};
use crate::color::CanvasColor;
use crate::geometry::{LayoutError, RectF, Size};

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// How to fit a source image into the target box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// Shrink to fit within the target, never enlarge. Aspect ratio is kept
    /// and the canvas is exactly the target size; bars fill the remainder.
    #[default]
    ExtendConstrained,
    /// Like [`ExtendConstrained`](Self::ExtendConstrained), but small images
    /// are enlarged to fit.
    ExtendScaled,
    /// Shrink to fit within the target, never enlarge. The canvas shrinks
    /// to the rendered size.
    Constrain,
    /// Shrink or enlarge to fit within the target. The canvas shrinks to the
    /// rendered size.
    Scale,
    /// Scale to exactly the target size, distorting the aspect ratio.
    Stretch,
    /// Output width equals the target width; height follows the aspect
    /// ratio. The target height must be 0.
    FixWidth,
    /// Output height equals the target height; width follows the aspect
    /// ratio. The target width must be 0.
    FixHeight,
    /// Cover the whole target box, keeping the aspect ratio. Overflow on one
    /// axis is cropped by the canvas.
    Fill,
}

/// Layout flags implied by a [`ResizeMode`].
///
/// Only [`ResizeMode::flags`] and [`Default`] produce values, so every flag
/// set is one the layout algorithm knows. The all-false default is the
/// minimal behavior: stretch without upscaling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResizeFlags {
    maintain_aspect_ratio: bool,
    allow_upscaling: bool,
    fix_width: bool,
    fix_height: bool,
    fill: bool,
    bars: bool,
}

impl ResizeFlags {
    pub const fn maintain_aspect_ratio(self) -> bool {
        self.maintain_aspect_ratio
    }

    pub const fn allow_upscaling(self) -> bool {
        self.allow_upscaling
    }

    /// Width is fixed; the target height must be 0.
    pub const fn fix_width(self) -> bool {
        self.fix_width
    }

    /// Height is fixed; the target width must be 0.
    pub const fn fix_height(self) -> bool {
        self.fix_height
    }

    /// Cover the target box, cropping overflow.
    pub const fn fill(self) -> bool {
        self.fill
    }

    /// Canvas keeps the target size and bars fill the remainder.
    pub const fn bars(self) -> bool {
        self.bars
    }
}

impl ResizeMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ExtendConstrained,
        Self::ExtendScaled,
        Self::Constrain,
        Self::Scale,
        Self::Stretch,
        Self::FixWidth,
        Self::FixHeight,
        Self::Fill,
    ];

    /// The layout flags this mode implies.
    pub const fn flags(self) -> ResizeFlags {
        let aspect = ResizeFlags {
            maintain_aspect_ratio: true,
            allow_upscaling: false,
            fix_width: false,
            fix_height: false,
            fill: false,
            bars: false,
        };
        let scaled = ResizeFlags {
            allow_upscaling: true,
            ..aspect
        };
        match self {
            Self::Constrain => aspect,
            Self::ExtendConstrained => ResizeFlags {
                bars: true,
                ..aspect
            },
            Self::ExtendScaled => ResizeFlags {
                bars: true,
                ..scaled
            },
            Self::Fill => ResizeFlags {
                fill: true,
                ..scaled
            },
            Self::FixHeight => ResizeFlags {
                fix_height: true,
                ..scaled
            },
            Self::FixWidth => ResizeFlags {
                fix_width: true,
                ..scaled
            },
            Self::Scale => scaled,
            Self::Stretch => ResizeFlags {
                maintain_aspect_ratio: false,
                ..scaled
            },
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExtendConstrained => "extendconstrained",
            Self::ExtendScaled => "extendscaled",
            Self::Constrain => "constrain",
            Self::Scale => "scale",
            Self::Stretch => "stretch",
            Self::FixWidth => "fixwidth",
            Self::FixHeight => "fixheight",
            Self::Fill => "fill",
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeMode {
    type Err = LayoutError;

    /// Case-insensitive. `"default"` maps to
    /// [`ExtendConstrained`](Self::ExtendConstrained).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("default") {
            return Ok(Self::default());
        }
        Self::ALL
            .into_iter()
            .find(|m| s.eq_ignore_ascii_case(m.name()))
            .ok_or(LayoutError::invalid(
                "mode",
                "expected extendconstrained|extendscaled|constrain|scale|stretch|fixwidth|fixheight|fill",
            ))
    }
}

/// Resize request: mode, target box, and paint options for the draw plan.
///
/// # Example
///
/// ```
/// use raster_layout::{Resize, Size};
///
/// // Fixed height: the width is derived from the source aspect ratio.
/// let layout = Resize::fix_height(300.0)
///     .compute(Size::new(1000.0, 500.0))
///     .unwrap();
/// assert_eq!(layout.canvas, Size::new(600.0, 300.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Resize {
    pub mode: ResizeMode,
    /// Target width, or 0 with [`ResizeMode::FixHeight`].
    pub width: f64,
    /// Target height, or 0 with [`ResizeMode::FixWidth`].
    pub height: f64,
    /// Leave uncovered canvas transparent instead of painting background
    /// and bars.
    pub keep_transparency: bool,
    pub background: CanvasColor,
    pub bar_color: CanvasColor,
}

impl Resize {
    /// Resize into a `width`×`height` box.
    pub fn new(mode: ResizeMode, width: f64, height: f64) -> Self {
        Self {
            mode,
            width,
            height,
            keep_transparency: true,
            background: CanvasColor::white(),
            bar_color: CanvasColor::white(),
        }
    }

    /// Fix the output width; height follows the source aspect ratio.
    pub fn fix_width(width: f64) -> Self {
        Self::new(ResizeMode::FixWidth, width, 0.0)
    }

    /// Fix the output height; width follows the source aspect ratio.
    pub fn fix_height(height: f64) -> Self {
        Self::new(ResizeMode::FixHeight, 0.0, height)
    }

    /// Uniform zoom of `source` in [`ResizeMode::Scale`].
    ///
    /// Target dimensions are truncated to whole pixels. A zoom that
    /// truncates an axis to 0 is rejected by [`compute`](Self::compute).
    pub fn from_zoom(source: Size, zoom: f64) -> Result<Self, LayoutError> {
        let source = source.validate("source")?;
        if !zoom.is_finite() || zoom <= 0.0 {
            debug!(zoom, "rejected zoom level");
            return Err(LayoutError::invalid("zoom", "must be finite and positive"));
        }
        let w = (source.width * zoom).trunc();
        let h = (source.height * zoom).trunc();
        Ok(Self::new(ResizeMode::Scale, w, h))
    }

    /// Keep (or drop) transparency in uncovered canvas areas.
    pub fn keep_transparency(mut self, keep: bool) -> Self {
        self.keep_transparency = keep;
        self
    }

    /// Set the background color used when transparency is not kept.
    pub fn background(mut self, color: CanvasColor) -> Self {
        self.background = color;
        self
    }

    /// Set the color of the letterbox bars.
    pub fn bar_color(mut self, color: CanvasColor) -> Self {
        self.bar_color = color;
        self
    }

    /// Compute the layout for a source image of the given size.
    pub fn compute(&self, source: Size) -> Result<RenderLayout, LayoutError> {
        compute_layout(source, self.width, self.height, self.mode.flags())
    }
}

/// Where the source is drawn and how large the canvas is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderLayout {
    /// Destination of the scaled source, centered on the canvas. The origin
    /// goes negative when the render rectangle overflows (fill mode).
    pub render: RectF,
    /// Output canvas size before pixel rounding.
    pub canvas: Size,
    /// Whether the mode letterboxes uncovered areas with bars.
    pub bars: bool,
}

impl RenderLayout {
    /// Canvas size in whole pixels (rounded, at least 1×1).
    pub fn canvas_pixels(&self) -> (u32, u32) {
        self.canvas.to_pixels()
    }

    /// Bar rectangles to paint, empty for modes without bars.
    pub fn bars(&self) -> Bars {
        if self.bars {
            compute_bars(self.canvas, self.render)
        } else {
            Bars::default()
        }
    }

    /// Whether the render rectangle extends past the canvas (source is
    /// cropped by the canvas bounds).
    pub fn is_cropped(&self) -> bool {
        self.render.x < 0.0
            || self.render.y < 0.0
            || self.render.right() > self.canvas.width
            || self.render.bottom() > self.canvas.height
    }
}

/// Compute a render layout from explicit flags.
///
/// `target_width` must be 0 exactly when [`ResizeFlags::fix_height`] is set
/// and at least 1 otherwise; `target_height` likewise with
/// [`ResizeFlags::fix_width`].
pub fn compute_layout(
    source: Size,
    target_width: f64,
    target_height: f64,
    flags: ResizeFlags,
) -> Result<RenderLayout, LayoutError> {
    trace!(
        source_w = source.width,
        source_h = source.height,
        target_width,
        target_height,
        "computing resize layout"
    );
    let source = source.validate("source")?;
    check_target(target_width, flags.fix_height, "width")?;
    check_target(target_height, flags.fix_width, "height")?;

    let (iw, ih) = (source.width, source.height);
    let (tw, th) = (target_width, target_height);

    let (rw, rh, cw, ch) = if !flags.maintain_aspect_ratio {
        let (rw, rh) = if flags.allow_upscaling {
            (tw, th)
        } else {
            (iw.min(tw), ih.min(th))
        };
        (rw, rh, tw, th)
    } else if flags.fill {
        let k = tw / iw;
        let (mut rw, mut rh) = (iw * k, ih * k);
        if rh < th {
            // Factor taken from the height before it is overwritten.
            let k = th / rh;
            rw *= k;
            rh = th;
        }
        (rw, rh, tw, th)
    } else {
        let (mut rw, mut rh) = (iw, ih);
        if flags.allow_upscaling && rw < tw {
            rh *= tw / rw;
            rw = tw;
        }
        if flags.allow_upscaling && rh < th {
            rw *= th / rh;
            rh = th;
        }
        if rw > tw && !flags.fix_height {
            rh *= tw / rw;
            rw = tw;
        }
        if rh > th && !flags.fix_width {
            rw *= th / rh;
            rh = th;
        }
        let cw = if flags.fix_height || !flags.bars { rw } else { tw };
        let ch = if flags.fix_width || !flags.bars { rh } else { th };
        (rw, rh, cw, ch)
    };

    let render = RectF::new(cw / 2.0 - rw / 2.0, ch / 2.0 - rh / 2.0, rw, rh);
    trace!(
        render_w = rw,
        render_h = rh,
        canvas_w = cw,
        canvas_h = ch,
        "resize layout computed"
    );
    Ok(RenderLayout {
        render,
        canvas: Size::new(cw, ch),
        bars: flags.bars,
    })
}

fn check_target(value: f64, derived: bool, param: &'static str) -> Result<(), LayoutError> {
    if derived {
        if value != 0.0 {
            debug!(param, value, "target must be 0 for the derived axis");
            return Err(LayoutError::invalid(param, "must be 0 when derived from the other axis"));
        }
    } else if !value.is_finite() || value < 1.0 {
        debug!(param, value, "target below one pixel");
        return Err(LayoutError::invalid(param, "must be 1 or larger"));
    }
    Ok(())
}
