//! Arbitrary-angle rotation layout.
//!
//! Computes the output canvas and the placement transform for drawing a
//! source image rotated clockwise by any angle in `[0, 360)`.
//!
//! ```text
//!     unrestricted                   restricted
//!     ┌─────────────┐                ┌─────────┐
//!     │    ╱╲       │                │  ╱╲     │
//!     │  ╱    ╲     │ canvas grows   │ ╱  ╲    │ canvas stays,
//!     │  ╲      ╲   │ to the rotated │ ╲   ╲   │ image shrinks
//!     │    ╲    ╱   │ bounding box   │  ╲  ╱   │ by `zoom`
//!     │      ╲╱     │                └─────────┘
//!     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use raster_layout::{Rotate, Size};
//!
//! let r = Rotate::new(45.0).compute(Size::new(300.0, 200.0)).unwrap();
//! assert_eq!(r.canvas, Size::new(354.0, 354.0));
//! assert!(r.clipped);
//!
//! let r = Rotate::new(90.0).compute(Size::new(300.0, 200.0)).unwrap();
//! assert_eq!(r.canvas, Size::new(200.0, 300.0));
//! ```

use crate::color::CanvasColor;
use crate::geometry::{Affine, LayoutError, Point, RectF, Size, sin_cos_degrees};


/// Exact quarter-turn rotations, which a renderer can perform losslessly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    /// 90 degrees clockwise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Rotate270,
}

/// Line drawn around the rotated image when its corners expose the
/// background.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    pub color: CanvasColor,
    /// Stroke width in canvas pixels.
    pub width: f64,
}

impl Border {
    pub const fn new(color: CanvasColor, width: f64) -> Self {
        Self { color, width }
    }
}

/// Rotation request.
///
/// `background` and `border` are only used by the draw plan; `None` means
/// the renderer skips that step entirely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rotate {
    /// Clockwise angle in degrees, `0 <= angle < 360`.
    pub angle: f64,
    /// Keep the source dimensions and shrink the rotated image to fit.
    pub restrict_dimensions: bool,
    pub background: Option<CanvasColor>,
    pub border: Option<Border>,
}

impl Rotate {
    /// Rotate clockwise by `angle` degrees, growing the canvas as needed.
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            restrict_dimensions: false,
            background: None,
            border: None,
        }
    }

    /// Keep the canvas at the source size, shrinking the image to fit.
    pub fn restrict_dimensions(mut self, restrict: bool) -> Self {
        self.restrict_dimensions = restrict;
        self
    }

    /// Fill exposed canvas area with `color`.
    pub fn background(mut self, color: Option<CanvasColor>) -> Self {
        self.background = color;
        self
    }

    /// Outline the rotated image with `border`.
    pub fn border(mut self, border: Option<Border>) -> Self {
        self.border = border;
        self
    }

    /// Compute the rotation layout for a source of the given size.
    pub fn compute(&self, source: Size) -> Result<RotationLayout, LayoutError> {
        compute_rotation(source, self.angle, self.restrict_dimensions)
    }
}

/// Canvas size and placement transform for a rotated image.
///
/// The renderer draws the source at `(0, 0, source.width, source.height)`
/// through [`transform`](Self::transform): translate by `-center_before`,
/// rotate by `angle`, scale by `zoom`, translate by `center_after`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RotationLayout {
    pub source: Size,
    /// Clockwise angle in degrees.
    pub angle: f64,
    /// Output canvas size. Whole pixels unless restricted to a fractional
    /// source.
    pub canvas: Size,
    /// Rotation pivot in source coordinates (source center).
    pub center_before: Point,
    /// Where the pivot lands on the canvas (canvas center).
    pub center_after: Point,
    /// Uniform scale applied after rotating; below 1 only when restricted.
    pub zoom: f64,
    /// Whether canvas corners are left uncovered, i.e. a background or
    /// border should be drawn.
    pub clipped: bool,
}

impl RotationLayout {
    /// Source → canvas transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(-self.center_before.x, -self.center_before.y)
            .then(Affine::rotate_degrees(self.angle))
            .then(Affine::scale(self.zoom))
            .then(Affine::translate(self.center_after.x, self.center_after.y))
    }

    /// Whether the layout leaves the source untouched.
    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }

    /// The exact quarter turn this rotation is, if any.
    pub fn quarter_turn(&self) -> Option<QuarterTurn> {
        if self.zoom != 1.0 {
            return None;
        }
        match self.angle {
            a if a == 90.0 => Some(QuarterTurn::Rotate90),
            a if a == 180.0 => Some(QuarterTurn::Rotate180),
            a if a == 270.0 => Some(QuarterTurn::Rotate270),
            _ => None,
        }
    }

    /// Source corners mapped onto the canvas, clockwise from the source's
    /// top-left.
    pub fn corners(&self) -> [Point; 4] {
        let t = self.transform();
        let (w, h) = (self.source.width, self.source.height);
        [
            t.apply(Point::new(0.0, 0.0)),
            t.apply(Point::new(w, 0.0)),
            t.apply(Point::new(w, h)),
            t.apply(Point::new(0.0, h)),
        ]
    }

    /// Axis-aligned bounds of the drawn image on the canvas.
    pub fn drawn_bounds(&self) -> RectF {
        let c = self.corners();
        let (mut x0, mut y0, mut x1, mut y1) = (c[0].x, c[0].y, c[0].x, c[0].y);
        for p in &c[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        RectF::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Compute the canvas and transform for rotating `source` clockwise by
/// `angle` degrees.
///
/// With `restrict_dimensions` the canvas keeps the source size and the image
/// is scaled down until its rotated bounding box fits. Otherwise the canvas
/// grows to the rotated bounding box, rounded to whole pixels.
pub fn compute_rotation(
    source: Size,
    angle: f64,
    restrict_dimensions: bool,
) -> Result<RotationLayout, LayoutError> {
    trace!(
        source_w = source.width,
        source_h = source.height,
        angle,
        restrict_dimensions,
        "computing rotation layout"
    );
    let source = source.validate("source")?;
    if !angle.is_finite() || !(0.0..360.0).contains(&angle) {
        debug!(angle, "rotation angle out of range");
        return Err(LayoutError::invalid("angle", "must be in [0, 360)"));
    }

    let center_before = source.center();

    if angle == 0.0 {
        return Ok(RotationLayout {
            source,
            angle,
            canvas: source,
            center_before,
            center_after: center_before,
            zoom: 1.0,
            clipped: false,
        });
    }

    let (w, h) = (source.width, source.height);
    let (sin, cos) = sin_cos_degrees(angle);
    let (sin, cos) = (sin.abs(), cos.abs());
    let bounding = Size::new(w * cos + h * sin, w * sin + h * cos);

    let layout = if restrict_dimensions {
        let zoom = (w / bounding.width).min(h / bounding.height);
        RotationLayout {
            source,
            angle,
            canvas: source,
            center_before,
            center_after: center_before,
            zoom,
            clipped: zoom != 1.0,
        }
    } else {
        let (cw, ch) = bounding.to_pixels();
        let canvas = Size::from_pixels(cw, ch);
        RotationLayout {
            source,
            angle,
            canvas,
            center_before,
            center_after: canvas.center(),
            zoom: 1.0,
            clipped: canvas != source,
        }
    };
    trace!(
        canvas_w = layout.canvas.width,
        canvas_h = layout.canvas.height,
        zoom = layout.zoom,
        clipped = layout.clipped,
        "rotation layout computed"
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn zero_is_identity() {
        for restrict in [false, true] {
            let r = compute_rotation(Size::new(300.0, 200.0), 0.0, restrict).unwrap();
            assert_eq!(r.canvas, Size::new(300.0, 200.0));
            assert!(r.transform().is_identity());
            assert!(!r.clipped);
            assert!(r.is_identity());
            assert_eq!(r.quarter_turn(), None);
        }
    }

    #[test]
    fn angle_range() {
        let src = Size::new(10.0, 10.0);
        for bad in [-0.5, 360.0, 720.0, f64::NAN, f64::INFINITY] {
            let err = compute_rotation(src, bad, false).unwrap_err();
            assert_eq!(err.param(), "angle", "{bad}");
        }
        assert!(compute_rotation(src, 359.999, false).is_ok());
    }

    #[test]
    fn source_validated_first() {
        let err = compute_rotation(Size::new(0.0, 10.0), 400.0, false).unwrap_err();
        assert_eq!(err.param(), "source");
    }

    #[test]
    fn forty_five_degrees_unrestricted() {
        let r = compute_rotation(Size::new(300.0, 200.0), 45.0, false).unwrap();
        assert_eq!(r.canvas, Size::new(354.0, 354.0));
        assert_eq!(r.center_after, Point::new(177.0, 177.0));
        assert_eq!(r.zoom, 1.0);
        assert!(r.clipped);
    }

    #[test]
    fn quarter_turns_snap_exactly() {
        let src = Size::new(300.0, 200.0);
        let r = compute_rotation(src, 90.0, false).unwrap();
        assert_eq!(r.canvas, Size::new(200.0, 300.0));
        assert!(r.clipped);
        assert_eq!(r.quarter_turn(), Some(QuarterTurn::Rotate90));

        let r = compute_rotation(src, 180.0, false).unwrap();
        assert_eq!(r.canvas, src);
        assert!(!r.clipped);
        assert_eq!(r.quarter_turn(), Some(QuarterTurn::Rotate180));

        let r = compute_rotation(src, 270.0, false).unwrap();
        assert_eq!(r.canvas, Size::new(200.0, 300.0));
        assert_eq!(r.quarter_turn(), Some(QuarterTurn::Rotate270));
    }

    #[test]
    fn square_quarter_turn_is_not_clipped() {
        let r = compute_rotation(Size::new(64.0, 64.0), 90.0, false).unwrap();
        assert_eq!(r.canvas, Size::new(64.0, 64.0));
        assert!(!r.clipped);
    }

    #[test]
    fn rotate_90_moves_top_left_to_top_right() {
        let r = compute_rotation(Size::new(300.0, 200.0), 90.0, false).unwrap();
        let [tl, tr, br, bl] = r.corners();
        assert!(close(tl, Point::new(200.0, 0.0)), "{tl:?}");
        assert!(close(tr, Point::new(200.0, 300.0)), "{tr:?}");
        assert!(close(br, Point::new(0.0, 300.0)), "{br:?}");
        assert!(close(bl, Point::new(0.0, 0.0)), "{bl:?}");
    }

    #[test]
    fn restricted_keeps_canvas_and_shrinks() {
        let r = compute_rotation(Size::new(300.0, 200.0), 90.0, true).unwrap();
        assert_eq!(r.canvas, Size::new(300.0, 200.0));
        assert!((r.zoom - 200.0 / 300.0).abs() < EPS);
        assert!(r.clipped);
        assert_eq!(r.quarter_turn(), None);
        let b = r.drawn_bounds();
        assert!((b.height - 200.0).abs() < EPS);
        assert!((b.width - 200.0 * 200.0 / 300.0).abs() < EPS);
    }

    #[test]
    fn restricted_half_turn_is_unclipped() {
        let r = compute_rotation(Size::new(300.0, 200.0), 180.0, true).unwrap();
        assert_eq!(r.zoom, 1.0);
        assert!(!r.clipped);
    }

    #[test]
    fn builder_passes_through() {
        let r = Rotate::new(30.0)
            .restrict_dimensions(true)
            .background(Some(CanvasColor::black()))
            .compute(Size::new(640.0, 480.0))
            .unwrap();
        assert_eq!(r.canvas, Size::new(640.0, 480.0));
        assert!(r.zoom < 1.0);
    }

    #[test]
    fn angle_sweep_invariants() {
        let mut failures = Vec::new();
        let sources = [(300.0, 200.0), (1.0, 1.0), (17.0, 999.0), (4000.0, 3000.0)];
        for (sw, sh) in sources {
            let src = Size::new(sw, sh);
            for step in 0..720 {
                let angle = step as f64 * 0.5;
                let tag = format!("{sw}x{sh} @ {angle}");

                let r = compute_rotation(src, angle, true).unwrap();
                if r.canvas != src {
                    failures.push(format!("{tag}: restricted canvas {:?}", r.canvas));
                }
                if r.zoom > 1.0 + EPS {
                    failures.push(format!("{tag}: zoom {}", r.zoom));
                }
                let b = r.drawn_bounds();
                let tol = 1e-6 * sw.max(sh);
                let slack = RectF::new(-tol, -tol, sw + 2.0 * tol, sh + 2.0 * tol);
                if !r.corners().iter().all(|&p| slack.contains(p)) {
                    failures.push(format!("{tag}: restricted overflow {b:?}"));
                }
                if (b.width - sw).abs() > tol && (b.height - sh).abs() > tol {
                    failures.push(format!("{tag}: restricted fit touches no edge {b:?}"));
                }

                let r = compute_rotation(src, angle, false).unwrap();
                let b = r.drawn_bounds();
                if (b.width - r.canvas.width).abs() > 0.5 + tol
                    || (b.height - r.canvas.height).abs() > 0.5 + tol
                {
                    failures.push(format!("{tag}: bounds {b:?} vs canvas {:?}", r.canvas));
                }
                let (bc, cc) = (b.center(), r.canvas.center());
                if (bc.x - cc.x).abs() > tol || (bc.y - cc.y).abs() > tol {
                    failures.push(format!("{tag}: off-center {b:?}"));
                }
                if r.clipped != (r.canvas != src) {
                    failures.push(format!("{tag}: clipped flag"));
                }
            }
        }
        assert!(
            failures.is_empty(),
            "{} failures:\n{}",
            failures.len(),
            failures[..failures.len().min(20)].join("\n")
        );
    }
}
