//! Floating-point geometry shared by the resize and rotation engines.
//!
//! Everything here is a small `Copy` value. Sizes and rectangles stay in
//! `f64` so that centering and scaling are exact until a renderer decides to
//! materialize a pixel buffer.

use core::fmt;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Width × height in (possibly fractional) pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of a decoded image with integer pixel dimensions.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Round to whole pixels, never below 1×1.
    pub fn to_pixels(self) -> (u32, u32) {
        (round_px(self.width), round_px(self.height))
    }

    /// Center point of a box of this size anchored at the origin.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub(crate) fn validate(self, param: &'static str) -> Result<Self, LayoutError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(LayoutError::invalid(param, "dimensions must be finite and positive"))
        }
    }
}

fn round_px(v: f64) -> u32 {
    let r = v.round();
    if r < 1.0 || r.is_nan() {
        1
    } else if r >= u32::MAX as f64 {
        u32::MAX
    } else {
        r as u32
    }
}

/// A point in canvas or source coordinates (y grows downward).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with floating-point origin and extent.
///
/// The origin may be negative: a render rectangle larger than its canvas
/// (fill mode) hangs off both edges and the renderer clips it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `p` lies inside or on the edge of this rect.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Overlap with `other`, or `None` when they share no area.
    pub fn intersect(&self, other: &RectF) -> Option<RectF> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(RectF::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }
}

/// 2D affine transform mapping `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)`.
///
/// Same component layout as SVG's `matrix(a b c d e f)`, so it can be handed
/// to most 2D backends unchanged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    pub const fn scale(factor: f64) -> Self {
        Self {
            a: factor,
            d: factor,
            ..Self::IDENTITY
        }
    }

    /// Clockwise rotation in y-down coordinates, in degrees.
    ///
    /// Quarter turns produce exact 0/±1 coefficients.
    pub fn rotate_degrees(angle: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(angle);
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Apply `self` first, then `next`.
    pub fn then(self, next: Affine) -> Affine {
        let n = next;
        let s = self;
        Affine {
            a: n.a * s.a + n.c * s.b,
            b: n.b * s.a + n.d * s.b,
            c: n.a * s.c + n.c * s.d,
            d: n.b * s.c + n.d * s.d,
            e: n.a * s.e + n.c * s.f + n.e,
            f: n.b * s.e + n.d * s.f + n.f,
        }
    }

    /// Map a point through the transform.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Inverse transform, for backends that sample by mapping canvas pixels
    /// back into the source. `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

/// `(sin, cos)` of an angle in degrees, exact at multiples of 90°.
///
/// `sin(π)` in floating point is ~1.2e-16, which is enough to turn a 180°
/// rotation of a 300×200 image into a 300.00000000000006 wide bounding box.
pub(crate) fn sin_cos_degrees(angle: f64) -> (f64, f64) {
    let mut turn = angle % 360.0;
    if turn < 0.0 {
        turn += 360.0;
    }
    if turn == 0.0 {
        (0.0, 1.0)
    } else if turn == 90.0 {
        (1.0, 0.0)
    } else if turn == 180.0 {
        (0.0, -1.0)
    } else if turn == 270.0 {
        (-1.0, 0.0)
    } else {
        let rad = turn.to_radians();
        (rad.sin(), rad.cos())
    }
}

/// Layout computation error.
///
/// Every variant is a contract violation by the caller. Nothing is retried
/// or recovered internally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// An argument is outside its accepted range.
    InvalidArgument {
        /// Name of the offending parameter (`"width"`, `"angle"`, ...).
        param: &'static str,
        /// What the parameter must satisfy.
        reason: &'static str,
    },
}

impl LayoutError {
    pub(crate) const fn invalid(param: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { param, reason }
    }

    /// Name of the rejected parameter.
    pub const fn param(&self) -> &'static str {
        match self {
            Self::InvalidArgument { param, .. } => param,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { param, reason } => {
                write!(f, "invalid argument `{param}`: {reason}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn to_pixels_rounds_and_clamps() {
        assert_eq!(Size::new(399.5, 300.49).to_pixels(), (400, 300));
        assert_eq!(Size::new(0.2, 0.0).to_pixels(), (1, 1));
    }

    #[test]
    fn validity() {
        assert!(Size::new(1.0, 1.0).is_valid());
        assert!(!Size::new(0.0, 1.0).is_valid());
        assert!(!Size::new(1.0, -3.0).is_valid());
        assert!(!Size::new(f64::NAN, 1.0).is_valid());
        assert!(!Size::new(f64::INFINITY, 1.0).is_valid());
    }

    #[test]
    fn quarter_turns_are_exact() {
        assert_eq!(sin_cos_degrees(0.0), (0.0, 1.0));
        assert_eq!(sin_cos_degrees(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_degrees(180.0), (0.0, -1.0));
        assert_eq!(sin_cos_degrees(270.0), (-1.0, 0.0));
        assert_eq!(sin_cos_degrees(-90.0), (-1.0, 0.0));
        assert_eq!(sin_cos_degrees(450.0), (1.0, 0.0));
    }

    #[test]
    fn rotation_is_clockwise_in_y_down() {
        // +x axis rotated 90° clockwise points down the screen (+y).
        let p = Affine::rotate_degrees(90.0).apply(Point::new(1.0, 0.0));
        assert_eq!(p, Point::new(0.0, 1.0));
    }

    #[test]
    fn then_applies_left_to_right() {
        let t = Affine::translate(10.0, 0.0).then(Affine::scale(2.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(20.0, 0.0));

        let t = Affine::scale(2.0).then(Affine::translate(10.0, 0.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(10.0, 0.0));
    }

    #[test]
    fn then_matches_sequential_application() {
        let steps = [
            Affine::translate(-150.0, -100.0),
            Affine::rotate_degrees(33.0),
            Affine::scale(0.75),
            Affine::translate(150.0, 100.0),
        ];
        let fused = steps.iter().fold(Affine::IDENTITY, |acc, s| acc.then(*s));
        for p in [
            Point::new(0.0, 0.0),
            Point::new(300.0, 0.0),
            Point::new(12.5, 199.0),
        ] {
            let seq = steps.iter().fold(p, |q, s| s.apply(q));
            assert!(close(fused.apply(p), seq), "{p:?}");
        }
    }

    #[test]
    fn invert_round_trips() {
        let t = Affine::translate(-150.0, -100.0)
            .then(Affine::rotate_degrees(20.0))
            .then(Affine::scale(0.5))
            .then(Affine::translate(40.0, 60.0));
        let inv = t.invert().unwrap();
        let p = Point::new(17.0, 3.5);
        assert!(close(inv.apply(t.apply(p)), p));
        assert!(Affine::scale(0.0).invert().is_none());
    }

    #[test]
    fn intersect() {
        let a = RectF::new(-75.0, 0.0, 200.0, 200.0);
        let canvas = RectF::new(0.0, 0.0, 50.0, 200.0);
        assert_eq!(a.intersect(&canvas), Some(canvas));
        assert_eq!(RectF::new(0.0, 0.0, 10.0, 10.0).intersect(&RectF::new(10.0, 0.0, 5.0, 5.0)), None);
    }

    #[test]
    fn error_display_names_param() {
        let e = LayoutError::invalid("width", "must be 1 or larger");
        assert_eq!(e.param(), "width");
        let mut buf = String::new();
        core::fmt::write(&mut buf, format_args!("{e}")).unwrap();
        assert_eq!(buf, "invalid argument `width`: must be 1 or larger");
    }
}
