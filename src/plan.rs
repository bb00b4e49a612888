//! Draw plans: the paint operations a renderer executes for a layout.
//!
//! The layout engines only compute geometry. A plan adds the paint options
//! (background, bar color, transparency, border) and orders the operations
//! so that a backend can replay them one by one onto a fresh canvas.
//!
//! # Example
//!
//! ```
//! use raster_layout::{CanvasColor, DrawOp, Resize, ResizeMode, Size};
//!
//! let plan = Resize::new(ResizeMode::ExtendConstrained, 400.0, 400.0)
//!     .keep_transparency(false)
//!     .bar_color(CanvasColor::black())
//!     .plan(Size::new(800.0, 600.0))
//!     .unwrap();
//!
//! assert_eq!(plan.canvas, (400, 400));
//! // Background, two bars, then the image.
//! assert_eq!(plan.ops.len(), 4);
//! assert!(matches!(plan.ops.last(), Some(DrawOp::DrawImage { .. })));
//! ```

use alloc::vec::Vec;

use crate::color::CanvasColor;
use crate::geometry::{Affine, LayoutError, RectF, Size};
use crate::resize::{RenderLayout, Resize};
use crate::rotate::{Border, Rotate, RotationLayout};

/// A single paint operation, in canvas pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill an axis-aligned rect with a solid color.
    Fill { rect: RectF, color: CanvasColor },
    /// Draw the whole source image into `dest` (in source-space units when
    /// `transform` is not the identity), mapped through `transform`.
    /// Draw with high-quality interpolation and clip to the canvas.
    DrawImage { dest: RectF, transform: Affine },
    /// Stroke the outline of `rect` mapped through `transform`.
    StrokeRect {
        rect: RectF,
        transform: Affine,
        border: Border,
    },
}

/// Paint operations for a resize.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizePlan {
    pub layout: RenderLayout,
    /// Canvas to allocate, in whole pixels.
    pub canvas: (u32, u32),
    /// Whether the canvas must start transparent (alpha preserved).
    pub keep_transparency: bool,
    pub ops: Vec<DrawOp>,
}

/// Paint operations for a rotation.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationPlan {
    pub layout: RotationLayout,
    /// Canvas to allocate, in whole pixels.
    pub canvas: (u32, u32),
    pub ops: Vec<DrawOp>,
}

impl Resize {
    /// Compute the layout and the paint operations for it.
    ///
    /// When transparency is kept, the plan only draws the image and the
    /// uncovered canvas stays transparent. Otherwise the whole canvas is
    /// filled with the background first, followed by the bars if the mode
    /// has any.
    pub fn plan(&self, source: Size) -> Result<ResizePlan, LayoutError> {
        let layout = self.compute(source)?;
        let canvas = layout.canvas_pixels();
        let mut ops = Vec::with_capacity(6);

        if !self.keep_transparency {
            ops.push(DrawOp::Fill {
                rect: RectF::new(0.0, 0.0, canvas.0 as f64, canvas.1 as f64),
                color: self.background,
            });
            ops.extend(layout.bars().into_iter().map(|bar| DrawOp::Fill {
                rect: bar.rect,
                color: self.bar_color,
            }));
        }

        ops.push(DrawOp::DrawImage {
            dest: layout.render,
            transform: Affine::IDENTITY,
        });

        trace!(ops = ops.len(), "resize plan built");
        Ok(ResizePlan {
            layout,
            canvas,
            keep_transparency: self.keep_transparency,
            ops,
        })
    }
}

impl Rotate {
    /// Compute the layout and the paint operations for it.
    ///
    /// A restricted rotation always paints the background (when one is
    /// set); an unrestricted one only when the canvas differs from the
    /// source. The border is stroked around the rotated image whenever the
    /// layout is clipped.
    pub fn plan(&self, source: Size) -> Result<RotationPlan, LayoutError> {
        let layout = self.compute(source)?;
        let canvas = layout.canvas.to_pixels();
        let source_rect = RectF::from_size(layout.source);
        let mut ops = Vec::with_capacity(3);

        if layout.is_identity() {
            ops.push(DrawOp::DrawImage {
                dest: source_rect,
                transform: Affine::IDENTITY,
            });
            return Ok(RotationPlan {
                layout,
                canvas,
                ops,
            });
        }

        let paint_background = self.restrict_dimensions || layout.clipped;
        if let Some(color) = self.background.filter(|_| paint_background) {
            ops.push(DrawOp::Fill {
                rect: RectF::from_size(layout.canvas),
                color,
            });
        }

        let transform = layout.transform();
        ops.push(DrawOp::DrawImage {
            dest: source_rect,
            transform,
        });

        if let Some(border) = self.border.filter(|_| layout.clipped) {
            ops.push(DrawOp::StrokeRect {
                rect: source_rect,
                transform,
                border,
            });
        }

        trace!(ops = ops.len(), "rotation plan built");
        Ok(RotationPlan {
            layout,
            canvas,
            ops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resize::ResizeMode;

    fn fills(ops: &[DrawOp]) -> Vec<(RectF, CanvasColor)> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Fill { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn transparent_resize_only_draws_image() {
        let plan = Resize::new(ResizeMode::ExtendConstrained, 400.0, 400.0)
            .plan(Size::new(800.0, 600.0))
            .unwrap();
        assert!(plan.keep_transparency);
        assert_eq!(
            plan.ops,
            vec![DrawOp::DrawImage {
                dest: RectF::new(0.0, 50.0, 400.0, 300.0),
                transform: Affine::IDENTITY,
            }]
        );
    }

    #[test]
    fn opaque_resize_paints_background_then_bars() {
        let red = CanvasColor::rgb(255, 0, 0);
        let plan = Resize::new(ResizeMode::ExtendConstrained, 400.0, 400.0)
            .keep_transparency(false)
            .background(CanvasColor::white())
            .bar_color(red)
            .plan(Size::new(800.0, 600.0))
            .unwrap();
        let f = fills(&plan.ops);
        assert_eq!(
            f,
            vec![
                (RectF::new(0.0, 0.0, 400.0, 400.0), CanvasColor::white()),
                (RectF::new(0.0, 0.0, 400.0, 50.0), red),
                (RectF::new(0.0, 350.0, 400.0, 50.0), red),
            ]
        );
    }

    #[test]
    fn opaque_resize_without_bar_mode_has_only_background() {
        let plan = Resize::new(ResizeMode::Fill, 50.0, 200.0)
            .keep_transparency(false)
            .plan(Size::new(100.0, 100.0))
            .unwrap();
        assert_eq!(plan.canvas, (50, 200));
        assert_eq!(fills(&plan.ops).len(), 1);
        assert_eq!(
            plan.ops.last(),
            Some(&DrawOp::DrawImage {
                dest: RectF::new(-75.0, 0.0, 200.0, 200.0),
                transform: Affine::IDENTITY,
            })
        );
    }

    #[test]
    fn resize_plan_propagates_errors() {
        let err = Resize::new(ResizeMode::Scale, 0.0, 10.0)
            .plan(Size::new(10.0, 10.0))
            .unwrap_err();
        assert_eq!(err.param(), "width");
    }

    #[test]
    fn zero_rotation_plan_is_a_copy() {
        let plan = Rotate::new(0.0)
            .background(Some(CanvasColor::black()))
            .border(Some(Border::new(CanvasColor::black(), 1.0)))
            .plan(Size::new(30.0, 20.0))
            .unwrap();
        assert_eq!(plan.canvas, (30, 20));
        assert_eq!(
            plan.ops,
            vec![DrawOp::DrawImage {
                dest: RectF::new(0.0, 0.0, 30.0, 20.0),
                transform: Affine::IDENTITY,
            }]
        );
    }

    #[test]
    fn unrestricted_rotation_paints_background_when_clipped() {
        let border = Border::new(CanvasColor::black(), 2.0);
        let plan = Rotate::new(45.0)
            .background(Some(CanvasColor::white()))
            .border(Some(border))
            .plan(Size::new(300.0, 200.0))
            .unwrap();
        assert_eq!(plan.canvas, (354, 354));
        assert_eq!(plan.ops.len(), 3);
        assert_eq!(
            plan.ops[0],
            DrawOp::Fill {
                rect: RectF::new(0.0, 0.0, 354.0, 354.0),
                color: CanvasColor::white(),
            }
        );
        let transform = plan.layout.transform();
        assert!(matches!(plan.ops[1], DrawOp::DrawImage { transform: t, .. } if t == transform));
        assert!(matches!(plan.ops[2], DrawOp::StrokeRect { border: b, .. } if b == border));
    }

    #[test]
    fn unrestricted_half_turn_skips_background_and_border() {
        let plan = Rotate::new(180.0)
            .background(Some(CanvasColor::white()))
            .border(Some(Border::new(CanvasColor::black(), 1.0)))
            .plan(Size::new(300.0, 200.0))
            .unwrap();
        assert_eq!(plan.ops.len(), 1);
        assert!(matches!(plan.ops[0], DrawOp::DrawImage { .. }));
    }

    #[test]
    fn restricted_rotation_always_paints_background() {
        let plan = Rotate::new(180.0)
            .restrict_dimensions(true)
            .background(Some(CanvasColor::white()))
            .border(Some(Border::new(CanvasColor::black(), 1.0)))
            .plan(Size::new(300.0, 200.0))
            .unwrap();
        // Background yes, border no: zoom is exactly 1.
        assert_eq!(plan.ops.len(), 2);
        assert!(matches!(plan.ops[0], DrawOp::Fill { .. }));
    }

    #[test]
    fn absent_background_and_border_are_skipped() {
        let plan = Rotate::new(30.0)
            .restrict_dimensions(true)
            .plan(Size::new(300.0, 200.0))
            .unwrap();
        assert!(plan.layout.clipped);
        assert_eq!(plan.ops.len(), 1);
    }
}
