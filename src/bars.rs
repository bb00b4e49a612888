//! Letterbox bars covering canvas area outside the render rectangle.
//!
//! ```text
//!     top ≥ 1                 left ≥ 1
//!     ┌──────────────┐        ┌──┬────────┬──┐
//!     │     Top      │        │  │        │  │
//!     ├──────────────┤        │L │ render │ R│
//!     │    render    │        │  │        │  │
//!     ├──────────────┤        │  │        │  │
//!     │    Bottom    │        └──┴────────┴──┘
//!     └──────────────┘
//! ```
//!
//! Bars come in pairs. A pair is emitted only when its leading offset is at
//! least one pixel, so floating-point noise never produces sub-pixel
//! slivers. Both pairs appear when the render rectangle is smaller than the
//! canvas on both axes (a small source in a non-upscaling mode).

use crate::geometry::{RectF, Size};

/// Which side of the render rectangle a bar sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BarEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// A single filler bar.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bar {
    pub edge: BarEdge,
    pub rect: RectF,
}

/// Zero, two or four bars, stored inline.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bars {
    bars: [Option<Bar>; 4],
    len: usize,
}

impl Bars {
    fn push(&mut self, edge: BarEdge, rect: RectF) {
        self.bars[self.len] = Some(Bar { edge, rect });
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bar on `edge`, if one was emitted.
    pub fn get(&self, edge: BarEdge) -> Option<Bar> {
        self.iter().find(|b| b.edge == edge)
    }

    /// Bars in emission order: top, bottom, left, right.
    pub fn iter(&self) -> impl Iterator<Item = Bar> + '_ {
        self.bars[..self.len].iter().flatten().copied()
    }
}

impl IntoIterator for Bars {
    type Item = Bar;
    type IntoIter = core::iter::Flatten<core::array::IntoIter<Option<Bar>, 4>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.into_iter().flatten()
    }
}

/// Compute the bars needed to fill `canvas` around `render`.
pub fn compute_bars(canvas: Size, render: RectF) -> Bars {
    let mut bars = Bars::default();
    let (cw, ch) = (canvas.width, canvas.height);

    if render.y >= 1.0 {
        bars.push(BarEdge::Top, RectF::new(0.0, 0.0, cw, render.y));
        bars.push(
            BarEdge::Bottom,
            RectF::new(0.0, render.bottom(), cw, ch - render.height - render.y),
        );
    }

    if render.x >= 1.0 {
        bars.push(BarEdge::Left, RectF::new(0.0, 0.0, render.x, ch));
        bars.push(
            BarEdge::Right,
            RectF::new(render.right(), 0.0, cw - render.width - render.x, ch),
        );
    }

    bars
}
