//! SVG visualization of computed layouts.
//!
//! Draws a single annotated panel: the canvas, any letterbox bars, and the
//! rendered image (clipped to the canvas), or the rotated source outline
//! for rotations. Handy for eyeballing layouts in docs and bug reports.
//!
//! # Example
//!
//! ```
//! use raster_layout::{Resize, ResizeMode, Size, svg::render_resize_svg};
//!
//! let layout = Resize::new(ResizeMode::ExtendConstrained, 400.0, 400.0)
//!     .compute(Size::new(800.0, 600.0))
//!     .unwrap();
//!
//! let svg = render_resize_svg(&layout);
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("400×400"));
//! ```

use crate::geometry::{RectF, Size};
use crate::resize::RenderLayout;
use crate::rotate::RotationLayout;

/// Maximum pixel width of the panel.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height of the panel.
const MAX_PANEL_H: f64 = 200.0;
/// Margin around the panel.
const MARGIN: f64 = 40.0;
/// Height of the label text area above the panel.
const LABEL_H: f64 = 22.0;
/// Height of the annotation area below the panel.
const ANNOTATION_H: f64 = 20.0;

const STYLE: &str = r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .canvas { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .bar { fill: #444; }
  .image { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .overflow { fill: none; stroke: #2c6faa; stroke-width: 1; stroke-dasharray: 4,2; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .canvas { fill: #2d2d2d; stroke: #555; }
    .bar { fill: #111; }
    .image { fill: #3a72a4; stroke: #5a9fd4; }
    .overflow { stroke: #5a9fd4; }
  }
</style>
"##;

/// Panel placement: origin of the canvas box and the drawing scale.
struct Panel {
    x: f64,
    y: f64,
    scale: f64,
}

impl Panel {
    fn rect(&self, r: &RectF) -> (f64, f64, f64, f64) {
        (
            self.x + r.x * self.scale,
            self.y + r.y * self.scale,
            r.width * self.scale,
            r.height * self.scale,
        )
    }
}

/// Render a resize layout: canvas, bars and the (clipped) render rect.
pub fn render_resize_svg(layout: &RenderLayout) -> String {
    let (cw, ch) = layout.canvas_pixels();
    let label = format!("Canvas  {cw}×{ch}");
    let r = layout.render;
    let annotation = format!(
        "render {:.1}×{:.1} at ({:.1}, {:.1})",
        r.width, r.height, r.x, r.y
    );

    let (mut svg, panel) = open_document(layout.canvas, &label, &annotation);
    let canvas_rect = RectF::from_size(layout.canvas);

    for bar in layout.bars() {
        push_rect(&mut svg, &panel, &bar.rect, "bar");
    }
    if let Some(visible) = r.intersect(&canvas_rect) {
        push_rect(&mut svg, &panel, &visible, "image");
    }
    if layout.is_cropped() {
        push_rect(&mut svg, &panel, &r, "overflow");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render a rotation layout: canvas and the rotated source outline.
pub fn render_rotation_svg(layout: &RotationLayout) -> String {
    let (cw, ch) = layout.canvas.to_pixels();
    let label = format!("Rotate {}°  {cw}×{ch}", layout.angle);
    let annotation = if layout.clipped {
        format!("zoom {:.3}, corners exposed", layout.zoom)
    } else {
        format!("zoom {:.3}", layout.zoom)
    };

    let (mut svg, panel) = open_document(layout.canvas, &label, &annotation);

    let points: Vec<String> = layout
        .corners()
        .iter()
        .map(|p| {
            format!(
                "{:.1},{:.1}",
                panel.x + p.x * panel.scale,
                panel.y + p.y * panel.scale
            )
        })
        .collect();
    svg.push_str(&format!(
        r#"<polygon points="{}" class="image"/>"#,
        points.join(" ")
    ));
    svg.push('\n');

    svg.push_str("</svg>\n");
    svg
}

/// Scale a size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    if size.width <= 0.0 || size.height <= 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / size.width).min(MAX_PANEL_H / size.height);
    (size.width * scale, size.height * scale, scale)
}

/// Write the header, style, label, canvas box and annotation; return the
/// unterminated document and the panel placement.
fn open_document(canvas: Size, label: &str, annotation: &str) -> (String, Panel) {
    let total_w = MAX_PANEL_W + 2.0 * MARGIN;
    let total_h = MARGIN + LABEL_H + MAX_PANEL_H + ANNOTATION_H + MARGIN;
    let center_x = total_w / 2.0;

    let mut svg = String::with_capacity(2048);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');
    svg.push_str(STYLE);

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        center_x,
        MARGIN + 14.0,
        escape_xml(label)
    ));
    svg.push('\n');

    let (sw, sh, scale) = scale_to_fit(canvas);
    let panel = Panel {
        x: center_x - sw / 2.0,
        y: MARGIN + LABEL_H,
        scale,
    };
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="canvas"/>"#,
        panel.x, panel.y, sw, sh
    ));
    svg.push('\n');

    if !annotation.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
            center_x,
            panel.y + MAX_PANEL_H + 14.0,
            escape_xml(annotation)
        ));
        svg.push('\n');
    }

    (svg, panel)
}

fn push_rect(svg: &mut String, panel: &Panel, r: &RectF, class: &str) {
    let (x, y, w, h) = panel.rect(r);
    svg.push_str(&format!(
        r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}"/>"#
    ));
    svg.push('\n');
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
