//! SVG drawing surface.
//!
//! [`SvgSurface`] implements [`Surface`] on top of the `svg` crate. Drawing
//! calls accumulate into a body group and a marker definitions block;
//! [`SvgSurface::document`] assembles them into a standalone document.

use std::mem;

use svg::{
    Document, Node as _,
    node::{self, element as svg_element},
};

use slotgraph_core::{
    color::Color,
    geometry::{Bounds, Point},
};

use crate::render::{LabelStyle, QuadraticCurve, ShapeStyle, Surface, TextAnchor};

/// Id of the `<metadata>` element carrying the diagram data.
pub const METADATA_ID: &str = "slotgraph-data";

/// A [`Surface`] that builds an SVG document.
pub struct SvgSurface {
    viewport: Bounds,
    markers: Vec<svg_element::Marker>,
    body: svg_element::Group,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            viewport: Bounds::default(),
            markers: Vec::new(),
            body: svg_element::Group::new(),
        }
    }
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    fn push(&mut self, element: impl Into<Box<dyn svg::Node>>) {
        let body = mem::replace(&mut self.body, svg_element::Group::new());
        self.body = body.add(element);
    }

    fn arrowhead_marker(id: &str, color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string()),
            )
    }

    /// Assembles the drawn content into a document.
    ///
    /// The document's `viewBox`, `width` and `height` come from the viewport.
    /// `metadata` is embedded verbatim as the text of
    /// `<metadata id="slotgraph-data">`.
    pub fn document(&self, background: Option<Color>, metadata: Option<&str>) -> Document {
        let viewport = self.viewport;
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    viewport.min_x(),
                    viewport.min_y(),
                    viewport.width(),
                    viewport.height()
                ),
            )
            .set("width", viewport.width())
            .set("height", viewport.height());

        if let Some(data) = metadata {
            let mut element = svg_element::Element::new("metadata");
            element.assign("id", METADATA_ID);
            element.append(node::Text::new(data));
            doc = doc.add(element);
        }

        if let Some(color) = background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", viewport.min_x())
                    .set("y", viewport.min_y())
                    .set("width", viewport.width())
                    .set("height", viewport.height())
                    .set("fill", color),
            );
        }

        if !self.markers.is_empty() {
            let defs = self
                .markers
                .iter()
                .cloned()
                .fold(svg_element::Definitions::new(), |defs, marker| {
                    defs.add(marker)
                });
            doc = doc.add(defs);
        }

        doc.add(self.body.clone())
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_viewport(&mut self, viewport: Bounds) {
        self.viewport = viewport;
    }

    fn define_arrowhead(&mut self, id: &str, color: Color) {
        self.markers.push(Self::arrowhead_marker(id, color));
    }

    fn rect(&mut self, bounds: Bounds, style: &ShapeStyle) {
        self.push(
            svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", 3)
                .set("fill", style.fill)
                .set("stroke", style.stroke),
        );
    }

    fn label(&mut self, anchor: Point, text: &str, style: &LabelStyle) {
        let text_anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let mut label = svg_element::Text::new(text)
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("text-anchor", text_anchor)
            .set("dominant-baseline", "central")
            .set("font-family", style.font_family.as_str())
            .set("font-size", style.font_size)
            .set("fill", style.color);
        if style.bold {
            label = label.set("font-weight", "bold");
        }
        self.push(label);
    }

    fn curve(&mut self, curve: &QuadraticCurve, color: Color, arrowhead: Option<&str>) {
        let mut path = svg_element::Path::new()
            .set("d", curve.to_path_data())
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 1.5);
        if let Some(id) = arrowhead {
            path = path.set("marker-end", format!("url(#{id})"));
        }
        self.push(path);
    }
}
