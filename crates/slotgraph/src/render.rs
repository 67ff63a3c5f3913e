//! Diagram rendering through an abstract drawing surface.
//!
//! [`Renderer`] turns a [`PositionedDiagram`] into drawing calls on a
//! [`Surface`]. It owns all diagram geometry (node sizes, slot rows, link
//! curves and the viewport) while the surface only knows how to draw
//! primitives. The SVG backend lives in [`crate::export::svg`].
//!
//! # Drawing order
//!
//! 1. [`Surface::clear`]
//! 2. [`Surface::set_viewport`]
//! 3. [`Surface::define_arrowhead`] once per link color, in first-use order
//! 4. entity boxes with their header and slot rows, in diagram order
//! 5. link curves, in diagram then slot then target order

use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use slotgraph_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
    model::{PositionedDiagram, PositionedEntity},
};

/// Fill and stroke of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeStyle {
    pub fill: Color,
    pub stroke: Color,
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// Appearance of a text label. Labels are vertically centered on their
/// anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub color: Color,
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub anchor: TextAnchor,
}

/// A quadratic Bézier curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadraticCurve {
    /// Returns the curve as SVG path data, e.g. `M 0 0 Q 5 -5 10 0`.
    pub fn to_path_data(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x(),
            self.start.y(),
            self.control.x(),
            self.control.y(),
            self.end.x(),
            self.end.y()
        )
    }
}

/// A drawing backend.
///
/// Implementations accumulate primitives until [`Surface::clear`] is called.
pub trait Surface {
    /// Drops all content, markers and the viewport.
    fn clear(&mut self);

    /// Sets the visible area in diagram coordinates.
    fn set_viewport(&mut self, viewport: Bounds);

    /// Registers an arrowhead marker that later curves can reference by `id`.
    fn define_arrowhead(&mut self, id: &str, color: Color);

    fn rect(&mut self, bounds: Bounds, style: &ShapeStyle);

    fn label(&mut self, anchor: Point, text: &str, style: &LabelStyle);

    /// Draws `curve` in `color`, ending in the arrowhead registered as
    /// `arrowhead`, if any.
    fn curve(&mut self, curve: &QuadraticCurve, color: Color, arrowhead: Option<&str>);
}

/// Returns the marker id of the `index`-th link color in first-use order.
///
/// The index keeps ids unique even when two colors sanitize to the same
/// string; the color suffix only aids reading the SVG.
pub fn arrowhead_id(index: usize, color: Color) -> String {
    format!("arrow-{index}-{}", color.to_id_safe_string())
}

fn builtin_color(css: &str) -> Color {
    Color::new(css).expect("built-in palette colors are valid CSS colors")
}

/// Geometry constants and palette for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSettings {
    node_width: f32,
    header_height: f32,
    slot_height: f32,
    slot_inset: f32,
    padding: f32,
    arc_lift: f32,
    link_start_offset: f32,
    target_anchor_offset: f32,
    font_family: String,
    font_size: f32,
    node_style: ShapeStyle,
    slot_style: ShapeStyle,
    reference_slot_style: ShapeStyle,
    text_color: Color,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            header_height: 28.0,
            slot_height: 22.0,
            slot_inset: 8.0,
            padding: 40.0,
            arc_lift: 40.0,
            link_start_offset: 4.0,
            target_anchor_offset: 6.0,
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            node_style: ShapeStyle {
                fill: builtin_color("#ffffff"),
                stroke: builtin_color("#444444"),
            },
            slot_style: ShapeStyle {
                fill: builtin_color("#f2f2f2"),
                stroke: builtin_color("#cccccc"),
            },
            reference_slot_style: ShapeStyle {
                fill: builtin_color("#fff1d6"),
                stroke: builtin_color("#d9a441"),
            },
            text_color: builtin_color("#222222"),
        }
    }
}

impl StyleSettings {
    pub fn with_node_width(mut self, node_width: f32) -> Self {
        self.node_width = node_width;
        self
    }

    pub fn with_header_height(mut self, header_height: f32) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_slot_height(mut self, slot_height: f32) -> Self {
        self.slot_height = slot_height;
        self
    }

    pub fn with_slot_inset(mut self, slot_inset: f32) -> Self {
        self.slot_inset = slot_inset;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_arc_lift(mut self, arc_lift: f32) -> Self {
        self.arc_lift = arc_lift;
        self
    }

    pub fn with_link_start_offset(mut self, link_start_offset: f32) -> Self {
        self.link_start_offset = link_start_offset;
        self
    }

    pub fn with_target_anchor_offset(mut self, target_anchor_offset: f32) -> Self {
        self.target_anchor_offset = target_anchor_offset;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn slot_height(&self) -> f32 {
        self.slot_height
    }

    pub fn slot_inset(&self) -> f32 {
        self.slot_inset
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Checks that the style can produce a drawable viewport.
    ///
    /// Box dimensions and the font size must be positive. Padding and the
    /// slot inset may be zero but never negative.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("node_width", self.node_width),
            ("header_height", self.header_height),
            ("slot_height", self.slot_height),
            ("font_size", self.font_size),
        ];
        let spacings = [
            ("padding", self.padding),
            ("slot_inset", self.slot_inset),
        ];
        let offsets = [
            ("arc_lift", self.arc_lift),
            ("link_start_offset", self.link_start_offset),
            ("target_anchor_offset", self.target_anchor_offset),
        ];

        for (name, value) in sizes.iter().chain(&spacings).chain(&offsets) {
            if !value.is_finite() {
                return Err(format!("`{name}` must be a finite number, got {value}"));
            }
        }
        for (name, value) in sizes {
            if value <= 0.0 {
                return Err(format!("`{name}` must be positive, got {value}"));
            }
        }
        for (name, value) in spacings {
            if value < 0.0 {
                return Err(format!("`{name}` must not be negative, got {value}"));
            }
        }
        Ok(())
    }

    fn label_style(&self, bold: bool, anchor: TextAnchor) -> LabelStyle {
        LabelStyle {
            color: self.text_color,
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            bold,
            anchor,
        }
    }
}

/// Link colors keyed by slot (component) name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    colors: IndexMap<String, Color>,
    default_color: Color,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new(builtin_color("#888888"))
    }
}

impl ColorTable {
    /// Creates an empty table that colors every link `default_color`.
    pub fn new(default_color: Color) -> Self {
        Self {
            colors: IndexMap::new(),
            default_color,
        }
    }

    pub fn insert(&mut self, slot: impl Into<String>, color: Color) {
        self.colors.insert(slot.into(), color);
    }

    /// Returns the link color for `slot`, or the default color.
    pub fn color_for(&self, slot: &str) -> Color {
        self.colors.get(slot).copied().unwrap_or(self.default_color)
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }
}

/// One drawable link between two positioned entities.
#[derive(Debug, Clone, PartialEq)]
struct Link {
    curve: QuadraticCurve,
    color: Color,
}

/// Draws positioned diagrams onto a [`Surface`].
#[derive(Debug)]
pub struct Renderer<'a> {
    style: &'a StyleSettings,
    colors: &'a ColorTable,
}

impl<'a> Renderer<'a> {
    pub fn new(style: &'a StyleSettings, colors: &'a ColorTable) -> Self {
        Self { style, colors }
    }

    /// Returns the box size of an entity with `slots_count` slots.
    pub fn node_size(&self, slots_count: usize) -> Size {
        Size::new(
            self.style.node_width,
            self.style.header_height
                + slots_count as f32 * self.style.slot_height
                + self.style.slot_inset,
        )
    }

    /// Returns the box of `entity`, anchored at its position.
    pub fn node_bounds(&self, entity: &PositionedEntity) -> Bounds {
        Bounds::new_from_top_left(
            Point::new(entity.x(), entity.y()),
            self.node_size(entity.slots().len()),
        )
    }

    /// Returns the union of all entity boxes expanded by the padding.
    ///
    /// An empty diagram yields a padding-sized box around the origin.
    pub fn viewport(&self, diagram: &PositionedDiagram) -> Bounds {
        diagram
            .entities()
            .iter()
            .map(|entity| self.node_bounds(entity))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
            .add_padding(Insets::uniform(self.style.padding))
    }

    /// Returns the vertical center of slot row `index` of `entity`.
    fn slot_center_y(&self, entity: &PositionedEntity, index: usize) -> f32 {
        entity.y()
            + self.style.header_height
            + index as f32 * self.style.slot_height
            + self.style.slot_height / 2.0
    }

    /// Returns the curve from slot `slot_index` of `from` to the top of `to`.
    ///
    /// The control point sits `arc_lift` above the chord midpoint, so every
    /// link bows upward regardless of where the target lies.
    pub fn link_curve(
        &self,
        from: &PositionedEntity,
        slot_index: usize,
        to: &PositionedEntity,
    ) -> QuadraticCurve {
        let start = Point::new(
            from.x() + self.style.node_width - self.style.slot_inset,
            self.slot_center_y(from, slot_index) + self.style.link_start_offset,
        );
        let end = Point::new(
            to.x() + self.style.node_width / 2.0,
            to.y() - self.style.target_anchor_offset,
        );
        let mid = start.midpoint(end);
        let control = mid.with_y(mid.y() - self.style.arc_lift);

        QuadraticCurve {
            start,
            control,
            end,
        }
    }

    fn links(&self, diagram: &PositionedDiagram) -> Vec<Link> {
        let mut links = Vec::new();
        for entity in diagram.entities() {
            for (index, slot) in entity.slots().iter().enumerate() {
                for target in slot.links_to() {
                    let Some(target) = diagram.entity(target) else {
                        continue;
                    };
                    links.push(Link {
                        curve: self.link_curve(entity, index, target),
                        color: self.colors.color_for(slot.component_name()),
                    });
                }
            }
        }
        links
    }

    fn draw_entity<S: Surface>(&self, entity: &PositionedEntity, surface: &mut S) {
        let bounds = self.node_bounds(entity);
        surface.rect(bounds, &self.style.node_style);
        surface.label(
            Point::new(
                entity.x() + self.style.node_width / 2.0,
                entity.y() + self.style.header_height / 2.0,
            ),
            entity.name(),
            &self.style.label_style(true, TextAnchor::Middle),
        );

        let slot_label_style = self.style.label_style(false, TextAnchor::Start);
        for (index, slot) in entity.slots().iter().enumerate() {
            let slot_bounds = Bounds::new_from_top_left(
                Point::new(
                    entity.x() + self.style.slot_inset,
                    entity.y() + self.style.header_height + index as f32 * self.style.slot_height,
                ),
                Size::new(
                    self.style.node_width - 2.0 * self.style.slot_inset,
                    self.style.slot_height,
                ),
            );
            let slot_style = if slot.references_entity() {
                &self.style.reference_slot_style
            } else {
                &self.style.slot_style
            };
            surface.rect(slot_bounds, slot_style);
            surface.label(
                Point::new(
                    slot_bounds.min_x() + self.style.slot_inset,
                    self.slot_center_y(entity, index),
                ),
                slot.component_name(),
                &slot_label_style,
            );
        }
    }

    /// Renders `diagram` onto `surface`, replacing whatever it held.
    pub fn render<S: Surface>(&self, diagram: &PositionedDiagram, surface: &mut S) {
        info!(entities_count = diagram.entities().len(); "Rendering diagram");

        surface.clear();

        let viewport = self.viewport(diagram);
        surface.set_viewport(viewport);

        let links = self.links(diagram);
        let marker_colors: IndexSet<Color> = links.iter().map(|link| link.color).collect();
        let marker_ids: IndexMap<Color, String> = marker_colors
            .iter()
            .enumerate()
            .map(|(index, color)| (*color, arrowhead_id(index, *color)))
            .collect();
        for (color, id) in &marker_ids {
            surface.define_arrowhead(id, *color);
        }

        for entity in diagram.entities() {
            self.draw_entity(entity, surface);
        }

        for link in &links {
            let marker = marker_ids.get(&link.color).map(String::as_str);
            surface.curve(&link.curve, link.color, marker);
        }

        debug!(
            links_count = links.len(),
            markers_count = marker_ids.len(),
            viewport_width = viewport.width(),
            viewport_height = viewport.height();
            "Diagram rendered"
        );
    }
}
