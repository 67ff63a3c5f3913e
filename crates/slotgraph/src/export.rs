//! Export functionality for slotgraph diagrams.
//!
//! This module turns the output of the pipeline into a finished artifact. It
//! is the final stage in the slotgraph processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Component + Entity Sources
//!     ↓ extract
//! Registries
//!     ↓ build_graph
//! Graph ─────────────────────────┐
//!     ↓ layout                   │
//! PositionedDiagram              │
//!     ↓ render + export (this module)
//! SVG / HTML                Graph JSON
//! ```
//!
//! # Formats
//!
//! - [`Format::Svg`]: a standalone SVG document drawn by [`svg::SvgSurface`],
//!   with the positioned diagram embedded as JSON metadata.
//! - [`Format::Html`]: the same SVG inside an HTML page, plus the data as a
//!   JSON script island.
//! - [`Format::GraphJson`]: the reference graph alone, for tools that do
//!   their own layout.
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering and serialization
//! failures. [`Error`] converts into [`SlotgraphError::Export`] at the crate
//! boundary.
//!
//! [`SlotgraphError::Export`]: crate::SlotgraphError::Export

/// SVG export backend.
pub mod svg;

mod html;

use std::{fmt, str::FromStr};

use log::{debug, info};

use slotgraph_core::{color::Color, model::PositionedDiagram};

use crate::{
    Pipeline,
    render::{ColorTable, Renderer, StyleSettings},
};

/// Output artifact format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Svg,
    Html,
    GraphJson,
}

impl Format {
    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::GraphJson => "json",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "html" => Ok(Self::Html),
            "graph-json" => Ok(Self::GraphJson),
            other => Err(format!(
                "unknown format `{other}`, expected one of `svg`, `html`, `graph-json`"
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::GraphJson => "graph-json",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`SlotgraphError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`SlotgraphError::Export`]: crate::SlotgraphError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// The diagram data could not be serialized to JSON.
    Serialize(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Renders pipeline output into a [`Format`].
#[derive(Debug)]
pub struct Exporter<'a> {
    style: &'a StyleSettings,
    colors: &'a ColorTable,
    background: Option<Color>,
}

impl<'a> Exporter<'a> {
    pub fn new(style: &'a StyleSettings, colors: &'a ColorTable) -> Self {
        Self {
            style,
            colors,
            background: None,
        }
    }

    /// Fills the viewport with `background` behind the diagram.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Produces the artifact for `pipeline` in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram geometry cannot be drawn and
    /// [`Error::Serialize`] if the embedded data cannot be encoded.
    pub fn export(&self, pipeline: &Pipeline, format: Format) -> Result<String, Error> {
        info!(format:% = format; "Exporting diagram");
        let artifact = match format {
            Format::Svg => self.render_svg(pipeline.diagram())?,
            Format::Html => {
                let svg = self.render_svg(pipeline.diagram())?;
                let data = serde_json::to_string(pipeline.diagram())?;
                html::page(&svg, &data)
            }
            Format::GraphJson => serde_json::to_string_pretty(pipeline.graph())?,
        };
        debug!(artifact_len = artifact.len(); "Diagram exported");
        Ok(artifact)
    }

    /// Renders `diagram` into a standalone SVG document string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] for a non-finite viewport and
    /// [`Error::Serialize`] if the metadata cannot be encoded.
    pub fn render_svg(&self, diagram: &PositionedDiagram) -> Result<String, Error> {
        let mut surface = svg::SvgSurface::new();
        Renderer::new(self.style, self.colors).render(diagram, &mut surface);

        let viewport = surface.viewport();
        if !(viewport.width().is_finite() && viewport.height().is_finite()) {
            return Err(Error::Render(format!(
                "viewport is not finite: {} x {}",
                viewport.width(),
                viewport.height()
            )));
        }

        let data = serde_json::to_string(diagram)?;
        Ok(surface.document(self.background, Some(&data)).to_string())
    }
}
