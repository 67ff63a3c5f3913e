//! slotgraph - Derive entity reference diagrams from entity-component sources.
//!
//! Component declarations and entity classes are extracted from raw source
//! text, joined into a reference graph, laid out on a level grid and rendered
//! as a standalone SVG diagram.

pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod links;
pub mod render;

mod error;

pub use slotgraph_core::{color, geometry, model};
pub use slotgraph_parser::error::{Diagnostic, ExtractError};

pub use error::SlotgraphError;
pub use export::Format;

use log::{debug, info, trace};

use slotgraph_core::model::{ComponentRegistry, EntityRegistry, Graph, PositionedDiagram};
use slotgraph_parser::Extraction;

use config::AppConfig;
use export::Exporter;
use layout::LayoutEngine;
use links::LinkResolver;

/// Everything the pipeline derived from one pair of sources.
///
/// Warnings are kept per source so callers can attribute their spans.
#[derive(Debug, Clone)]
pub struct Pipeline {
    components: ComponentRegistry,
    entities: EntityRegistry,
    graph: Graph,
    diagram: PositionedDiagram,
    component_diagnostics: Vec<Diagnostic>,
    entity_diagnostics: Vec<Diagnostic>,
}

impl Pipeline {
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Returns the reference graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the laid-out diagram with resolved links.
    pub fn diagram(&self) -> &PositionedDiagram {
        &self.diagram
    }

    /// Warnings emitted while extracting the component source.
    pub fn component_diagnostics(&self) -> &[Diagnostic] {
        &self.component_diagnostics
    }

    /// Warnings emitted while extracting the entity source.
    pub fn entity_diagnostics(&self) -> &[Diagnostic] {
        &self.entity_diagnostics
    }
}

/// Builder for deriving and rendering slotgraph diagrams.
///
/// This provides an API for processing a component source and an entity
/// source through extraction, graph, layout, and rendering stages.
///
/// # Examples
///
/// ```rust
/// use slotgraph::{DiagramBuilder, Format, config::AppConfig};
///
/// let components = "export const Author = defineComponent(EntityId);";
/// let entities = "class Message { author() { return c.Author; } }";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Extract, build the graph and lay it out
/// let pipeline = builder.build(components, entities)
///     .expect("Failed to build");
///
/// // Render to SVG
/// let svg = builder.export(&pipeline, Format::Svg)
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    strict: bool,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including extraction, layout,
    ///   link and style settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Treat extraction warnings as errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn finish_extraction<T>(
        &self,
        extraction: Extraction<T>,
        source: &str,
    ) -> Result<(T, Vec<Diagnostic>), SlotgraphError> {
        if self.strict {
            let value = extraction
                .into_strict()
                .map_err(|err| SlotgraphError::new_extract_error(err, source))?;
            Ok((value, Vec::new()))
        } else {
            Ok(extraction.into_parts())
        }
    }

    /// Run extraction, graph assembly and layout.
    ///
    /// # Arguments
    ///
    /// * `components_source` - Source text holding component declarations
    /// * `entities_source` - Source text holding entity classes
    ///
    /// # Errors
    ///
    /// Returns `SlotgraphError::Extract` in strict mode when either source
    /// produced a warning, and `SlotgraphError::Layout` for unusable layout
    /// settings.
    pub fn build(
        &self,
        components_source: &str,
        entities_source: &str,
    ) -> Result<Pipeline, SlotgraphError> {
        info!(strict = self.strict; "Building diagram");

        let extract_config = self.config.extract().extract_config();
        let (components, component_diagnostics) = self.finish_extraction(
            slotgraph_parser::extract_components(components_source, &extract_config),
            components_source,
        )?;
        let (entities, entity_diagnostics) = self.finish_extraction(
            slotgraph_parser::extract_entities(
                entities_source,
                &extract_config,
                Some(&components),
            ),
            entities_source,
        )?;
        debug!(
            component_warnings = component_diagnostics.len(),
            entity_warnings = entity_diagnostics.len();
            "Sources extracted"
        );

        let graph = graph::build_graph(&components, &entities);

        let settings = self.config.layout().settings();
        settings.validate().map_err(SlotgraphError::Layout)?;
        let levels = self.config.layout().levels();
        levels.validate().map_err(SlotgraphError::Layout)?;
        let resolver = LinkResolver::new(self.config.links(), &graph);
        let diagram = LayoutEngine::new(levels, settings)
            .layout(&graph, &resolver);
        debug!("Pipeline built successfully");
        trace!(diagram:?; "Positioned diagram");

        Ok(Pipeline {
            components,
            entities,
            graph,
            diagram,
            component_diagnostics,
            entity_diagnostics,
        })
    }

    /// Export a built pipeline into `format`.
    ///
    /// # Errors
    ///
    /// Returns `SlotgraphError::Config` for invalid style colors or
    /// dimensions and `SlotgraphError::Export` if rendering or serialization
    /// fails.
    pub fn export(&self, pipeline: &Pipeline, format: Format) -> Result<String, SlotgraphError> {
        let style_config = self.config.style();
        let style = style_config.settings();
        style.validate().map_err(SlotgraphError::Config)?;
        let colors = style_config.color_table().map_err(SlotgraphError::Config)?;
        let background = style_config
            .background_color()
            .map_err(SlotgraphError::Config)?;

        let artifact = Exporter::new(&style, &colors)
            .with_background(background)
            .export(pipeline, format)?;

        info!(format:% = format; "Diagram exported successfully");
        Ok(artifact)
    }

    /// Build and export to SVG in one step.
    ///
    /// # Errors
    ///
    /// Returns any error of [`DiagramBuilder::build`] or
    /// [`DiagramBuilder::export`].
    pub fn render_svg(
        &self,
        components_source: &str,
        entities_source: &str,
    ) -> Result<String, SlotgraphError> {
        let pipeline = self.build(components_source, entities_source)?;
        self.export(&pipeline, Format::Svg)
    }
}
