//! Configuration types for slotgraph diagram generation.
//!
//! This module provides configuration structures that control extraction,
//! layout, link resolution and styling. All types implement
//! [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`ExtractSection`] - Slot prefix, slot scope and declaration signatures.
//! - [`LayoutConfig`] - Grid spacing and the entity level table.
//! - [`StyleConfig`] - Node geometry, fonts, background and link colors.
//!
//! The `[links]` section is a [`TargetTable`] deserialized directly.
//!
//! # Example
//!
//! ```
//! # use slotgraph::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(config.style().color_table().is_ok());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use slotgraph_core::color::Color;
use slotgraph_parser::{ExtractConfig, Signatures, SlotScope};

use crate::{
    layout::{LayoutSettings, LevelTable},
    links::TargetTable,
    render::{ColorTable, StyleSettings},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extract: ExtractSection,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Component name to target entity names.
    #[serde(default)]
    links: TargetTable,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        extract: ExtractSection,
        layout: LayoutConfig,
        links: TargetTable,
        style: StyleConfig,
    ) -> Self {
        Self {
            extract,
            layout,
            links,
            style,
        }
    }

    /// Returns the extraction configuration.
    pub fn extract(&self) -> &ExtractSection {
        &self.extract
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the link target table.
    pub fn links(&self) -> &TargetTable {
        &self.links
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Slot scope as written in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeSetting {
    #[default]
    All,
    Registered,
}

impl From<ScopeSetting> for SlotScope {
    fn from(setting: ScopeSetting) -> Self {
        match setting {
            ScopeSetting::All => Self::All,
            ScopeSetting::Registered => Self::Registered,
        }
    }
}

/// Signature overrides. Unset keys keep the built-in signature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignaturesConfig {
    #[serde(default)]
    marker: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    map: Option<String>,
    #[serde(default)]
    list: Option<String>,
    #[serde(default)]
    movable_list: Option<String>,
    #[serde(default)]
    entity_ref: Option<String>,
}

impl SignaturesConfig {
    /// Returns the built-in [`Signatures`] with the configured overrides.
    pub fn signatures(&self) -> Signatures {
        let defaults = Signatures::default();
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
        Signatures {
            marker: pick(&self.marker, defaults.marker),
            text: pick(&self.text, defaults.text),
            map: pick(&self.map, defaults.map),
            list: pick(&self.list, defaults.list),
            movable_list: pick(&self.movable_list, defaults.movable_list),
            entity_ref: pick(&self.entity_ref, defaults.entity_ref),
        }
    }
}

/// The `[extract]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractSection {
    /// Slot-access prefix; `c.` when unset.
    #[serde(default)]
    slot_prefix: Option<String>,

    #[serde(default)]
    slot_scope: ScopeSetting,

    #[serde(default)]
    signatures: SignaturesConfig,
}

impl ExtractSection {
    /// Returns the parser configuration described by this section.
    pub fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default()
            .with_signatures(self.signatures.signatures())
            .with_slot_scope(self.slot_scope.into());
        if let Some(prefix) = &self.slot_prefix {
            config = config.with_slot_prefix(prefix.as_str());
        }
        config
    }
}

/// The `[layout]` section.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    left_margin: Option<f32>,
    #[serde(default)]
    top_margin: Option<f32>,
    #[serde(default)]
    column_spacing: Option<f32>,
    #[serde(default)]
    row_height: Option<f32>,

    /// Entity name to layout level.
    #[serde(default)]
    levels: LevelTable,
}

impl LayoutConfig {
    /// Returns the grid settings, with defaults for unset keys.
    pub fn settings(&self) -> LayoutSettings {
        let mut settings = LayoutSettings::default();
        if let Some(value) = self.left_margin {
            settings = settings.with_left_margin(value);
        }
        if let Some(value) = self.top_margin {
            settings = settings.with_top_margin(value);
        }
        if let Some(value) = self.column_spacing {
            settings = settings.with_column_spacing(value);
        }
        if let Some(value) = self.row_height {
            settings = settings.with_row_height(value);
        }
        settings
    }

    /// Returns the entity level table.
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }
}

/// The `[style]` section.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    node_width: Option<f32>,
    #[serde(default)]
    header_height: Option<f32>,
    #[serde(default)]
    slot_height: Option<f32>,
    #[serde(default)]
    slot_inset: Option<f32>,
    #[serde(default)]
    padding: Option<f32>,
    #[serde(default)]
    arc_lift: Option<f32>,
    #[serde(default)]
    link_start_offset: Option<f32>,
    #[serde(default)]
    target_anchor_offset: Option<f32>,
    #[serde(default)]
    font_family: Option<String>,

    /// Diagram background [`Color`], as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Link color for slots missing from `colors`, as a color string.
    #[serde(default)]
    default_link_color: Option<String>,

    /// Slot name to link color string.
    #[serde(default)]
    colors: IndexMap<String, String>,
}

impl StyleConfig {
    /// Returns the render settings, with defaults for unset keys.
    pub fn settings(&self) -> StyleSettings {
        let mut settings = StyleSettings::default();
        let overrides: [(Option<f32>, fn(StyleSettings, f32) -> StyleSettings); 8] = [
            (self.node_width, StyleSettings::with_node_width),
            (self.header_height, StyleSettings::with_header_height),
            (self.slot_height, StyleSettings::with_slot_height),
            (self.slot_inset, StyleSettings::with_slot_inset),
            (self.padding, StyleSettings::with_padding),
            (self.arc_lift, StyleSettings::with_arc_lift),
            (self.link_start_offset, StyleSettings::with_link_start_offset),
            (
                self.target_anchor_offset,
                StyleSettings::with_target_anchor_offset,
            ),
        ];
        for (value, apply) in overrides {
            if let Some(value) = value {
                settings = apply(settings, value);
            }
        }
        if let Some(font_family) = &self.font_family {
            settings = settings.with_font_family(font_family.as_str());
        }
        settings
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the link [`ColorTable`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first color string that cannot be parsed.
    pub fn color_table(&self) -> Result<ColorTable, String> {
        let mut table = match &self.default_link_color {
            Some(color) => ColorTable::new(
                Color::new(color)
                    .map_err(|err| format!("Invalid default link color in config: {err}"))?,
            ),
            None => ColorTable::default(),
        };
        for (slot, color) in &self.colors {
            let color = Color::new(color)
                .map_err(|err| format!("Invalid link color for `{slot}` in config: {err}"))?;
            table.insert(slot.as_str(), color);
        }
        Ok(table)
    }
}
