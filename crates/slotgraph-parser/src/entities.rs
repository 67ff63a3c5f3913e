//! Entity registry extraction.
//!
//! An entity is a class whose body reads component slots through the slot
//! prefix:
//!
//! ```text
//! class Message extends Entity {
//!     body() { return this.get(c.Body); }
//!     replyTo() { return this.get(c.ReplyTo); }
//! }
//! ```

use std::collections::HashMap;

use log::{debug, info, trace};
use winnow::{ModalResult, Parser as _, ascii::multispace1, token::take_till};

use slotgraph_core::model::{ComponentRegistry, EntityRegistry, EntityType};

use crate::{
    ExtractConfig, Extraction, SlotScope,
    error::{Diagnostic, DiagnosticCollector, WarningCode},
    scan::{identifier, keyword, matching_brace, offset_of, starts_word},
    span::Span,
};

const CLASS: &str = "class";

/// Parse `class NAME ... {` and return `NAME`.
///
/// The heritage clause between the name and the brace is skipped; a `;`
/// before the brace means the match was not a class definition.
fn class_head<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        keyword(CLASS),
        multispace1,
        identifier,
        take_till(0.., ['{', ';']),
        '{',
    )
        .map(|(_, _, name, ..)| name)
        .parse_next(input)
}

/// Collect slot-access names in `source[body]`, in first-seen order.
fn slot_accesses<'a>(source: &'a str, body: Span, prefix: &str) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    if prefix.is_empty() {
        return names;
    }

    let mut cursor = body.start();
    while let Some(found) = source[cursor..body.end()].find(prefix) {
        let start = cursor + found;
        let name_start = start + prefix.len();
        cursor = name_start;

        if !starts_word(source, start) {
            continue;
        }

        let mut input = &source[name_start..body.end()];
        if let Ok(name) = identifier.parse_next(&mut input) {
            cursor = name_start + name.len();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}

/// Extract every entity class in `source`.
///
/// With [`SlotScope::Registered`], only accesses to names present in
/// `components` are kept; without a registry nothing is registered, so every
/// access is dropped. [`SlotScope::All`] ignores `components`.
///
/// A class whose braces never balance is skipped with
/// [`WarningCode::W101`]. A repeated class name replaces the earlier entity
/// and emits [`WarningCode::W102`].
///
/// # Examples
///
/// ```
/// use slotgraph_parser::{ExtractConfig, extract_entities};
///
/// let source = "class Message { f() { return [c.Body, c.ReplyTo, c.Body]; } }";
/// let extraction = extract_entities(source, &ExtractConfig::default(), None);
///
/// let message = extraction.value().get("Message").unwrap();
/// assert_eq!(message.component_names(), ["Body", "ReplyTo"]);
/// ```
pub fn extract_entities(
    source: &str,
    config: &ExtractConfig,
    components: Option<&ComponentRegistry>,
) -> Extraction<EntityRegistry> {
    info!(
        source_len = source.len(),
        slot_scope:? = config.slot_scope();
        "Extracting entity classes"
    );

    let mut registry = EntityRegistry::new();
    let mut first_declared: HashMap<String, Span> = HashMap::new();
    let mut collector = DiagnosticCollector::new();
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(CLASS) {
        let start = cursor + found;
        cursor = start + CLASS.len();

        if !starts_word(source, start) {
            continue;
        }

        let mut input = &source[start..];
        let Ok(name) = class_head.parse_next(&mut input) else {
            continue;
        };
        let body_start = start + offset_of(&source[start..], input);
        let head_span = Span::new(start..body_start);

        let Some(body_end) = matching_brace(source, body_start) else {
            collector.emit(
                Diagnostic::warning(format!("class `{name}` has unbalanced braces"))
                    .with_code(WarningCode::W101)
                    .with_label(head_span, "class body opens here but never closes")
                    .with_help("check the class body for a missing `}`"),
            );
            cursor = body_start;
            continue;
        };
        cursor = body_end + 1;

        let mut entity = EntityType::new(name);
        for component_name in slot_accesses(source, Span::new(body_start..body_end), config.slot_prefix())
        {
            let keep = match config.slot_scope() {
                SlotScope::All => true,
                SlotScope::Registered => {
                    components.is_some_and(|registry| registry.contains(component_name))
                }
            };
            if keep {
                entity.push_component(component_name);
            } else {
                trace!(entity = name, component = component_name; "Dropped unregistered slot access");
            }
        }
        debug!(
            name = name,
            components_count = entity.component_names().len();
            "Extracted entity"
        );

        let span = Span::new(start..cursor);
        if let Some(first) = first_declared.get(name) {
            collector.emit(
                Diagnostic::warning(format!("class `{name}` is declared more than once"))
                    .with_code(WarningCode::W102)
                    .with_label(span, "redeclared here")
                    .with_secondary_label(*first, "first declared here")
                    .with_help("the last declaration wins"),
            );
        } else {
            first_declared.insert(name.to_string(), span);
        }

        registry.insert(entity);
    }

    info!(entities_count = registry.len(); "Entity classes extracted");
    trace!(registry:?; "Entity registry");

    Extraction::new(registry, collector.finish())
}
