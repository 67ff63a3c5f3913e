//! Component registry extraction.
//!
//! A component declaration is an exported constant bound to a factory call:
//!
//! ```text
//! export const ReplyTo = defineComponent("reply_to", EntityId);
//! ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ head                 ^ terminator
//! ```
//!
//! The body is the whole span from `export` through the first `;`, across
//! newlines. Storage flags are substring tests on that body, so a signature
//! that only appears in a comment inside the declaration still sets its flag.

use std::collections::HashMap;

use log::{debug, info, trace};
use winnow::{
    ModalResult, Parser as _,
    ascii::{multispace0, multispace1},
    combinator::{opt, repeat, terminated},
    token::{take_till, take_until},
};

use slotgraph_core::model::{ComponentDefinition, ComponentRegistry};

use crate::{
    ExtractConfig, Extraction,
    error::{Diagnostic, DiagnosticCollector, WarningCode},
    scan::{identifier, keyword, offset_of, starts_word},
    span::Span,
};

const EXPORT: &str = "export";

/// Parse `.member` segments following the factory identifier.
fn member_path(input: &mut &str) -> ModalResult<()> {
    repeat(0.., ('.', identifier)).parse_next(input)
}

/// Parse the factory callee, e.g. `defineComponent` or `schema.component`.
fn factory_callee<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (identifier, member_path).take().parse_next(input)
}

/// Parse explicit type arguments such as `<Message>` between callee and `(`.
fn type_arguments(input: &mut &str) -> ModalResult<()> {
    ('<', take_till(0.., '>'), '>').void().parse_next(input)
}

/// Parse `export const NAME = factory(` and return `NAME`.
fn declaration_head<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        keyword(EXPORT),
        multispace1,
        keyword("const"),
        multispace1,
        identifier,
        multispace0,
        '=',
        multispace0,
        factory_callee,
        multispace0,
        opt(type_arguments),
        multispace0,
        '(',
    )
        .map(|(_, _, _, _, name, ..)| name)
        .parse_next(input)
}

/// Consume everything up to and including the first `;`.
fn terminator<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    terminated(take_until(0.., ";"), ";").parse_next(input)
}

/// Extract every component declaration in `source`.
///
/// Declarations are matched left to right without overlap. A repeated name
/// replaces the earlier definition and emits [`WarningCode::W002`]; a head
/// without a terminating `;` is skipped with [`WarningCode::W001`].
///
/// # Examples
///
/// ```
/// use slotgraph_parser::{ExtractConfig, extract_components};
///
/// let source = "export const Parent = defineComponent(EntityId);";
/// let extraction = extract_components(source, &ExtractConfig::default());
///
/// let parent = extraction.value().get("Parent").unwrap();
/// assert!(parent.references_entity());
/// ```
pub fn extract_components(source: &str, config: &ExtractConfig) -> Extraction<ComponentRegistry> {
    info!(source_len = source.len(); "Extracting component declarations");

    let signatures = config.signatures();
    let mut registry = ComponentRegistry::new();
    let mut first_declared: HashMap<String, Span> = HashMap::new();
    let mut collector = DiagnosticCollector::new();
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(EXPORT) {
        let start = cursor + found;
        cursor = start + EXPORT.len();

        if !starts_word(source, start) {
            continue;
        }

        let mut input = &source[start..];
        let Ok(name) = declaration_head.parse_next(&mut input) else {
            continue;
        };
        let head_span = Span::new(start..start + offset_of(&source[start..], input));

        if terminator.parse_next(&mut input).is_err() {
            collector.emit(
                Diagnostic::warning(format!(
                    "component declaration `{name}` is missing its `;` terminator"
                ))
                .with_code(WarningCode::W001)
                .with_label(head_span, "declaration starts here")
                .with_help("end the declaration with `;`"),
            );
            cursor = head_span.end();
            continue;
        }

        let span = Span::new(start..start + offset_of(&source[start..], input));
        let body = span.slice(source);
        cursor = span.end();

        let definition = ComponentDefinition::new(
            name,
            signatures.storage_kinds(body),
            signatures.references_entity(body),
        );
        debug!(
            name = name,
            references_entity = definition.references_entity();
            "Extracted component"
        );

        if let Some(first) = first_declared.get(name) {
            collector.emit(
                Diagnostic::warning(format!("component `{name}` is declared more than once"))
                    .with_code(WarningCode::W002)
                    .with_label(span, "redeclared here")
                    .with_secondary_label(*first, "first declared here")
                    .with_help("the last declaration wins"),
            );
        } else {
            first_declared.insert(name.to_string(), span);
        }

        registry.insert(definition);
    }

    info!(components_count = registry.len(); "Component declarations extracted");
    trace!(registry:?; "Component registry");

    Extraction::new(registry, collector.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signatures;

    fn extract(source: &str) -> Extraction<ComponentRegistry> {
        extract_components(source, &ExtractConfig::default())
    }

    #[test]
    fn test_declaration_head() {
        let mut input = "export const Parent = defineComponent(EntityId);";
        assert_eq!(declaration_head(&mut input).unwrap(), "Parent");
        assert_eq!(input, "EntityId);");
    }

    #[test]
    fn test_declaration_head_with_member_callee_and_type_arguments() {
        let mut input = "export const Title = schema.component<string>(LoroText);";
        assert_eq!(declaration_head(&mut input).unwrap(), "Title");
    }

    #[test]
    fn test_declaration_head_rejects_non_call() {
        let mut input = "export const LIMIT = 10;";
        assert!(declaration_head(&mut input).is_err());
    }

    #[test]
    fn test_entity_reference_marker_sets_flag() {
        let extraction = extract("export const ReplyTo = defineComponent(EntityId);");

        let reply_to = extraction.value().get("ReplyTo").unwrap();
        assert!(reply_to.references_entity());
        assert!(extraction.diagnostics().is_empty());
    }

    #[test]
    fn test_multiline_declaration() {
        let source = r#"
export const Body = defineComponent(
    "body",
    () => new LoroText(),
);
"#;
        let extraction = extract(source);

        let body = extraction.value().get("Body").unwrap();
        assert!(body.storage().is_text);
        assert!(!body.references_entity());
    }

    #[test]
    fn test_body_ends_at_first_terminator() {
        let source = "export const Tag = defineComponent(Marker);\nconst other = EntityId;";
        let extraction = extract(source);

        let tag = extraction.value().get("Tag").unwrap();
        assert!(tag.storage().is_marker);
        assert!(!tag.references_entity());
    }

    #[test]
    fn test_flags_are_independent() {
        let source = "export const Mixed = defineComponent(LoroMap, LoroList, EntityId);";
        let extraction = extract(source);

        let mixed = extraction.value().get("Mixed").unwrap();
        assert!(mixed.storage().is_map);
        assert!(mixed.storage().is_list);
        assert!(mixed.references_entity());
    }

    #[test]
    fn test_signature_in_comment_still_counts() {
        let source = "export const Note = defineComponent(/* not an EntityId */ LoroText);";
        let extraction = extract(source);

        assert!(extraction.value().get("Note").unwrap().references_entity());
    }

    #[test]
    fn test_non_exported_and_prefixed_words_are_ignored() {
        let source = r#"
const Hidden = defineComponent(EntityId);
reexport const Fake = defineComponent(EntityId);
export const Real = defineComponent(LoroMap);
"#;
        let extraction = extract(source);

        assert_eq!(extraction.value().names().collect::<Vec<_>>(), ["Real"]);
    }

    #[test]
    fn test_empty_source_yields_empty_registry() {
        let extraction = extract("");

        assert!(extraction.value().is_empty());
        assert!(extraction.diagnostics().is_empty());
    }

    #[test]
    fn test_duplicate_declaration_last_wins() {
        let source = r#"
export const Parent = defineComponent(LoroMap);
export const Title = defineComponent(LoroText);
export const Parent = defineComponent(EntityId);
"#;
        let extraction = extract(source);
        let registry = extraction.value();

        assert_eq!(registry.names().collect::<Vec<_>>(), ["Parent", "Title"]);
        assert!(registry.get("Parent").unwrap().references_entity());
        assert!(!registry.get("Parent").unwrap().storage().is_map);

        let diagnostics = extraction.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(WarningCode::W002));
        assert_eq!(diagnostics[0].labels().len(), 2);
    }

    #[test]
    fn test_unterminated_declaration_is_skipped() {
        let source = "export const Good = defineComponent(LoroMap);\nexport const Broken = defineComponent(EntityId";
        let extraction = extract(source);

        assert_eq!(extraction.value().names().collect::<Vec<_>>(), ["Good"]);
        let diagnostics = extraction.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(WarningCode::W001));

        let span = diagnostics[0].labels()[0].span();
        assert!(span.slice(source).starts_with("export const Broken"));
    }

    #[test]
    fn test_custom_signatures() {
        let config = ExtractConfig::default().with_signatures(Signatures {
            entity_ref: "Ref<".to_string(),
            ..Signatures::default()
        });
        let source = "export const Owner = defineComponent(Ref<User>());";
        let extraction = extract_components(source, &config);

        assert!(extraction.value().get("Owner").unwrap().references_entity());
    }
}
