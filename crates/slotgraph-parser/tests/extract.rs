use proptest::prelude::*;
use slotgraph_parser::{
    ExtractConfig, SlotScope, error::WarningCode, extract_components, extract_entities,
};

const COMPONENTS: &str = r#"
import { defineComponent, EntityId, LoroMap, LoroText } from "./schema";

export const Body = defineComponent("body", () => new LoroText());
export const Author = defineComponent("author", EntityId);
export const ReplyTo = defineComponent(
    "reply_to",
    EntityId,
);
export const Meta = defineComponent("meta", () => new LoroMap());
"#;

const ENTITIES: &str = r#"
export class Message extends Entity {
    get body() { return this.get(c.Body); }
    get author() { return this.get(c.Author); }
    get replyTo() {
        if (!this.has(c.ReplyTo)) { return undefined; }
        return this.get(c.ReplyTo);
    }
}

export class User extends Entity {
    get name() { return this.get(c.Name); }
}
"#;

#[test]
fn test_extract_component_registry() {
    let extraction = extract_components(COMPONENTS, &ExtractConfig::default());
    assert!(extraction.diagnostics().is_empty());

    let registry = extraction.value();
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        ["Body", "Author", "ReplyTo", "Meta"]
    );
    assert!(registry.get("Author").unwrap().references_entity());
    assert!(registry.get("ReplyTo").unwrap().references_entity());
    assert!(!registry.get("Body").unwrap().references_entity());
    assert!(registry.get("Body").unwrap().storage().is_text);
    assert!(registry.get("Meta").unwrap().storage().is_map);
}

#[test]
fn test_extract_entity_registry() {
    let extraction = extract_entities(ENTITIES, &ExtractConfig::default(), None);
    assert!(extraction.diagnostics().is_empty());

    let registry = extraction.value();
    assert_eq!(registry.names().collect::<Vec<_>>(), ["Message", "User"]);
    assert_eq!(
        registry.get("Message").unwrap().component_names(),
        ["Body", "Author", "ReplyTo"]
    );
    assert_eq!(registry.get("User").unwrap().component_names(), ["Name"]);
}

#[test]
fn test_registered_scope_uses_component_registry() {
    let components = extract_components(COMPONENTS, &ExtractConfig::default());
    let config = ExtractConfig::default().with_slot_scope(SlotScope::Registered);
    let extraction = extract_entities(ENTITIES, &config, Some(components.value()));

    let registry = extraction.value();
    assert!(registry.get("User").unwrap().component_names().is_empty());
    assert_eq!(
        registry.get("Message").unwrap().component_names(),
        ["Body", "Author", "ReplyTo"]
    );
}

#[test]
fn test_strict_mode_reports_every_warning() {
    let source = r#"
export const Parent = defineComponent(EntityId);
export const Parent = defineComponent(EntityId);
export const Broken = defineComponent(EntityId
"#;
    let err = extract_components(source, &ExtractConfig::default())
        .into_strict()
        .unwrap_err();

    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, [WarningCode::W002, WarningCode::W001]);
    assert!(err.to_string().contains("(+1 more)"));
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn extraction_is_idempotent(names in prop::collection::vec(identifier_strategy(), 0..8)) {
        let body: String = names.iter().map(|name| format!("this.get(c.{name});\n")).collect();
        let source = format!("class Thing {{\n{body}}}\n");
        let config = ExtractConfig::default();

        let first = extract_entities(&source, &config, None);
        let second = extract_entities(&source, &config, None);
        prop_assert_eq!(first.value(), second.value());

        let mut expected: Vec<String> = Vec::new();
        for name in names {
            if !expected.contains(&name) {
                expected.push(name);
            }
        }
        prop_assert_eq!(first.value().get("Thing").unwrap().component_names(), expected.as_slice());
    }

    #[test]
    fn prefixed_identifiers_never_match(owner in "x[a-z0-9]{0,6}", name in identifier_strategy()) {
        // Both forms continue a longer member access on the left.
        let source = format!("class Thing {{ {owner}c.{name}; {owner}.c.{name}; }}");
        let extraction = extract_entities(&source, &ExtractConfig::default(), None);

        prop_assert!(extraction.value().get("Thing").unwrap().component_names().is_empty());
    }

    #[test]
    fn declarations_are_found_in_order(names in prop::collection::vec(identifier_strategy(), 1..8)) {
        let source: String = names
            .iter()
            .map(|name| format!("export const {name} = defineComponent(EntityId);\n"))
            .collect();
        let extraction = extract_components(&source, &ExtractConfig::default());

        let mut expected: Vec<&str> = Vec::new();
        for name in &names {
            if !expected.contains(&name.as_str()) {
                expected.push(name);
            }
        }
        prop_assert_eq!(extraction.value().names().collect::<Vec<_>>(), expected);
        prop_assert_eq!(extraction.diagnostics().len(), names.len() - extraction.value().len());
    }
}
