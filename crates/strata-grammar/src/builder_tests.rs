use indoc::indoc;
use strata_core::{GrammarDef, NodeId};

use crate::{Candidate, CaptureTarget, Grammar, GrammarError, Pattern, Rule};

const XML: &str = indoc! {r#"
    {
      "name": "xml",
      "patterns": ["tag", "text"],
      "repository": {
        "tag": {
          "begin": "<(\\w+)>",
          "end": "</\\1>",
          "beginCaptures": { "1": { "type": "TagName" } },
          "contentType": "Body",
          "patterns": ["tag", "text"]
        },
        "text": { "match": "[^<]+" }
      }
    }
"#};

fn names(grammar: &Grammar) -> Vec<&str> {
    grammar.nodes().names()
}

#[test]
fn node_allocation_order() {
    let grammar = Grammar::from_json(XML).unwrap();

    assert_eq!(
        names(&grammar),
        ["", "xml", "unrecognized", "incomplete", "tag", "text", "TagName", "Body"]
    );
    assert_eq!(grammar.node_count(), 8);
    assert_eq!(grammar.nodes().get("tag"), Some(NodeId::Safe.id()));
}

#[test]
fn scoped_rule_shape() {
    let grammar = Grammar::from_json(XML).unwrap();
    let tag = grammar.lookup("tag").unwrap();

    let Rule::Scoped(scoped) = grammar.rule(tag) else {
        panic!("expected scoped rule");
    };
    assert_eq!(scoped.node, grammar.nodes().get("tag").unwrap());
    assert!(scoped.has_content_node());
    assert!(matches!(scoped.begin.pattern, Pattern::Fixed(_)));
    assert!(matches!(&scoped.end.pattern, Pattern::Template(t) if t.source() == r"</\1>"));
    assert_eq!(
        scoped.begin.captures[0].target,
        CaptureTarget::Node(grammar.nodes().get("TagName").unwrap())
    );

    let Rule::Switch(content) = grammar.rule(scoped.content) else {
        panic!("expected content switch");
    };
    assert!(!content.emits());
    assert_eq!(
        grammar.candidates(content),
        [tag, grammar.lookup("text").unwrap()]
    );
}

#[test]
fn root_is_anonymous_switch() {
    let grammar = Grammar::from_json(XML).unwrap();

    let Rule::Switch(root) = grammar.rule(grammar.root()) else {
        panic!("expected root switch");
    };
    assert_eq!(root.node, NodeId::None.id());
    assert_eq!(grammar.candidates(root).len(), 2);
}

#[test]
fn self_referential_switch() {
    let json = indoc! {r#"
        {
          "name": "t",
          "patterns": ["group"],
          "repository": {
            "group": { "patterns": ["paren", "x"], "emit": true },
            "paren": { "begin": "\\(", "end": "\\)", "patterns": ["group"] },
            "x": { "match": "x" }
          }
        }
    "#};

    let grammar = Grammar::from_json(json).unwrap();
    let group = grammar.lookup("group").unwrap();
    let Rule::Switch(switch) = grammar.rule(group) else {
        panic!("expected switch");
    };

    assert!(switch.emits());
    assert_eq!(switch.candidates[0], Candidate::Named("paren".into()));
    assert_eq!(
        grammar.candidates(switch),
        [grammar.lookup("paren").unwrap(), grammar.lookup("x").unwrap()]
    );
}

#[test]
fn capture_targets_go_through_switches() {
    let json = indoc! {r#"
        {
          "name": "t",
          "repository": {
            "call": { "match": "(\\w+)(\\()", "captures": { "1": "ident", "2": "punct" } },
            "ident": { "match": "\\w+" },
            "punct": { "patterns": [{ "match": "\\(", "type": "Paren" }] }
          }
        }
    "#};

    let grammar = Grammar::from_json(json).unwrap();
    let Rule::Match(call) = grammar.rule(grammar.lookup("call").unwrap()) else {
        panic!("expected match rule");
    };

    let CaptureTarget::Switch(synthetic) = call.captures[0].target else {
        panic!("expected switch target");
    };
    let Rule::Switch(wrapper) = grammar.rule(synthetic) else {
        panic!("expected synthetic switch");
    };
    assert!(!wrapper.emits());
    assert_eq!(wrapper.candidates, [Candidate::Named("ident".into())]);

    assert_eq!(
        call.captures[1].target,
        CaptureTarget::Switch(grammar.lookup("punct").unwrap())
    );
}

#[test]
fn unresolved_root_reference() {
    let err = Grammar::from_json(r#"{ "name": "t", "patterns": ["missing"] }"#).unwrap_err();

    assert!(matches!(err, GrammarError::UnresolvedReference { .. }));
    assert_eq!(
        err.to_string(),
        "rule `patterns`: reference to undefined rule `missing`"
    );
}

#[test]
fn unresolved_nested_reference() {
    let json = r#"{ "name": "t", "repository": { "a": { "patterns": ["b"] } } }"#;

    let err = Grammar::from_json(json).unwrap_err();
    assert_eq!(err.to_string(), "rule `a`: reference to undefined rule `b`");
}

#[test]
fn capture_group_out_of_range() {
    let json = r#"{ "name": "t", "repository": { "m": { "match": "a", "captures": { "2": { "type": "X" } } } } }"#;

    let err = Grammar::from_json(json).unwrap_err();
    assert_eq!(
        err.to_string(),
        "rule `m`: capture group 2 does not exist in `a`"
    );
}

#[test]
fn broken_back_reference_template() {
    let json = r#"{ "name": "t", "repository": { "s": { "begin": "(a)", "end": "(\\1" } } }"#;

    let err = Grammar::from_json(json).unwrap_err();
    assert!(matches!(err, GrammarError::Regex { ref rule, .. } if rule == "s"));
}

#[test]
fn definition_errors_pass_through() {
    let err = Grammar::from_json("[]").unwrap_err();
    assert!(matches!(err, GrammarError::Definition(_)));
}

#[test]
fn binary_definition_compiles_identically() {
    let def = GrammarDef::from_json(XML).unwrap();
    let bytes = def.to_binary().unwrap();

    let from_json = Grammar::new(&def).unwrap();
    let from_binary = Grammar::from_binary(&bytes).unwrap();

    assert_eq!(names(&from_json), names(&from_binary));
    assert_eq!(from_json.rule_count(), from_binary.rule_count());
}
