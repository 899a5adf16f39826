use indoc::indoc;
use strata_grammar::Grammar;
use strata_lib::{ParseConfig, Parser};

use super::chunks::layout;

const TAGS: &str = indoc! {r#"
    {
      "name": "doc",
      "patterns": ["tag", "ws"],
      "repository": {
        "tag": { "begin": "<", "end": ">", "patterns": ["tag", "name"] },
        "name": { "match": "\\w+" },
        "ws": { "match": "\\s+" }
      }
    }
"#};

fn chunks(text: &str, chunk_size: usize) -> String {
    let grammar = Grammar::from_json(TAGS).unwrap();
    let config = ParseConfig::new().chunk_size(chunk_size);
    let out = Parser::with_config(&grammar, text, config).run();
    layout(out.cache.packet(), &grammar)
}

#[test]
fn sibling_tags() {
    insta::assert_snapshot!(chunks("<a><b>", 32), @r"
    0: pure@0 restart
    1: 0..3 x3 +[tag] -[tag]
    2: pure@3 restart
    3: 3..6 x3 +[tag] -[tag]
    4: pure@6 restart
    ");
}

#[test]
fn nested_tag_splits_on_open_and_close() {
    insta::assert_snapshot!(chunks("<a<b>>", 32), @r"
    0: pure@0 restart
    1: 0..2 x2 +[tag]
    2: 2..5 x3 in [tag] +[tag] -[tag]
    3: 5..6 x1 in [tag] -[tag]
    4: pure@6 restart
    ");
}

#[test]
fn unclosed_tag_has_no_trailing_pure() {
    insta::assert_snapshot!(chunks("<a", 32), @r"
    0: pure@0 restart
    1: 0..2 x2 +[tag]
    ");
}
