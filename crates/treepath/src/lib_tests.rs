use indoc::indoc;
use serde_json::{Value, json};

use crate::{Path, PrintTracer, Verbosity};

fn error(path: &str) -> String {
    Path::new(path).unwrap_err().to_string()
}

fn find(path: &str, doc: &Value) -> Vec<Value> {
    Path::new(path).unwrap().find(doc).into_iter().cloned().collect()
}

#[test]
fn compile_errors() {
    assert_eq!(error("$."), "child name missing after .");
    assert_eq!(error("$['']"), "child name missing from ['']");
    assert_eq!(error("$.."), "child name missing after ..");
    assert_eq!(
        error("$.child[1:2:3:4]"),
        "invalid array index, too many colons: [1:2:3:4]"
    );
    assert_eq!(
        error("$.child[1:2:a]"),
        "invalid array index containing non-integer value: [1:2:a]"
    );
    assert!(error("$[?(@.child==9223372036854775808)]").contains("value out of range"));
    assert!(error("$[?('x'=~/.*/)]").starts_with("literal cannot be matched using =~"));
}

#[test]
fn filter_on_sequence_of_mappings() {
    let doc = json!([
        {"child": 1, "id": "a"},
        {"child": 2, "id": "b"},
        {"child": "1", "id": "c"},
        {"id": "d"},
        {"child": 1, "id": "e"}
    ]);

    assert_eq!(
        find("$[?(@.child==1)].id", &doc),
        vec![json!("a"), json!("e")]
    );
}

#[test]
fn negative_and_out_of_range_index() {
    let doc = json!({"arr": ["x", "y", "z"]});

    assert_eq!(find("$.arr[-1]", &doc), vec![json!("z")]);
    assert!(find("$.arr[10]", &doc).is_empty());
}

#[test]
fn document_order_and_idempotence() {
    let doc: Value = serde_json::from_str(indoc! {r#"
        {
          "z": {"name": "first", "inner": [{"name": "second"}]},
          "a": [{"name": "third"}, {"other": {"name": "fourth"}}]
        }
    "#})
    .unwrap();
    let path = Path::new("$..name").unwrap();

    let first = path.find(&doc);
    assert_eq!(
        first,
        vec![&json!("first"), &json!("second"), &json!("third"), &json!("fourth")]
    );
    assert_eq!(path.find(&doc), first);
}

#[test]
fn compiling_twice_matches_the_same_nodes() {
    let doc = json!({"a": [{"b": 1}, {"b": [2, 3]}, {"c": 4}]});
    let paths = ["$.a[*].b", "$..b[0]", "$.a[::-1]", "$..*", "$.a[0,2]"];

    for text in paths {
        let first = Path::new(text).unwrap();
        let second = Path::new(text).unwrap();
        assert_eq!(first.pipeline(), second.pipeline(), "{text}");
        assert_eq!(first.find(&doc), second.find(&doc), "{text}");
    }
}

#[test]
fn and_or_chains() {
    let doc = json!([
        {"a": 1, "b": 1, "c": 0, "d": 0},
        {"a": 1, "b": 0, "c": 0, "d": 1},
        {"a": 0, "b": 0, "c": 1, "d": 1},
        {"a": 0, "b": 1, "c": 1, "d": 0}
    ]);
    let ids = |text: &str| -> Vec<usize> {
        let found = Path::new(text).unwrap().find(&doc);
        doc.as_array()
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(_, row)| found.contains(row))
            .map(|(i, _)| i)
            .collect()
    };

    // a && b || c && d
    assert_eq!(
        ids("$[?(@.a == 1 && @.b == 1 || @.c == 1 && @.d == 1)]"),
        vec![0, 2]
    );
    // a || b && c || d
    assert_eq!(
        ids("$[?(@.a == 1 || @.b == 1 && @.c == 1 || @.d == 1)]"),
        vec![0, 1, 2, 3]
    );
    // a && b && c, none have all three
    assert!(ids("$[?(@.a == 1 && @.b == 1 && @.c == 1)]").is_empty());
    // (a || c) && (b || d)
    assert_eq!(
        ids("$[?((@.a == 1 || @.c == 1) && (@.b == 1 || @.d == 1))]"),
        vec![0, 1, 2, 3]
    );
    // !a && b || !c && d
    assert_eq!(
        ids("$[?(!(@.a == 1) && @.b == 1 || !(@.c == 1) && @.d == 1)]"),
        vec![1, 3]
    );
}

#[test]
fn parse_and_display() {
    let path: Path = "$.store.book[?(@.price < 10)].title".parse().unwrap();

    assert_eq!(path.to_string(), "$.store.book[?(@.price < 10)].title");
    assert_eq!(path.as_str(), path.to_string());
    assert_eq!(
        path.pipeline().to_string(),
        "$.store.book[?(@.price < 10)].title"
    );
    assert!("$.".parse::<Path>().is_err());
}

#[test]
fn recursion_fuel() {
    let nested = "$[?(@[?(@[?(@)])])]";

    assert!(Path::new(nested).is_ok());
    assert!(Path::with_recursion_fuel(nested, Some(2)).is_err());
    assert!(Path::with_recursion_fuel(nested, None).is_ok());
}

#[test]
fn traced_find() {
    let doc = json!({"a": [1, 2, 3]});
    let path = Path::new("$.a[1:]").unwrap();
    let mut tracer = PrintTracer::new(Verbosity::Default);

    let found = path.find_traced(&doc, &mut tracer);

    assert_eq!(found, vec![&json!(2), &json!(3)]);
    insta::assert_snapshot!(tracer.lines().join("\n"), @r"
    Root $ <- 1
      -> 1
    DotChild .a <- 1
      -> 1
    Slice [1:] <- 1
      -> 2
    Identity <- 2
      -> 2
    ");
}
