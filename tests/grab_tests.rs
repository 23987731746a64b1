use groqd::{ConditionalSelections, Schema, Selection, pipe, project, q};
use serde_json::json;

fn base_selection() -> Selection {
    Selection::new()
        .field("_id", Schema::string())
        .field("title", Schema::string())
}

// ============================================================================
// Query text
// ============================================================================

#[test]
fn test_entity_grab() {
    let node = pipe("*").filter("").slice(0).grab(&base_selection());

    assert_eq!(node.query(), "*[][0]{_id, title}");
    assert_eq!(
        node.schema(),
        Schema::object([("_id", Schema::string()), ("title", Schema::string())])
    );
}

#[test]
fn test_array_grab() {
    let node = pipe("*").filter("_type == 'movie'").grab(&base_selection());

    assert_eq!(node.query(), "*[_type == 'movie']{_id, title}");
    assert_eq!(
        node.schema(),
        Schema::safe_array(Schema::object([
            ("_id", Schema::string()),
            ("title", Schema::string()),
        ]))
    );
}

#[test]
fn test_unknown_root_grab_is_entity() {
    let node = q().grab(&Selection::new().field("count", Schema::number()));
    assert_eq!(node.query(), "{count}");
    assert_eq!(node.schema(), Schema::object([("count", Schema::number())]));
}

#[test]
fn test_empty_selection() {
    let node = pipe("*").filter("").grab(&Selection::new());
    assert_eq!(node.query(), "*[]{}");
    assert_eq!(node.schema(), Schema::safe_array(Schema::Object { fields: vec![] }));
}

#[test]
fn test_expr_and_sub_query_fields() {
    let poster = q().grab_one("poster", Schema::unknown()).grab_one("url", Schema::string());
    let selection = Selection::new()
        .field("title", Schema::string())
        .expr("director", "director->name", Schema::string().nullable())
        .sub("posterUrl", &poster);

    let node = pipe("*").filter("_type == 'movie'").grab(&selection);

    assert_eq!(
        node.query(),
        "*[_type == 'movie']{title, \"director\": director->name, \"posterUrl\": .poster.url}"
    );
    assert_eq!(
        node.schema(),
        Schema::safe_array(Schema::object([
            ("title", Schema::string()),
            ("director", Schema::string().nullable()),
            ("posterUrl", Schema::string()),
        ]))
    );
}

#[test]
fn test_sub_query_keeps_array_schema() {
    let cast = q().grab_one("cast", Schema::unknown());
    let names = pipe("*").filter("").grab_one("name", Schema::string());
    let selection = Selection::new().sub("names", &names);

    let node = cast.grab(&selection);
    assert_eq!(node.query(), ".cast{\"names\": *[].name}");
    assert_eq!(
        node.schema().fields()[0].schema,
        Schema::safe_array(Schema::string())
    );
}

#[test]
fn test_grab_then_slice() {
    let node = pipe("*")
        .filter("_type == 'movie'")
        .grab(&base_selection())
        .slice(0);

    assert_eq!(node.query(), "*[_type == 'movie']{_id, title}[0]");
    assert_eq!(node.schema().fields().len(), 2);
}

// ============================================================================
// Conditional selections
// ============================================================================

#[test]
fn test_conditional_text() {
    let conditionals = ConditionalSelections::new()
        .when("_type == 'movie'", Selection::new().field("year", Schema::number()))
        .when("_type == 'person'", Selection::new().field("born", Schema::date()));

    let node = pipe("*").filter("").grab_with(&base_selection(), &conditionals);

    assert_eq!(
        node.query(),
        "*[]{_id, title, _type == 'movie' => {year}, _type == 'person' => {born}}"
    );
}

#[test]
fn test_conditional_schema_is_union() {
    let conditionals = ConditionalSelections::new()
        .when("_type == 'movie'", Selection::new().field("year", Schema::number()));

    let node = q().grab_with(&base_selection(), &conditionals);

    assert_eq!(
        node.schema(),
        Schema::union([
            Schema::object([
                ("_id", Schema::string()),
                ("title", Schema::string()),
                ("year", Schema::number()),
            ]),
            Schema::object([("_id", Schema::string()), ("title", Schema::string())]),
        ])
    );
}

#[test]
fn test_conditional_branch_overrides_base_field() {
    let conditionals = ConditionalSelections::new().when(
        "defined(subtitle)",
        Selection::new().field("title", Schema::literal("x")),
    );

    let node = q().grab_with(&Selection::new().field("title", Schema::string()), &conditionals);

    match node.schema() {
        Schema::Union { options } => {
            assert_eq!(options[0], Schema::object([("title", Schema::literal("x"))]));
        }
        other => panic!("expected union, got {:?}", other),
    }
}

#[test]
fn test_conditional_parse() {
    let conditionals = ConditionalSelections::new()
        .when("_type == 'movie'", Selection::new().field("year", Schema::number()));
    let node = pipe("*").filter("").grab_with(&base_selection(), &conditionals);

    let parsed = node
        .parse(&json!([
            {"_id": "a", "title": "Alien", "year": 1979},
            {"_id": "b", "title": "Ripley"}
        ]))
        .unwrap();

    assert_eq!(
        parsed,
        json!([
            {"_id": "a", "title": "Alien", "year": 1979},
            {"_id": "b", "title": "Ripley"}
        ])
    );
}

#[test]
fn test_empty_conditionals_match_plain_grab() {
    let plain = pipe("*").filter("").grab(&base_selection());
    let with = pipe("*")
        .filter("")
        .grab_with(&base_selection(), &ConditionalSelections::new());

    assert_eq!(plain, with);
}

// ============================================================================
// project()
// ============================================================================

#[test]
fn test_project_on_safe_array_schema() {
    let projected = project(
        "*[_type == 'movie']",
        &Schema::safe_array(Schema::Unknown),
        &base_selection(),
        None,
    );

    assert_eq!(projected.query, "*[_type == 'movie']{_id, title}");
    assert!(projected.schema.is_safe_array());

    let err = projected.parse(&json!([{"_id": 1, "title": "x"}])).unwrap_err();
    assert_eq!(err.issues[0].path.to_string(), "[0]._id");
}

#[test]
fn test_project_matches_builder() {
    let node = pipe("*").filter("");
    let projected = project(node.query(), &node.schema(), &base_selection(), None);
    let grabbed = node.grab(&base_selection());

    assert_eq!(projected.query, grabbed.query());
    assert_eq!(projected.schema, grabbed.schema());
}

#[test]
fn test_project_on_entity_schema() {
    let projected = project("*[0]", &Schema::Unknown, &base_selection(), None);
    assert_eq!(projected.query, "*[0]{_id, title}");
    assert_eq!(projected.schema.fields().len(), 2);
}

#[test]
fn test_conditional_parse_reports_field_paths() {
    let conditionals = ConditionalSelections::new()
        .when("_type == 'movie'", Selection::new().field("year", Schema::number()));
    let node = pipe("*")
        .filter("")
        .grab_with(&Selection::new().field("title", Schema::string()), &conditionals);

    let err = node.parse(&json!([{"title": 5, "year": 1979}])).unwrap_err();

    assert_eq!(err.issues.len(), 1);
    assert_eq!(
        err.issues[0].to_string(),
        "[0].title: expected string, received number"
    );
}
