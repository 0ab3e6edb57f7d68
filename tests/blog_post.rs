//! Blog Post Scenario Tests
//!
//! A realistic schema exercising every type kind together:
//! - Dynamic author schema chosen from the author's own shape
//! - Nested content and meta documents
//! - Array of comment documents with their own nested commenter
//! - Unions, nullable fields, defaults and validators

use std::sync::Arc;

use chrono::{DateTime, Utc};
use schemer::schema::{ErrorReport, FieldSpec, FieldType, Schema, SchemaErrorCode};
use schemer::validators::{length, one_of};
use serde_json::{json, Map, Value};

// =============================================================================
// Sample Schemas
// =============================================================================

fn stub_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2012-04-05T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn name_schema() -> Arc<Schema> {
    Schema::builder()
        .named("name")
        .field("first", FieldSpec::required_string())
        .field("last", FieldSpec::required_string())
        .build_shared()
        .unwrap()
}

fn about_schema() -> Arc<Schema> {
    Schema::builder()
        .named("about")
        .field("first_name", FieldSpec::required_string())
        .field("last_name", FieldSpec::required_string())
        .field("birth_year", FieldSpec::required_int())
        .field("birth_month", FieldSpec::required_int())
        .field("birth_day", FieldSpec::required_int())
        .build_shared()
        .unwrap()
}

fn website_schema() -> Arc<Schema> {
    Schema::builder()
        .named("website")
        .field("url", FieldSpec::required_string())
        .field("name", FieldSpec::required_string())
        .build_shared()
        .unwrap()
}

fn comment_schema(name: &Arc<Schema>) -> Arc<Schema> {
    Schema::builder()
        .named("comment")
        .field("commenter", FieldSpec::required_schema(name))
        .field("email", FieldSpec::optional_string())
        .field("comment", FieldSpec::required_string())
        .field("votes", FieldSpec::new(FieldType::int()).default(0))
        .build_shared()
        .unwrap()
}

fn author_type(name: Arc<Schema>, about: Arc<Schema>) -> FieldType {
    FieldType::dynamic(move |post: &Map<String, Value>| {
        let detailed = post
            .get("author")
            .and_then(Value::as_object)
            .is_some_and(|author| author.contains_key("first_name"));
        if detailed {
            FieldType::from(&about)
        } else {
            FieldType::from(&name)
        }
    })
}

fn website_type(website: Arc<Schema>) -> FieldType {
    FieldType::dynamic(move |post: &Map<String, Value>| match post.get("website") {
        Some(Value::Array(_)) => FieldType::array(&website),
        Some(Value::Object(_)) => FieldType::from(&website),
        _ => FieldType::string(),
    })
}

fn blog_post_schema() -> Schema {
    let name = name_schema();
    let content = Schema::builder()
        .field("title", FieldSpec::required_string())
        .field("text", FieldSpec::required_string())
        .field("page_views", FieldSpec::new(FieldType::int()).default(1))
        .build_shared()
        .unwrap();
    let meta = Schema::builder()
        .field("last_edited", FieldSpec::new(FieldType::datetime()))
        .build_shared()
        .unwrap();

    Schema::builder()
        .named("blog_post")
        .field("author", FieldSpec::new(author_type(Arc::clone(&name), about_schema())).required())
        .field("content", FieldSpec::required_schema(&content))
        .field("meta", FieldSpec::required_schema(&meta).nullable(true))
        .field(
            "category",
            FieldSpec::optional_string().validates(one_of(["cooking", "politics"])),
        )
        .field("comments", FieldSpec::required_array(&comment_schema(&name)))
        .field("likes", FieldSpec::new(FieldType::int()).default(0))
        .field(
            "creation_date",
            FieldSpec::new(FieldType::datetime()).default_from_clock(|now| json!(now.to_rfc3339())),
        )
        .field(
            "tags",
            FieldSpec::optional_array(FieldType::string())
                .default(json!(["blog"]))
                .validates(length(Some(1), None)),
        )
        .field("misc", FieldSpec::new(FieldType::mixed([FieldType::string(), FieldType::int()])))
        .field("linked_id", FieldSpec::new(FieldType::mixed([FieldType::int(), FieldType::string()])))
        .field("external_code", FieldSpec::optional_string().nullable(false))
        .field("website", FieldSpec::new(website_type(website_schema())))
        .field(
            "editors",
            FieldSpec::optional_array(FieldType::mixed([FieldType::from(&name), FieldType::string()])),
        )
        .build()
        .unwrap()
}

fn valid_doc() -> Value {
    json!({
        "author": {
            "first": "John",
            "last": "Humphreys"
        },
        "content": {
            "title": "How to make cookies",
            "text": "First start by pre-heating the oven..."
        },
        "category": "cooking",
        "meta": null,
        "comments": [
            {
                "commenter": { "first": "Julio", "last": "Cesar" },
                "email": "jcesar@test.com",
                "comment": "Great post dude!"
            },
            {
                "commenter": { "first": "Michael", "last": "Andrews" },
                "comment": "My wife loves these."
            }
        ],
        "tags": ["cookies", "recipe", "yum"],
        "external_code": "ABC123",
        "website": {
            "url": "johnhumphreys.tumblr.com",
            "name": "John's Cooking Blog"
        }
    })
}

fn detailed_author_doc() -> Value {
    let mut doc = valid_doc();
    doc["author"] = json!({
        "first_name": "John",
        "last_name": "Humphreys",
        "birth_year": 1978,
        "birth_month": 8,
        "birth_day": 15
    });
    doc
}

fn report(doc: &Value) -> ErrorReport {
    blog_post_schema().errors(doc).unwrap()
}

fn assert_paths_invalid(doc: &Value, paths: &[&str]) {
    let err = blog_post_schema().validate(doc).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
    let mut expected: Vec<&str> = paths.to_vec();
    expected.sort_unstable();
    assert_eq!(err.errors().unwrap().paths().collect::<Vec<_>>(), expected);
}

// =============================================================================
// Valid Documents
// =============================================================================

#[test]
fn test_valid_document_with_short_author() {
    assert!(blog_post_schema().validate(&valid_doc()).is_ok());
}

#[test]
fn test_valid_document_with_detailed_author() {
    assert!(blog_post_schema().validate(&detailed_author_doc()).is_ok());
}

#[test]
fn test_optional_field_set_to_null() {
    let mut doc = valid_doc();
    doc["likes"] = Value::Null;
    assert!(blog_post_schema().validate(&doc).is_ok());
}

#[test]
fn test_mixed_accepts_each_candidate() {
    let schema = blog_post_schema();
    let mut doc = valid_doc();
    doc["misc"] = json!("a string");
    assert!(schema.validate(&doc).is_ok());
    doc["misc"] = json!(32);
    assert!(schema.validate(&doc).is_ok());
}

// =============================================================================
// Presence
// =============================================================================

#[test]
fn test_missing_required_field() {
    let mut doc = valid_doc();
    doc.as_object_mut().unwrap().remove("author");
    assert_paths_invalid(&doc, &["author"]);
    assert_eq!(report(&doc).get("author"), Some("author is required"));
}

#[test]
fn test_required_field_with_null_value() {
    let mut doc = valid_doc();
    doc["author"] = Value::Null;
    assert_paths_invalid(&doc, &["author"]);
    assert_eq!(report(&doc).get("author"), Some("author is not nullable"));
}

#[test]
fn test_non_nullable_optional_field_set_to_null() {
    let mut doc = valid_doc();
    doc["external_code"] = Value::Null;
    assert_paths_invalid(&doc, &["external_code"]);
}

#[test]
fn test_missing_required_array_field() {
    let mut doc = valid_doc();
    doc.as_object_mut().unwrap().remove("comments");
    assert_paths_invalid(&doc, &["comments"]);
}

#[test]
fn test_missing_embedded_document() {
    let mut doc = valid_doc();
    doc.as_object_mut().unwrap().remove("content");
    assert_paths_invalid(&doc, &["content"]);
}

#[test]
fn test_missing_required_field_in_embedded_document() {
    let mut doc = valid_doc();
    doc["content"].as_object_mut().unwrap().remove("title");
    assert_paths_invalid(&doc, &["content.title"]);
    assert_eq!(report(&doc).get("content.title"), Some("content.title is required"));
}

#[test]
fn test_missing_required_field_in_embedded_collection() {
    let mut doc = valid_doc();
    doc["comments"][0].as_object_mut().unwrap().remove("commenter");
    assert_paths_invalid(&doc, &["comments.0.commenter"]);
}

#[test]
fn test_multiple_missing_fields_all_reported() {
    let mut doc = valid_doc();
    doc["content"].as_object_mut().unwrap().remove("title");
    doc["comments"][1].as_object_mut().unwrap().remove("commenter");
    doc.as_object_mut().unwrap().remove("author");
    assert_paths_invalid(&doc, &["content.title", "comments.1.commenter", "author"]);
}

// =============================================================================
// Dynamic Types
// =============================================================================

#[test]
fn test_missing_subfield_of_short_author() {
    let mut doc = valid_doc();
    doc["author"].as_object_mut().unwrap().remove("last");
    assert_paths_invalid(&doc, &["author.last"]);
}

#[test]
fn test_missing_subfield_of_detailed_author() {
    let mut doc = detailed_author_doc();
    doc["author"].as_object_mut().unwrap().remove("last_name");
    assert_paths_invalid(&doc, &["author.last_name"]);
}

#[test]
fn test_discriminator_switches_enforced_schema() {
    // A detailed author missing its birth fields is judged against the
    // detailed schema only, never the short one.
    let mut doc = valid_doc();
    doc["author"] = json!({ "first_name": "John", "last_name": "Humphreys" });

    let errors = report(&doc);
    assert_eq!(
        errors.paths().collect::<Vec<_>>(),
        vec!["author.birth_day", "author.birth_month", "author.birth_year"]
    );
    assert!(!errors.contains("author.first"));
    assert!(!errors.contains("author.last"));
}

#[test]
fn test_author_of_wrong_shape() {
    let mut doc = valid_doc();
    doc["author"] = json!(33);
    assert_eq!(
        report(&doc).get("author"),
        Some("expected an embedded document, got type int")
    );
}

#[test]
fn test_dynamic_single_website() {
    let mut doc = valid_doc();
    doc["website"] = json!("WEB");
    assert!(blog_post_schema().validate(&doc).is_ok());
}

#[test]
fn test_dynamic_website_array() {
    let mut doc = valid_doc();
    let site = doc["website"].clone();
    doc["website"] = json!([site.clone(), site]);
    assert!(blog_post_schema().validate(&doc).is_ok());
}

#[test]
fn test_dynamic_website_invalid_array() {
    let mut doc = valid_doc();
    doc["website"] = json!(["string", "string"]);
    assert_paths_invalid(&doc, &["website.0", "website.1"]);
    assert_eq!(
        report(&doc).get("website.1"),
        Some("expected an embedded document, got type string")
    );
}

#[test]
fn test_dynamic_website_wrong_type() {
    let mut doc = valid_doc();
    doc["website"] = json!(56);
    assert_paths_invalid(&doc, &["website"]);
    assert_eq!(report(&doc).get("website"), Some("expected type string, got type int"));
}

// =============================================================================
// Unions and Arrays
// =============================================================================

#[test]
fn test_union_rejects_other_types() {
    let mut doc = valid_doc();
    doc["linked_id"] = json!(123.45);
    assert_paths_invalid(&doc, &["linked_id"]);
    assert_eq!(
        report(&doc).get("linked_id"),
        Some("expected one of types [int, string], got type float")
    );
}

#[test]
fn test_array_element_of_incorrect_type() {
    let mut doc = valid_doc();
    doc["tags"].as_array_mut().unwrap().push(json!(55));
    assert_paths_invalid(&doc, &["tags.3"]);
    assert_eq!(report(&doc).get("tags.3"), Some("expected type string, got type int"));
}

#[test]
fn test_array_validator_rejects_empty_tags() {
    let mut doc = valid_doc();
    doc["tags"] = json!([]);
    assert_paths_invalid(&doc, &["tags"]);
}

#[test]
fn test_heterogeneous_editors() {
    let schema = blog_post_schema();
    let mut doc = valid_doc();

    doc["editors"] = json!([{ "first": "Jordan", "last": "Gansey" }]);
    assert!(schema.validate(&doc).is_ok());

    doc["editors"] = json!(["Jordan Gansey"]);
    assert!(schema.validate(&doc).is_ok());

    doc["editors"] = json!([{ "first": "Jordan", "last": "Gansey" }, "Jordan Gansey"]);
    assert!(schema.validate(&doc).is_ok());
}

#[test]
fn test_editor_of_wrong_type() {
    let mut doc = valid_doc();
    doc["editors"] = json!(["Jordan Gansey", 555]);
    assert_paths_invalid(&doc, &["editors.1"]);
    assert_eq!(
        report(&doc).get("editors.1"),
        Some("expected one of types [name, string], got type int")
    );
}

// =============================================================================
// Validators and Strictness
// =============================================================================

#[test]
fn test_validation_failure() {
    let mut doc = valid_doc();
    doc["category"] = json!("gardening");
    assert_paths_invalid(&doc, &["category"]);
    assert!(report(&doc).get("category").unwrap().contains("is not in the list"));
}

#[test]
fn test_disallows_fields_not_in_schema() {
    let mut doc = valid_doc();
    doc["something"] = json!("extra");
    assert_paths_invalid(&doc, &["something"]);
    assert_eq!(
        report(&doc).get("something"),
        Some("unexpected field not present in schema")
    );
}

#[test]
fn test_non_mapping_root() {
    let errors = report(&json!(["not", "a", "post"]));
    assert_eq!(errors.get(""), Some("expected an embedded document, got type array"));
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_apply_defaults_fills_post() {
    let schema = blog_post_schema();
    let mut doc = valid_doc();
    schema.apply_defaults_at(&mut doc, stub_now());

    assert_eq!(doc["likes"], 0);
    assert_eq!(doc["creation_date"], "2012-04-05T00:00:00+00:00");
    assert_eq!(doc["content"]["page_views"], 1);
    assert_eq!(doc["comments"][0]["votes"], 0);
    assert_eq!(doc["comments"][1]["votes"], 0);
    // Present values are never replaced
    assert_eq!(doc["tags"], json!(["cookies", "recipe", "yum"]));
    // Null is a present value
    assert_eq!(doc["meta"], Value::Null);

    assert!(schema.validate(&doc).is_ok());
}

#[test]
fn test_apply_defaults_fills_missing_tags() {
    let mut doc = valid_doc();
    doc.as_object_mut().unwrap().remove("tags");
    blog_post_schema().apply_defaults_at(&mut doc, stub_now());
    assert_eq!(doc["tags"], json!(["blog"]));
}

#[test]
fn test_apply_defaults_idempotent() {
    let schema = blog_post_schema();
    let mut once = valid_doc();
    schema.apply_defaults_at(&mut once, stub_now());
    let mut twice = once.clone();
    schema.apply_defaults_at(&mut twice, stub_now());
    assert_eq!(once, twice);
}

#[test]
fn test_apply_defaults_skips_dynamic_author() {
    let mut doc = valid_doc();
    doc["author"] = json!({});
    blog_post_schema().apply_defaults_at(&mut doc, stub_now());
    assert_eq!(doc["author"], json!({}));
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_shared_schema_across_threads() {
    let schema = blog_post_schema();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let schema = &schema;
            scope.spawn(move || {
                let mut doc = valid_doc();
                if i % 2 == 0 {
                    doc["linked_id"] = json!(1.5);
                    let errors = schema.errors(&doc).unwrap();
                    assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["linked_id"]);
                } else {
                    schema.apply_defaults_at(&mut doc, stub_now());
                    assert!(schema.validate(&doc).is_ok());
                }
            });
        }
    });
}
