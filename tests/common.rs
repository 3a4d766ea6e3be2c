//! Shared test utilities for integration tests.
//!
//! Provides sample documentation models used across multiple test files.

#![allow(dead_code)]

use refyaml::{ApiItem, DocItemKind, DocItemSet};

/// JSON form of the model built by [`sample_set`].
pub const SAMPLE_MODEL_JSON: &str = r#"{
    "packages": [{
        "name": "@acme/widgets",
        "kind": "package",
        "summary": [{ "kind": "text", "value": "Widget toolkit." }],
        "children": [{
            "name": "Widget",
            "kind": "class",
            "summary": [{ "kind": "text", "value": "A widget." }],
            "children": [
                {
                    "name": "render",
                    "kind": "method",
                    "summary": [{ "kind": "text", "value": "Renders the widget." }]
                },
                {
                    "name": "size",
                    "kind": "property",
                    "summary": [{ "kind": "text", "value": "Widget size." }]
                }
            ]
        }]
    }]
}"#;

/// Builds a package with one class holding a method and a property.
///
/// # Returns
///
/// Model equivalent to [`SAMPLE_MODEL_JSON`]
pub fn sample_set() -> DocItemSet {
    let mut set = DocItemSet::new();
    let package = set.add_package("@acme/widgets", ApiItem::with_summary("Widget toolkit."));
    let class = set.add_child(
        package,
        "Widget",
        DocItemKind::Class,
        ApiItem::with_summary("A widget."),
    );
    set.add_child(
        class,
        "render",
        DocItemKind::Method,
        ApiItem::with_summary("Renders the widget."),
    );
    set.add_child(
        class,
        "size",
        DocItemKind::Property,
        ApiItem::with_summary("Widget size."),
    );
    set
}
