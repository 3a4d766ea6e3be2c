//! End-to-end tests for YAML generation.
//!
//! Tests model loading, the file split, and the on-disk output format.

mod common;

use anyhow::Result;
use refyaml::{
    ApiItem, DiskOutput, DocElement, DocItemKind, DocItemSet, GenerateError, MAX_LINE_WIDTH,
    MemoryOutput, SchemaError, YamlFile, YamlGenerator, YamlSchema, YamlTypeId,
};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn parse_file(contents: &str) -> Result<YamlFile> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Tests the on-disk layout and format of a package with one class.
#[test]
fn test_generate_files_to_disk() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let output_folder = dir.path().join("yaml");
    fs::create_dir_all(&output_folder)?;
    fs::write(output_folder.join("stale.yml"), "stale")?;
    let set = common::sample_set();

    // Act
    let report = YamlGenerator::new(&set).generate_files(&output_folder, &mut DiskOutput)?;

    // Assert
    assert!(report.is_success(), "Failures: {:?}", report.failures);
    assert!(
        !output_folder.join("stale.yml").exists(),
        "Old output should be deleted"
    );
    assert_eq!(
        report.files_written,
        vec![
            output_folder.join("widgets/widget.yml"),
            output_folder.join("widgets.yml"),
        ]
    );

    let class_contents = fs::read_to_string(output_folder.join("widgets/widget.yml"))?;
    assert!(class_contents.starts_with("### YamlMime:UniversalReference\r\n"));
    assert!(
        !class_contents.replace("\r\n", "").contains('\n'),
        "All line endings should be CR+LF"
    );

    let class_file = parse_file(&class_contents)?;
    let uids: Vec<&str> = class_file.items().iter().map(|item| item.uid.as_str()).collect();
    assert_eq!(
        uids,
        vec!["widgets.Widget", "widgets.Widget.render", "widgets.Widget.size"]
    );
    let root = class_file.root().expect("Class file should have a root");
    assert_eq!(root.type_id, YamlTypeId::Class);
    assert_eq!(root.summary.as_deref(), Some("A widget."));
    assert_eq!(
        root.children,
        Some(vec![
            "widgets.Widget.render".to_string(),
            "widgets.Widget.size".to_string()
        ])
    );
    assert_eq!(class_file.references(), None);
    Ok(())
}

/// Tests that a file-owning child is referenced, not embedded.
#[test]
fn test_package_file_references_class() -> Result<()> {
    // Arrange
    let set = common::sample_set();
    let mut output = MemoryOutput::new();

    // Act
    YamlGenerator::new(&set).generate_files(Path::new("yaml"), &mut output)?;

    // Assert
    let contents = output
        .get("yaml/widgets.yml")
        .expect("Package file should be written");
    let package_file = parse_file(contents)?;
    assert_eq!(package_file.items().len(), 1, "Class must not be embedded");
    let root = package_file.root().expect("Package file should have a root");
    assert_eq!(root.uid, "widgets");
    assert_eq!(root.name, "@acme/widgets");
    assert_eq!(root.type_id, YamlTypeId::Package);
    assert_eq!(root.children, None);

    let references = package_file
        .references()
        .expect("Package should reference its class");
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].uid, "widgets.Widget");
    assert_eq!(references[0].name, "Widget");
    Ok(())
}

/// Tests that an interface owns a file and is referenced by its package.
#[test]
fn test_package_file_references_interface() -> Result<()> {
    // Arrange
    let mut set = DocItemSet::new();
    let package = set.add_package("shapes", ApiItem::default());
    let interface = set.add_child(
        package,
        "Drawable",
        DocItemKind::Interface,
        ApiItem::with_summary("Something that draws."),
    );
    set.add_child(interface, "draw", DocItemKind::Method, ApiItem::default());
    let mut output = MemoryOutput::new();

    // Act
    let report = YamlGenerator::new(&set).generate_files(Path::new("yaml"), &mut output)?;

    // Assert
    assert_eq!(
        report.files_written,
        vec![
            PathBuf::from("yaml/shapes/drawable.yml"),
            PathBuf::from("yaml/shapes.yml"),
        ]
    );

    let interface_file = parse_file(
        output
            .get("yaml/shapes/drawable.yml")
            .expect("Interface file should be written"),
    )?;
    let root = interface_file.root().expect("Interface file should have a root");
    assert_eq!(root.type_id, YamlTypeId::Interface);
    assert_eq!(root.children, Some(vec!["shapes.Drawable.draw".to_string()]));
    assert_eq!(interface_file.items().len(), 2);

    let package_file = parse_file(output.get("yaml/shapes.yml").expect("Package file"))?;
    assert_eq!(package_file.items().len(), 1, "Interface must not be embedded");
    let references = package_file
        .references()
        .expect("Package should reference its interface");
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].uid, "shapes.Drawable");
    assert_eq!(references[0].name, "Drawable");
    Ok(())
}

/// Tests that long doc content is folded to the maximum line width.
#[test]
fn test_long_lines_are_folded() -> Result<()> {
    // Arrange
    let summary = vec!["word"; 40].join(" ");
    let long_word = "x".repeat(MAX_LINE_WIDTH + 10);
    let remarks = format!("{}\n\nSee {} for details.", summary, long_word);
    let mut set = DocItemSet::new();
    set.add_package(
        "pkg",
        ApiItem {
            summary: Some(vec![DocElement::Text {
                value: summary.clone(),
            }]),
            remarks: Some(vec![DocElement::Text {
                value: remarks.clone(),
            }]),
        },
    );
    let mut output = MemoryOutput::new();

    // Act
    YamlGenerator::new(&set).generate_files(Path::new("yaml"), &mut output)?;

    // Assert
    let contents = output.get("yaml/pkg.yml").expect("Package file should be written");
    for line in contents.split("\r\n") {
        assert!(
            line.chars().count() <= MAX_LINE_WIDTH || !line.trim().contains(' '),
            "Only single long words may exceed the width: {:?}",
            line
        );
    }
    let root = parse_file(contents)?
        .root()
        .cloned()
        .expect("Package file should have a root");
    assert_eq!(root.summary, Some(summary));
    assert_eq!(root.remarks, Some(remarks));
    Ok(())
}

/// Tests that loading the JSON model gives the same output as the builder.
#[test]
fn test_json_model_matches_builder() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let model_path = dir.path().join("model.json");
    fs::write(&model_path, common::SAMPLE_MODEL_JSON)?;
    let from_json = DocItemSet::from_json_file(&model_path)?;
    let from_builder = common::sample_set();
    let mut json_output = MemoryOutput::new();
    let mut builder_output = MemoryOutput::new();

    // Act
    YamlGenerator::new(&from_json).generate_files(Path::new("yaml"), &mut json_output)?;
    YamlGenerator::new(&from_builder).generate_files(Path::new("yaml"), &mut builder_output)?;

    // Assert
    assert_eq!(json_output.files(), builder_output.files());
    Ok(())
}

/// Tests that generating twice gives identical bytes.
#[test]
fn test_generation_is_deterministic() -> Result<()> {
    // Arrange
    let set = common::sample_set();
    let generator = YamlGenerator::new(&set);
    let mut first = MemoryOutput::new();
    let mut second = MemoryOutput::new();

    // Act
    generator.generate_files(Path::new("yaml"), &mut first)?;
    generator.generate_files(Path::new("yaml"), &mut second)?;

    // Assert
    assert_eq!(first.files(), second.files());
    Ok(())
}

/// Tests that items without a YAML type are left out with their subtree.
#[test]
fn test_unmapped_kinds_are_skipped() -> Result<()> {
    // Arrange
    let mut set = DocItemSet::new();
    let package = set.add_package("pkg", ApiItem::default());
    let shape = set.add_child(package, "Shape", DocItemKind::Enum, ApiItem::default());
    set.add_child(shape, "Circle", DocItemKind::EnumMember, ApiItem::default());
    set.add_child(package, "draw", DocItemKind::Function, ApiItem::default());
    let mut output = MemoryOutput::new();

    // Act
    let report = YamlGenerator::new(&set).generate_files(Path::new("yaml"), &mut output)?;

    // Assert
    assert_eq!(report.files_written, vec![PathBuf::from("yaml/pkg.yml")]);
    let package_file = parse_file(output.get("yaml/pkg.yml").expect("Package file"))?;
    let uids: Vec<&str> = package_file
        .items()
        .iter()
        .map(|item| item.uid.as_str())
        .collect();
    assert_eq!(uids, vec!["pkg", "pkg.draw"]);
    Ok(())
}

/// Tests that the configured language tag reaches every item.
#[test]
fn test_custom_langs() -> Result<()> {
    // Arrange
    let set = common::sample_set();
    let mut output = MemoryOutput::new();

    // Act
    YamlGenerator::new(&set)
        .with_langs(vec!["javaScript".to_string()])
        .generate_files(Path::new("yaml"), &mut output)?;

    // Assert
    for contents in output.files().values() {
        for item in parse_file(contents)?.items() {
            assert_eq!(item.langs, vec!["javaScript".to_string()]);
        }
    }
    Ok(())
}

/// Rejects files whose root is named `broken`.
struct RejectBroken;

impl YamlSchema for RejectBroken {
    fn validate(&self, document: &Value) -> Result<(), SchemaError> {
        if document["items"][0]["name"].as_str() == Some("broken") {
            return Err(SchemaError {
                location: "$.items[0].name".to_string(),
                message: "name is reserved".to_string(),
            });
        }
        Ok(())
    }
}

/// Tests that one failing package does not stop its siblings.
#[test]
fn test_failing_package_does_not_stop_siblings() -> Result<()> {
    // Arrange
    let mut set = DocItemSet::new();
    set.add_package("broken", ApiItem::default());
    set.add_package("healthy", ApiItem::default());
    let mut output = MemoryOutput::new();

    // Act
    let report = YamlGenerator::new(&set)
        .with_schema(RejectBroken)
        .generate_files(Path::new("yaml"), &mut output)?;

    // Assert
    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].package, "broken");
    assert!(matches!(
        report.failures[0].error,
        GenerateError::SchemaViolation { .. }
    ));
    assert!(output.get("yaml/broken.yml").is_none());
    assert!(output.get("yaml/healthy.yml").is_some());
    Ok(())
}

/// Tests that an empty model only clears the output folder.
#[test]
fn test_empty_model_writes_nothing() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let output_folder = dir.path().join("yaml");
    let set = DocItemSet::from_json_str(r#"{ "packages": [] }"#)?;

    // Act
    let report = YamlGenerator::new(&set).generate_files(&output_folder, &mut DiskOutput)?;

    // Assert
    assert!(report.files_written.is_empty());
    assert!(output_folder.is_dir(), "Output folder should be created");
    Ok(())
}
