//! Identifiers and output paths for documentation items.

use std::path::{Path, PathBuf};

use crate::model::{DocItemId, DocItemKind, DocItemSet};

/// File extension of generated reference files.
pub const YAML_FILE_EXTENSION: &str = "yml";

/// Strips the scope from a package name.
///
/// `@scope/widgets` becomes `widgets`; unscoped names are returned as is.
pub fn unscoped_package_name(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, unscoped)| unscoped)
}

/// Computes the globally unique identifier of an item.
///
/// Walks the hierarchy from the root package down to the item. The package
/// contributes its unscoped name; every other level appends `.` and its
/// own name. The result only depends on the item's position in the tree.
///
/// # Arguments
///
/// * `set`: Arena holding the item
/// * `id`: Item to name
///
/// # Returns
///
/// Identifier such as `widgets.Widget.render`
pub fn get_uid(set: &DocItemSet, id: DocItemId) -> String {
    let mut result = String::new();
    for current in set.hierarchy(id) {
        let item = set.get(current);
        match item.kind() {
            DocItemKind::Package => result.push_str(unscoped_package_name(item.name())),
            _ => {
                result.push('.');
                result.push_str(item.name());
            }
        }
    }
    result
}

/// Computes the output file path of an item.
///
/// Direct members of a package are placed in a folder named after the
/// package (`widgets/widget.yml`); deeper levels are joined with `.`. The
/// whole relative path is lower-cased.
///
/// # Arguments
///
/// * `set`: Arena holding the item
/// * `id`: Item owning the file
/// * `output_folder`: Root folder of the generated files
///
/// # Returns
///
/// Path of the `.yml` file under `output_folder`
pub fn get_output_file_path(set: &DocItemSet, id: DocItemId, output_folder: &Path) -> PathBuf {
    let mut result = String::new();
    for current in set.hierarchy(id) {
        let item = set.get(current);
        match item.kind() {
            DocItemKind::Package => result.push_str(unscoped_package_name(item.name())),
            _ => {
                let parent_is_package = item
                    .parent()
                    .is_some_and(|parent| set.get(parent).kind() == DocItemKind::Package);
                result.push(if parent_is_package { '/' } else { '.' });
                result.push_str(item.name());
            }
        }
    }
    output_folder.join(format!("{}.{}", result.to_lowercase(), YAML_FILE_EXTENSION))
}
