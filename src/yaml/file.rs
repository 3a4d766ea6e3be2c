//! In-memory shape of a UniversalReference YAML file.

use serde::{Deserialize, Serialize};

use crate::model::DocItemKind;

/// First line of every generated file.
pub const YAML_MIME_HEADER: &str = "### YamlMime:UniversalReference";

/// Item type vocabulary of the UniversalReference format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YamlTypeId {
    Package,
    Class,
    Interface,
    Method,
    Constructor,
    Function,
    Property,
}

impl YamlTypeId {
    /// Every type id, in declaration order.
    pub const ALL: [YamlTypeId; 7] = [
        YamlTypeId::Package,
        YamlTypeId::Class,
        YamlTypeId::Interface,
        YamlTypeId::Method,
        YamlTypeId::Constructor,
        YamlTypeId::Function,
        YamlTypeId::Property,
    ];

    /// Maps a documentation item kind onto the vocabulary.
    ///
    /// Kinds without a counterpart return `None`; such items are left out
    /// of the generated output together with their subtree.
    pub fn from_kind(kind: DocItemKind) -> Option<Self> {
        match kind {
            DocItemKind::Package => Some(Self::Package),
            DocItemKind::Class => Some(Self::Class),
            DocItemKind::Interface => Some(Self::Interface),
            DocItemKind::Method => Some(Self::Method),
            DocItemKind::Constructor => Some(Self::Constructor),
            DocItemKind::Function => Some(Self::Function),
            DocItemKind::Property => Some(Self::Property),
            DocItemKind::Namespace | DocItemKind::Enum | DocItemKind::EnumMember => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Function => "function",
            Self::Property => "property",
        }
    }

    /// Whether items of this type live inside their ancestor's file.
    ///
    /// Packages, classes and interfaces always own a file of their own.
    pub fn is_embedded(self) -> bool {
        !matches!(self, Self::Package | Self::Class | Self::Interface)
    }
}

/// One documented entity inside a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlItem {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub name: String,
    pub full_name: String,
    pub langs: Vec<String>,
    #[serde(rename = "type")]
    pub type_id: YamlTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

/// Pointer to an item that owns a different file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YamlReference {
    pub uid: String,
    pub name: String,
}

/// Contents of one generated file.
///
/// The first item is the file owner; embedded descendants follow in
/// visiting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YamlFile {
    items: Vec<YamlItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    references: Option<Vec<YamlReference>>,
}

impl YamlFile {
    /// Starts a file owned by `root`.
    pub fn new(root: YamlItem) -> Self {
        Self {
            items: vec![root],
            references: None,
        }
    }

    /// Item owning the file.
    pub fn root(&self) -> Option<&YamlItem> {
        self.items.first()
    }

    pub fn items(&self) -> &[YamlItem] {
        &self.items
    }

    /// Cross-file references, if any were recorded.
    pub fn references(&self) -> Option<&[YamlReference]> {
        self.references.as_deref()
    }

    /// Adds an embedded descendant after the existing items.
    pub fn push_embedded(&mut self, item: YamlItem) {
        self.items.push(item);
    }

    /// Records `uid` in the root item's `children`.
    pub fn push_child_uid(&mut self, uid: String) {
        if let Some(root) = self.items.first_mut() {
            root.children.get_or_insert_with(Vec::new).push(uid);
        }
    }

    pub fn push_reference(&mut self, reference: YamlReference) {
        self.references
            .get_or_insert_with(Vec::new)
            .push(reference);
    }
}

/// Rewrites every line ending as CR+LF.
///
/// Existing CR+LF pairs are kept as single line endings.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}
