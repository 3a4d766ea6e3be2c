//! Documentation item tree consumed by the generators.
//!
//! Items live in an arena owned by [`DocItemSet`]. Children are owned by
//! their parent through the arena; the parent link is a plain
//! [`DocItemId`] used only for walking up the hierarchy.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Index of an item inside its [`DocItemSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocItemId(usize);

/// Kind of API entity a documentation item describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocItemKind {
    Package,
    Namespace,
    Class,
    Interface,
    Method,
    Constructor,
    Function,
    Property,
    Enum,
    EnumMember,
}

/// Doc comment content as delivered by the API extraction stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocElement {
    Text {
        value: String,
    },
    Paragraph,
    Code {
        value: String,
    },
    WebLink {
        value: String,
        #[serde(rename = "targetUrl")]
        target_url: String,
    },
    ApiLink {
        value: String,
        #[serde(rename = "docId")]
        doc_id: String,
    },
}

/// Documentation attached to an API entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<DocElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<Vec<DocElement>>,
}

impl ApiItem {
    /// Creates an item with a single plain text summary.
    pub fn with_summary(text: impl Into<String>) -> Self {
        Self {
            summary: Some(vec![DocElement::Text { value: text.into() }]),
            remarks: None,
        }
    }
}

/// Node of the documentation tree.
#[derive(Debug, Clone)]
pub struct DocItem {
    name: String,
    kind: DocItemKind,
    parent: Option<DocItemId>,
    children: Vec<DocItemId>,
    api_item: ApiItem,
}

impl DocItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DocItemKind {
        self.kind
    }

    pub fn parent(&self) -> Option<DocItemId> {
        self.parent
    }

    pub fn children(&self) -> &[DocItemId] {
        &self.children
    }

    pub fn api_item(&self) -> &ApiItem {
        &self.api_item
    }
}

/// Arena holding every documentation item of a run.
///
/// Top level packages are tracked separately because generation starts
/// from each of them independently.
///
/// # Examples
///
/// ```
/// use refyaml::{ApiItem, DocItemKind, DocItemSet};
///
/// let mut set = DocItemSet::new();
/// let package = set.add_package("@scope/widgets", ApiItem::default());
/// let class = set.add_child(package, "Widget", DocItemKind::Class, ApiItem::default());
///
/// assert_eq!(set.get(class).parent(), Some(package));
/// assert_eq!(set.hierarchy(class), vec![package, class]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocItemSet {
    items: Vec<DocItem>,
    packages: Vec<DocItemId>,
}

impl DocItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top level package.
    pub fn add_package(&mut self, name: impl Into<String>, api_item: ApiItem) -> DocItemId {
        let id = self.push(name.into(), DocItemKind::Package, None, api_item);
        self.packages.push(id);
        id
    }

    /// Adds an item as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this set.
    pub fn add_child(
        &mut self,
        parent: DocItemId,
        name: impl Into<String>,
        kind: DocItemKind,
        api_item: ApiItem,
    ) -> DocItemId {
        let id = self.push(name.into(), kind, Some(parent), api_item);
        self.items[parent.0].children.push(id);
        id
    }

    fn push(
        &mut self,
        name: String,
        kind: DocItemKind,
        parent: Option<DocItemId>,
        api_item: ApiItem,
    ) -> DocItemId {
        let id = DocItemId(self.items.len());
        self.items.push(DocItem {
            name,
            kind,
            parent,
            children: Vec::new(),
            api_item,
        });
        id
    }

    /// Returns the item for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this set.
    pub fn get(&self, id: DocItemId) -> &DocItem {
        &self.items[id.0]
    }

    /// Top level packages in insertion order.
    pub fn packages(&self) -> &[DocItemId] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the chain of items from the root down to `id`, inclusive.
    pub fn hierarchy(&self, id: DocItemId) -> Vec<DocItemId> {
        let mut chain = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Parses a documentation model from its JSON hand-off format.
    ///
    /// The document holds a `packages` array; every entry is a nested item
    /// with `name`, `kind`, optional `summary`/`remarks` doc elements and
    /// optional `children`.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a top level entry is not
    /// a package.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: DocModelSpec =
            serde_json::from_str(json).context("Failed to parse documentation model JSON")?;

        let mut set = Self::new();
        for package in model.packages {
            if package.kind != DocItemKind::Package {
                bail!(
                    "Top level item '{}' must be a package, found {:?}",
                    package.name,
                    package.kind
                );
            }
            let id = set.add_package(package.name, package.api_item);
            set.add_children(id, package.children);
        }

        Ok(set)
    }

    /// Reads and parses a documentation model file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read documentation model: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid documentation model: {}", path.display()))
    }

    fn add_children(&mut self, parent: DocItemId, children: Vec<DocItemSpec>) {
        for child in children {
            let id = self.add_child(parent, child.name, child.kind, child.api_item);
            self.add_children(id, child.children);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocModelSpec {
    packages: Vec<DocItemSpec>,
}

#[derive(Debug, Deserialize)]
struct DocItemSpec {
    name: String,
    kind: DocItemKind,
    #[serde(flatten)]
    api_item: ApiItem,
    #[serde(default)]
    children: Vec<DocItemSpec>,
}
