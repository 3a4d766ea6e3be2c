//! Markdown rendering for documentation markup.
//!
//! This module converts [`MarkupElement`](crate::MarkupElement) sequences
//! into Markdown text. Output is byte-stable: the same input always
//! produces the same string, which is what golden fixtures compare against.

mod escape;
mod renderer;
mod writer;

pub use escape::{escape_table_cell, escape_text};
pub use renderer::{DocIdResolver, MarkdownRenderer, RenderOptions};
