//! Completions.
//!
//! Completion item types follow the editor protocol's shape; providers fill
//! them from the project indexes.

use drex_index::IndexKey;
use drex_syntax::patterns::{self, Pattern};
use drex_syntax::{NodeArena, NodeIndex, NodeKind};
use drex_types::TypeContext;
use serde::Serialize;
use tracing::trace;

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionItemKind {
    /// A plain string value, such as a theme hook name
    Text,
}

/// A completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// The label to display in the completion list
    pub label: String,
    pub kind: CompletionItemKind,
    /// Optional detail text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CompletionItem {
    /// Create a new completion item with only the required fields.
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Offers theme hook names inside `'#theme' => '...'`.
#[derive(Debug, Default)]
pub struct ThemeCompletionProvider;

impl ThemeCompletionProvider {
    pub fn new() -> Self {
        Self
    }

    /// Completions for the node at the cursor.
    ///
    /// The nearest enclosing array element must be keyed by the string
    /// literal `#theme`; otherwise nothing is offered.
    pub fn completions(
        &self,
        ctx: &TypeContext<'_>,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Vec<CompletionItem> {
        if !ctx.project.is_enabled() {
            return Vec::new();
        }
        let Some(element) = arena.find_ancestor(node, NodeKind::ArrayHashElement) else {
            return Vec::new();
        };
        if !patterns::theme_hash_element().accepts(arena, element) {
            return Vec::new();
        }

        let mut themes: Vec<String> = ctx
            .indexes
            .keys
            .all_keys(IndexKey::THEME, ctx.project)
            .into_iter()
            .collect();
        themes.sort_unstable();
        trace!(count = themes.len(), "theme completions");

        themes
            .into_iter()
            .map(|theme| {
                CompletionItem::new(theme, CompletionItemKind::Text).with_detail("theme hook")
            })
            .collect()
    }
}
