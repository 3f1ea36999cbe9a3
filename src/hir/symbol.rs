//! Symbol model: the per-file declarations produced by the parser.
//!
//! The parser hands over [`SymbolDecl`] trees; loading them into a
//! [`SymbolIndex`](super::SymbolIndex) freezes them into shared, immutable
//! [`Symbol`]s with stable [`DefId`]s. Everything downstream treats symbols as
//! a read-only fact base.

use std::sync::Arc;

use smol_str::SmolStr;

use super::ids::{DefId, LocalDefId};
use crate::base::{FileId, Span};

// ============================================================================
// SYMBOL KIND
// ============================================================================

/// The kind of a declared symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Module,
    Interface,
    Package,
    Instance,
    /// A named scope inside a module (generate block, named begin/end, ...)
    Block,
    Port,
    Register,
    Wire,
    Parameter,
    Constant,
    Enum,
    Typedef,
    Assert,
    Function,
    Task,
    Other,
}

impl SymbolKind {
    /// Kinds that never produce navigable hierarchy nodes.
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            SymbolKind::Enum | SymbolKind::Typedef | SymbolKind::Assert | SymbolKind::Function
        )
    }

    /// Kinds an instance type reference may resolve to.
    pub fn is_definition(&self) -> bool {
        matches!(self, SymbolKind::Module | SymbolKind::Interface)
    }

    /// Get a display label for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::Interface => "interface",
            SymbolKind::Package => "package",
            SymbolKind::Instance => "instance",
            SymbolKind::Block => "block",
            SymbolKind::Port => "port",
            SymbolKind::Register => "register",
            SymbolKind::Wire => "wire",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Constant => "constant",
            SymbolKind::Enum => "enum",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Assert => "assert",
            SymbolKind::Function => "function",
            SymbolKind::Task => "task",
            SymbolKind::Other => "other",
        }
    }
}

// ============================================================================
// SYMBOL
// ============================================================================

/// Where a symbol is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: FileId,
    /// Range of the identifier only
    pub name_span: Span,
    /// Range of the full declaration
    pub full_span: Span,
}

/// An immutable, parsed declaration.
///
/// A symbol owns its children exclusively and never moves between parents.
/// Children keep declaration order, which is significant for display and for
/// first-match path lookup.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub id: DefId,
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Name of the type this symbol instantiates, if any (e.g. `fifo` in `fifo u_fifo (...)`)
    pub type_ref: Option<SmolStr>,
    pub children: Vec<Arc<Symbol>>,
    pub location: SourceLocation,
}

impl Symbol {
    /// Check if this symbol is a module or interface definition.
    pub fn is_definition(&self) -> bool {
        self.kind.is_definition()
    }

    /// Find the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Arc<Symbol>> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Visit this symbol and all of its descendants in pre-order.
    pub fn walk(&self, f: &mut impl FnMut(&Symbol)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

// ============================================================================
// DECLARATIONS (parser output)
// ============================================================================

/// A declaration as handed over by the parser, before it is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolDecl {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub type_ref: Option<SmolStr>,
    pub children: Vec<SymbolDecl>,
    pub name_span: Span,
    pub full_span: Span,
}

impl SymbolDecl {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_ref: None,
            children: Vec::new(),
            name_span: Span::default(),
            full_span: Span::default(),
        }
    }

    pub fn module(name: impl Into<SmolStr>) -> Self {
        Self::new(name, SymbolKind::Module)
    }

    pub fn interface(name: impl Into<SmolStr>) -> Self {
        Self::new(name, SymbolKind::Interface)
    }

    pub fn block(name: impl Into<SmolStr>) -> Self {
        Self::new(name, SymbolKind::Block)
    }

    /// An instance of `type_ref` named `name`.
    pub fn instance(name: impl Into<SmolStr>, type_ref: impl Into<SmolStr>) -> Self {
        Self {
            type_ref: Some(type_ref.into()),
            ..Self::new(name, SymbolKind::Instance)
        }
    }

    pub fn with_child(mut self, child: SymbolDecl) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SymbolDecl>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_spans(mut self, name_span: Span, full_span: Span) -> Self {
        self.name_span = name_span;
        self.full_span = full_span;
        self
    }

    /// Freeze into a shared symbol, assigning local ids in pre-order.
    pub(crate) fn freeze(self, file: FileId, next_local: &mut u32) -> Arc<Symbol> {
        let id = DefId::new(file, LocalDefId::new(*next_local));
        *next_local += 1;

        let children = self
            .children
            .into_iter()
            .map(|child| child.freeze(file, next_local))
            .collect();

        Arc::new(Symbol {
            id,
            name: self.name,
            kind: self.kind,
            type_ref: self.type_ref,
            children,
            location: SourceLocation {
                file,
                name_span: self.name_span,
                full_span: self.full_span,
            },
        })
    }
}
