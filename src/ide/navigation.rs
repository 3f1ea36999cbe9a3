//! Navigation targets: from a hierarchy node back to source.

use smol_str::SmolStr;

use crate::base::{FileId, Span};
use crate::hir::{ScopeNode, Symbol, SymbolKind};

/// A source location to jump to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    /// The file containing the target.
    pub file: FileId,
    /// The symbol name.
    pub name: SmolStr,
    /// The symbol kind.
    pub kind: SymbolKind,
    /// Range of the identifier (selection range).
    pub name_span: Span,
    /// Range of the whole declaration.
    pub full_span: Span,
}

impl From<&Symbol> for NavigationTarget {
    fn from(symbol: &Symbol) -> Self {
        Self {
            file: symbol.location.file,
            name: symbol.name.clone(),
            kind: symbol.kind,
            name_span: symbol.location.name_span,
            full_span: symbol.location.full_span,
        }
    }
}

/// Where the node's instance (or block, or top module) is declared.
pub fn instance_target(node: &ScopeNode) -> NavigationTarget {
    NavigationTarget::from(node.instance().as_ref())
}

/// Where the node's definition is declared.
///
/// `None` for unresolved instances and leaves.
pub fn definition_target(node: &ScopeNode) -> Option<NavigationTarget> {
    node.definition().map(|d| NavigationTarget::from(d.as_ref()))
}
