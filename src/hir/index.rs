//! Workspace symbol index: every loaded file's symbol table.
//!
//! This is the in-memory implementation of the workspace lookup service:
//! the parser loads per-file declarations here, and the definition resolver
//! asks it for module definitions by name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::resolve::ModuleLookup;
use super::symbol::{Symbol, SymbolDecl, SymbolKind};
use crate::base::FileId;

/// The frozen symbol table of one file.
#[derive(Clone, Debug)]
struct FileSymbols {
    path: PathBuf,
    symbols: Vec<Arc<Symbol>>,
}

/// An index of all symbols across multiple files.
///
/// File order is load order and is the lookup precedence when several files
/// declare a module with the same name. Reloading a path keeps its `FileId`
/// and its position.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// Path → FileId, stable across reloads.
    file_ids: FxHashMap<PathBuf, FileId>,
    /// FileId → symbol table, in precedence order.
    files: IndexMap<FileId, FileSymbols>,
    /// Module/interface name → definitions (any file, any order).
    definitions: FxHashMap<SmolStr, Vec<Arc<Symbol>>>,
    /// Next FileId to assign.
    next_file: u32,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or reload) the declarations of a file.
    ///
    /// Returns the file's id; a path that was loaded before keeps its id.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, decls: Vec<SymbolDecl>) -> FileId {
        let path = path.into();
        let file = match self.file_ids.get(&path) {
            Some(&file) => {
                self.unindex_definitions(file);
                file
            }
            None => {
                let file = FileId::new(self.next_file);
                self.next_file += 1;
                self.file_ids.insert(path.clone(), file);
                file
            }
        };

        let mut next_local = 0;
        let symbols: Vec<Arc<Symbol>> = decls
            .into_iter()
            .map(|decl| decl.freeze(file, &mut next_local))
            .collect();

        for symbol in &symbols {
            collect_definitions(symbol, &mut self.definitions);
        }

        tracing::trace!(
            "[INDEX] Loaded {} ({}): {} symbols",
            path.display(),
            file,
            next_local
        );

        // Inserting an existing key keeps its position in the map.
        self.files.insert(file, FileSymbols { path, symbols });
        file
    }

    /// Remove all symbols from a file.
    pub fn remove_file(&mut self, path: &Path) -> Option<FileId> {
        let file = self.file_ids.remove(path)?;
        self.unindex_definitions(file);
        self.files.shift_remove(&file);
        Some(file)
    }

    fn unindex_definitions(&mut self, file: FileId) {
        self.definitions.retain(|_, defs| {
            defs.retain(|d| d.location.file != file);
            !defs.is_empty()
        });
    }

    /// Get the FileId for a path, if it was loaded.
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.file_ids.get(path).copied()
    }

    /// Get the path for a FileId.
    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.files.get(&file).map(|f| f.path.as_path())
    }

    /// Get the top-level symbols of a file, in declaration order.
    pub fn symbols_in_file(&self, file: FileId) -> &[Arc<Symbol>] {
        self.files
            .get(&file)
            .map(|f| f.symbols.as_slice())
            .unwrap_or_default()
    }

    /// Look up a module or interface definition by name.
    ///
    /// When several files declare the name, the earliest loaded file wins,
    /// then the earliest declaration within it.
    pub fn lookup_module(&self, name: &str) -> Option<&Arc<Symbol>> {
        self.definitions.get(name)?.iter().min_by_key(|d| {
            (
                self.files.get_index_of(&d.location.file).unwrap_or(usize::MAX),
                d.id.local,
            )
        })
    }

    /// All module and interface definitions, in file then declaration order.
    pub fn definitions(&self) -> Vec<&Arc<Symbol>> {
        let mut defs = Vec::new();
        for file in self.files.values() {
            for symbol in &file.symbols {
                push_definitions(symbol, &mut defs);
            }
        }
        defs
    }

    /// Module definitions that no loaded instance refers to by type.
    ///
    /// These are the natural candidates when asking the user for a top module.
    pub fn top_level_candidates(&self) -> Vec<&Arc<Symbol>> {
        let mut instantiated: FxHashSet<&str> = FxHashSet::default();
        for file in self.files.values() {
            for symbol in &file.symbols {
                collect_type_refs(symbol, &mut instantiated);
            }
        }

        self.definitions()
            .into_iter()
            .filter(|d| d.kind == SymbolKind::Module && !instantiated.contains(d.name.as_str()))
            .collect()
    }

    /// Get number of files indexed.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if the index has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn collect_definitions(symbol: &Arc<Symbol>, out: &mut FxHashMap<SmolStr, Vec<Arc<Symbol>>>) {
    if symbol.is_definition() {
        out.entry(symbol.name.clone())
            .or_default()
            .push(Arc::clone(symbol));
    }
    for child in &symbol.children {
        collect_definitions(child, out);
    }
}

fn push_definitions<'a>(symbol: &'a Arc<Symbol>, out: &mut Vec<&'a Arc<Symbol>>) {
    if symbol.is_definition() {
        out.push(symbol);
    }
    for child in &symbol.children {
        push_definitions(child, out);
    }
}

fn collect_type_refs<'a>(symbol: &'a Symbol, out: &mut FxHashSet<&'a str>) {
    if symbol.kind == SymbolKind::Instance {
        if let Some(type_ref) = &symbol.type_ref {
            out.insert(type_ref.as_str());
        }
    }
    for child in &symbol.children {
        collect_type_refs(child, out);
    }
}

impl ModuleLookup for SymbolIndex {
    async fn find_module_symbol(&self, name: &str) -> Option<Arc<Symbol>> {
        self.lookup_module(name).cloned()
    }
}
