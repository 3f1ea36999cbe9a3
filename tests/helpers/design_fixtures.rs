//! Symbol-table fixtures, written the way a parser would hand them over.

use std::sync::Arc;

use hdlhier::Span;
use hdlhier::hir::{Symbol, SymbolDecl, SymbolIndex, SymbolKind};

pub fn port(name: &str) -> SymbolDecl {
    SymbolDecl::new(name, SymbolKind::Port)
}

pub fn register(name: &str) -> SymbolDecl {
    SymbolDecl::new(name, SymbolKind::Register)
}

/// Get a module definition that must exist.
pub fn module(index: &SymbolIndex, name: &str) -> Arc<Symbol> {
    index
        .lookup_module(name)
        .cloned()
        .unwrap_or_else(|| panic!("Expected module '{}' in index", name))
}

/// `Top { u1: Leaf, blk { u2: Leaf } }` with `Leaf { d, q }` in another file.
pub fn two_leaf_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/top.sv",
        vec![SymbolDecl::module("Top").with_children([
            SymbolDecl::instance("u1", "Leaf"),
            SymbolDecl::block("blk").with_child(SymbolDecl::instance("u2", "Leaf")),
        ])],
    );
    index.add_file(
        "rtl/leaf.sv",
        vec![SymbolDecl::module("Leaf").with_children([port("d"), register("q")])],
    );
    index
}

/// `Top` mixing navigable children with kinds that never become nodes.
pub fn mixed_kinds_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/mixed.sv",
        vec![
            SymbolDecl::module("Top").with_children([
                SymbolDecl::new("state_e", SymbolKind::Enum),
                port("clk"),
                SymbolDecl::new("word_t", SymbolKind::Typedef),
                SymbolDecl::new("WIDTH", SymbolKind::Parameter),
                SymbolDecl::new("p_valid", SymbolKind::Assert),
                SymbolDecl::new("parity", SymbolKind::Function),
                SymbolDecl::new("DEPTH", SymbolKind::Constant),
                SymbolDecl::new("drive", SymbolKind::Task),
                SymbolDecl::instance("core", "Core"),
                SymbolDecl::new("bus", SymbolKind::Wire),
            ]),
            SymbolDecl::module("Core").with_children([
                SymbolDecl::new("op_e", SymbolKind::Enum),
                register("acc"),
            ]),
        ],
    );
    index
}

/// `Top { bb: BlackBox, u_ok: Leaf }` where `BlackBox` is declared nowhere.
pub fn black_box_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/top.sv",
        vec![
            SymbolDecl::module("Top").with_children([
                SymbolDecl::instance("bb", "BlackBox"),
                SymbolDecl::instance("u_ok", "Leaf"),
            ]),
            SymbolDecl::module("Leaf").with_child(port("d")),
        ],
    );
    index
}

/// `M { p, self_u: M }`: direct self instantiation.
pub fn self_instantiating_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/m.sv",
        vec![SymbolDecl::module("M").with_children([
            port("p"),
            SymbolDecl::instance("self_u", "M"),
        ])],
    );
    index
}

/// `A { b: B }`, `B { a: A }` in separate files: mutual instantiation.
pub fn mutually_recursive_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/a.sv",
        vec![SymbolDecl::module("A").with_child(SymbolDecl::instance("b", "B"))],
    );
    index.add_file(
        "rtl/b.sv",
        vec![SymbolDecl::module("B").with_child(SymbolDecl::instance("a", "A"))],
    );
    index
}

/// `m0 { u: m1 }`, `m1 { u: m2 }`, ... down to a childless `m{depth}`.
pub fn deep_chain_design(depth: usize) -> SymbolIndex {
    let mut index = SymbolIndex::new();
    let decls = (0..=depth)
        .map(|i| {
            let module = SymbolDecl::module(format!("m{}", i));
            if i < depth {
                module.with_child(SymbolDecl::instance("u", format!("m{}", i + 1)))
            } else {
                module
            }
        })
        .collect();
    index.add_file("rtl/chain.sv", decls);
    index
}

/// `Top { dup: First, dup: Second }`: duplicate sibling names.
pub fn duplicate_names_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/dup.sv",
        vec![
            SymbolDecl::module("Top").with_children([
                SymbolDecl::instance("dup", "First"),
                SymbolDecl::instance("dup", "Second"),
            ]),
            SymbolDecl::module("First"),
            SymbolDecl::module("Second"),
        ],
    );
    index
}

/// `soc { cpu: Cpu, mem: Sram, dma { ch: Sram } }` with source spans.
pub fn spanned_design() -> SymbolIndex {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/soc.sv",
        vec![
            SymbolDecl::module("soc")
                .with_spans(Span::from_coords(0, 7, 0, 10), Span::from_coords(0, 0, 9, 9))
                .with_children([
                    SymbolDecl::instance("cpu", "Cpu")
                        .with_spans(Span::from_coords(2, 8, 2, 11), Span::from_coords(2, 4, 2, 20)),
                    SymbolDecl::instance("mem", "Sram")
                        .with_spans(Span::from_coords(3, 9, 3, 12), Span::from_coords(3, 4, 3, 30)),
                    SymbolDecl::block("dma")
                        .with_spans(Span::from_coords(4, 10, 4, 13), Span::from_coords(4, 4, 8, 7))
                        .with_child(
                            SymbolDecl::instance("ch", "Sram").with_spans(
                                Span::from_coords(5, 13, 5, 15),
                                Span::from_coords(5, 8, 5, 25),
                            ),
                        ),
                ]),
        ],
    );
    index.add_file(
        "rtl/sram.sv",
        vec![
            SymbolDecl::module("Sram")
                .with_spans(Span::from_coords(1, 7, 1, 11), Span::from_coords(1, 0, 20, 9))
                .with_child(register("mem_q")),
        ],
    );
    index
}
