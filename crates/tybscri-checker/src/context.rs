//! Shared state for checking one syntax tree.

use crate::environment::TypeEnvironment;
use crate::options::CheckerOptions;
use crate::state::{NodeStateTable, SymbolTypes};
use rustc_hash::{FxHashMap, FxHashSet};
use tybscri_binder::{ScopeId, SymbolId, SymbolTable};
use tybscri_common::Diagnostic;
use tybscri_syntax::{NodeArena, NodeIndex};

pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub env: &'a TypeEnvironment,
    pub symbols: &'a mut SymbolTable,
    pub options: &'a CheckerOptions,

    pub nodes: NodeStateTable,
    pub symbol_types: SymbolTypes,
    pub diagnostics: Vec<Diagnostic>,

    /// Declaration node -> the symbol it declares.
    pub declared_symbols: FxHashMap<NodeIndex, SymbolId>,
    /// Narrowed symbols exposed by a guard (`is`) or conjunction (`and`).
    pub truth_symbols: FxHashMap<NodeIndex, Vec<SymbolId>>,
    /// Scope the right operand of an `and` is set up in.
    pub conjunction_scopes: FxHashMap<NodeIndex, ScopeId>,
    /// Declarations whose initializer is currently being resolved.
    pub in_progress: FxHashSet<NodeIndex>,

    pub depth: u32,
    pub depth_exceeded: bool,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        env: &'a TypeEnvironment,
        symbols: &'a mut SymbolTable,
        options: &'a CheckerOptions,
    ) -> Self {
        Self {
            arena,
            env,
            symbols,
            options,
            nodes: NodeStateTable::new(arena.len()),
            symbol_types: SymbolTypes::default(),
            diagnostics: Vec::new(),
            declared_symbols: FxHashMap::default(),
            truth_symbols: FxHashMap::default(),
            conjunction_scopes: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            depth: 0,
            depth_exceeded: false,
        }
    }
}

/// Checker over one tree. Phase implementations live in sibling modules as
/// further `impl` blocks.
pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        env: &'a TypeEnvironment,
        symbols: &'a mut SymbolTable,
        options: &'a CheckerOptions,
    ) -> Self {
        Self {
            ctx: CheckerContext::new(arena, env, symbols, options),
        }
    }
}
