//! Resolution driver.
//!
//! Runs phase 1 over the whole tree, then phase 2 over the whole tree. The
//! phases are never interleaved: phase 2 may follow a forward reference to
//! any declaration, which needs that declaration's scope already wired.

use crate::context::CheckerState;
use crate::environment::TypeEnvironment;
use crate::options::CheckerOptions;
use crate::state::{NodeStateTable, SymbolTypes};
use tracing::{Level, debug, span};
use tybscri_binder::{ScopeId, SymbolTable};
use tybscri_common::Diagnostic;
use tybscri_solver::{Type, format_type};
use tybscri_syntax::{NodeArena, NodeIndex};

/// Everything phase 2 produced for one tree.
#[derive(Debug)]
pub struct CheckResult {
    pub root: NodeIndex,
    pub root_type: Type,
    pub nodes: NodeStateTable,
    pub symbol_types: SymbolTypes,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn type_of(&self, node: NodeIndex) -> Option<&Type> {
        self.nodes.resolved_type(node)
    }
}

/// Wire scopes and resolve types for the tree rooted at `root`.
///
/// `scope` is the host's root scope (usually built with
/// [`SymbolTable::external_scope`]); `expected` is an optional type the root
/// must be assignable to, which also flows into a root lambda's parameters.
pub fn check_tree(
    arena: &NodeArena,
    env: &TypeEnvironment,
    symbols: &mut SymbolTable,
    root: NodeIndex,
    scope: ScopeId,
    expected: Option<&Type>,
    options: &CheckerOptions,
) -> CheckResult {
    let _span = span!(Level::DEBUG, "check_tree", file = %options.file_name).entered();
    let mut checker = CheckerState::new(arena, env, symbols, options);

    {
        let _phase = span!(Level::DEBUG, "setup_scopes").entered();
        checker.setup_scopes(root, scope);
    }

    let root_type = {
        let _phase = span!(Level::DEBUG, "resolve").entered();
        let root_type = checker.resolve_node(root, expected);
        if let Some(expected) = expected {
            checker.check_assignable(root, &root_type, expected);
        }
        // Every node is normally reached from its parent; anything left over
        // is resolved without an expected type.
        for node in arena.descendants(root) {
            if checker.ctx.nodes.resolved(node).is_none() {
                debug!(node = node.0, "resolving node not reached from its parent");
                checker.resolve_node(node, None);
            }
        }
        root_type
    };

    debug!(
        root_type = %format_type(&root_type),
        diagnostics = checker.ctx.diagnostics.len(),
        "checked tree"
    );

    let ctx = checker.ctx;
    CheckResult {
        root,
        root_type,
        nodes: ctx.nodes,
        symbol_types: ctx.symbol_types,
        diagnostics: ctx.diagnostics,
    }
}
