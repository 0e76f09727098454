//! Compiler facade.
//!
//! `Compiler` owns the host's type environment and options and runs the
//! three phases over one tree at a time. Each call gets its own node state;
//! nothing produced for one tree is reused for another.

use tracing::{Level, info, span};
use tybscri_binder::{ScopeId, SymbolTable};
use tybscri_checker::{CheckerOptions, TypeEnvironment, check_tree};
use tybscri_common::Diagnostic;
use tybscri_emitter::{ExecNode, GenerateError, generate};
use tybscri_solver::Type;
use tybscri_syntax::{NodeArena, NodeIndex};

/// Outcome of compiling one tree.
#[derive(Debug)]
pub struct Compilation {
    pub diagnostics: Vec<Diagnostic>,
    pub root_type: Type,
    /// Only produced when no diagnostics were reported.
    pub executable: Option<ExecNode>,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    env: TypeEnvironment,
    options: CheckerOptions,
}

impl Compiler {
    pub fn new(env: TypeEnvironment) -> Self {
        Self {
            env,
            options: CheckerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CheckerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn env(&self) -> &TypeEnvironment {
        &self.env
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Run all phases over `root` with `scope` as its root scope.
    ///
    /// Script errors come back as diagnostics in the `Compilation`; `Err`
    /// is reserved for generation failures, which indicate a resolver bug.
    pub fn compile(
        &self,
        arena: &NodeArena,
        root: NodeIndex,
        symbols: &mut SymbolTable,
        scope: ScopeId,
        expected: Option<&Type>,
    ) -> Result<Compilation, GenerateError> {
        compile_tree(
            arena,
            root,
            &self.env,
            symbols,
            scope,
            expected,
            &self.options,
        )
    }
}

/// Compile `root` with `externals` as const host values in its root scope.
pub fn compile_expression<'n>(
    arena: &NodeArena,
    root: NodeIndex,
    env: &TypeEnvironment,
    externals: impl IntoIterator<Item = (&'n str, Type)>,
    expected: Option<&Type>,
    options: &CheckerOptions,
) -> Result<Compilation, GenerateError> {
    let mut symbols = SymbolTable::new();
    let scope = symbols.external_scope(externals);
    compile_tree(arena, root, env, &mut symbols, scope, expected, options)
}

fn compile_tree(
    arena: &NodeArena,
    root: NodeIndex,
    env: &TypeEnvironment,
    symbols: &mut SymbolTable,
    scope: ScopeId,
    expected: Option<&Type>,
    options: &CheckerOptions,
) -> Result<Compilation, GenerateError> {
    let _span = span!(Level::DEBUG, "compile", file = %options.file_name).entered();

    let mut result = check_tree(arena, env, symbols, root, scope, expected, options);

    let executable = if result.has_errors() {
        info!(
            diagnostics = result.diagnostics.len(),
            "skipping generation for tree with errors"
        );
        None
    } else {
        Some(generate(arena, env, symbols, &mut result)?)
    };

    Ok(Compilation {
        diagnostics: result.diagnostics,
        root_type: result.root_type,
        executable,
    })
}
