//! Phase 3: executable-form generation.
//!
//! Walks a tree that phase 2 fully resolved and builds the `ExecNode` for
//! each node from its children's generated forms and its recorded binding.
//! No assignability is re-checked here.

use crate::error::GenerateError;
use crate::ir::{ConstantValue, ExecKind, ExecNode, ExecParameter};
use tracing::{Level, debug, span, trace};
use tybscri_binder::{SymbolId, SymbolKind, SymbolTable};
use tybscri_checker::{CheckResult, NodeBinding, NodeState, ResolvedNode, TypeEnvironment};
use tybscri_common::SourceSpan;
use tybscri_solver::{MemberDef, Name, Type, find_members_by_name};
use tybscri_syntax::{LambdaParameter, LiteralToken, NodeArena, NodeIndex, NodeKind};

/// Generate the executable form of the tree `result` was checked from.
pub fn generate(
    arena: &NodeArena,
    env: &TypeEnvironment,
    symbols: &SymbolTable,
    result: &mut CheckResult,
) -> Result<ExecNode, GenerateError> {
    let _span = span!(Level::DEBUG, "generate").entered();
    let root = result.root;
    let executable = Generator::new(arena, env, symbols, result).generate(root)?;
    debug!(nodes = executable.size(), "generated executable form");
    Ok(executable)
}

pub struct Generator<'a> {
    arena: &'a NodeArena,
    env: &'a TypeEnvironment,
    symbols: &'a SymbolTable,
    result: &'a mut CheckResult,
}

impl<'a> Generator<'a> {
    pub fn new(
        arena: &'a NodeArena,
        env: &'a TypeEnvironment,
        symbols: &'a SymbolTable,
        result: &'a mut CheckResult,
    ) -> Self {
        Self {
            arena,
            env,
            symbols,
            result,
        }
    }

    /// Generate `idx` and everything below it, moving each node to
    /// `Generated`.
    pub fn generate(&mut self, idx: NodeIndex) -> Result<ExecNode, GenerateError> {
        let resolved = self.resolved(idx)?;
        let arena = self.arena;
        let node = arena.get(idx).ok_or(GenerateError::PhaseOrder {
            node: idx.0,
            state: "Missing",
        })?;
        let missing = |binding: &'static str| GenerateError::MissingBinding {
            node: idx.0,
            kind: node.kind_name(),
            binding,
        };

        let kind = match (&node.kind, &resolved.binding) {
            (NodeKind::Identifier { .. }, NodeBinding::Symbol(symbol)) => {
                self.read_symbol(*symbol, node.span)?
            }
            (NodeKind::Identifier { .. }, _) => return Err(missing("Symbol")),

            (NodeKind::Literal(token), _) => ExecKind::Constant(constant(token)),

            (NodeKind::Collection { elements }, _) => {
                ExecKind::Collection(self.generate_all(elements)?)
            }

            (
                NodeKind::If {
                    condition,
                    then_branch,
                    else_branch,
                },
                _,
            ) => {
                let condition = self.generate(*condition)?;
                let then_branch = self.generate(*then_branch)?;
                let else_branch = match else_branch {
                    Some(else_branch) => self.generate(*else_branch)?,
                    None => ExecNode::new(
                        ExecKind::Constant(ConstantValue::Null),
                        self.env.well_known.null.clone(),
                        node.span,
                    ),
                };
                ExecKind::Conditional {
                    condition: Box::new(condition),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                }
            }

            (
                NodeKind::Invocation {
                    callee,
                    arguments,
                    trailing_lambda,
                },
                NodeBinding::Call { signature },
            ) => {
                let callee = self.generate(*callee)?;
                let mut generated = self.generate_all(arguments)?;
                if let Some(lambda) = trailing_lambda {
                    generated.push(self.generate(*lambda)?);
                }
                ExecKind::Invoke {
                    callee: Box::new(callee),
                    arguments: generated,
                    signature: signature.clone(),
                }
            }
            (NodeKind::Invocation { .. }, _) => return Err(missing("Call")),

            (NodeKind::MemberAccess { object, member }, NodeBinding::Member(found)) => {
                let object = self.generate(*object)?;
                return self.member_read(idx, object, member, found, &resolved.ty, node.span);
            }
            (NodeKind::MemberAccess { .. }, _) => return Err(missing("Member")),

            (NodeKind::Lambda { parameters, body }, NodeBinding::Lambda { parameters: bound }) => {
                self.mark_annotations(parameters)?;
                let declared = resolved
                    .ty
                    .as_func()
                    .map(|func| func.parameters.clone())
                    .unwrap_or_default();
                let parameters = bound
                    .iter()
                    .zip(declared)
                    .map(|(&symbol, param)| ExecParameter {
                        symbol,
                        name: param.name,
                        ty: param.ty,
                    })
                    .collect();
                ExecKind::Lambda {
                    parameters,
                    body: Box::new(self.generate(*body)?),
                }
            }
            (NodeKind::Lambda { .. }, _) => return Err(missing("Lambda")),

            (NodeKind::Is { operand, target }, NodeBinding::TypeTest { asserted }) => {
                let value = self.generate(*operand)?;
                self.mark_type_ref(*target)?;
                ExecKind::TypeTest {
                    value: Box::new(value),
                    target: asserted.clone(),
                }
            }
            (NodeKind::Is { .. }, _) => return Err(missing("TypeTest")),

            (NodeKind::And { left, right }, _) => ExecKind::And {
                left: Box::new(self.generate(*left)?),
                right: Box::new(self.generate(*right)?),
            },

            (NodeKind::Block { statements }, _) => ExecKind::Block(self.generate_all(statements)?),

            (
                NodeKind::Declaration {
                    name,
                    is_const,
                    annotation,
                    initializer,
                },
                NodeBinding::Declaration { symbol },
            ) => {
                if let Some(annotation) = annotation {
                    self.mark_type_ref(*annotation)?;
                }
                ExecKind::Declare {
                    symbol: *symbol,
                    name: Name::from(name.as_str()),
                    is_const: *is_const,
                    value: Box::new(self.generate(*initializer)?),
                }
            }
            (NodeKind::Declaration { .. }, _) => return Err(missing("Declaration")),

            (NodeKind::Assignment { target, value }, NodeBinding::Assignment { .. }) => {
                ExecKind::Assign {
                    target: Box::new(self.generate(*target)?),
                    value: Box::new(self.generate(*value)?),
                }
            }
            (NodeKind::Assignment { .. }, _) => return Err(missing("Assignment")),

            (NodeKind::TypeRef { .. }, _) => {
                return Err(GenerateError::NotAnExpression {
                    node: idx.0,
                    kind: node.kind_name(),
                });
            }
        };

        self.finish(idx)?;
        Ok(ExecNode::new(kind, resolved.ty, node.span))
    }

    fn generate_all(&mut self, nodes: &[NodeIndex]) -> Result<Vec<ExecNode>, GenerateError> {
        nodes.iter().map(|&node| self.generate(node)).collect()
    }

    /// Phase-2 result of a node that has not been generated yet.
    fn resolved(&self, idx: NodeIndex) -> Result<ResolvedNode, GenerateError> {
        match self.result.nodes.get(idx) {
            Some(NodeState::TypeResolved(resolved)) => Ok(resolved.clone()),
            _ => Err(GenerateError::PhaseOrder {
                node: idx.0,
                state: self.result.nodes.phase_name(idx),
            }),
        }
    }

    fn finish(&mut self, idx: NodeIndex) -> Result<(), GenerateError> {
        if self.result.nodes.mark_generated(idx) {
            Ok(())
        } else {
            Err(GenerateError::PhaseOrder {
                node: idx.0,
                state: self.result.nodes.phase_name(idx),
            })
        }
    }

    /// Type references generate nothing; they are only marked.
    fn mark_type_ref(&mut self, idx: NodeIndex) -> Result<(), GenerateError> {
        let arena = self.arena;
        if let Some(NodeKind::TypeRef { type_arguments, .. }) = arena.kind(idx) {
            for &argument in type_arguments {
                self.mark_type_ref(argument)?;
            }
        }
        self.finish(idx)
    }

    fn mark_annotations(&mut self, parameters: &[LambdaParameter]) -> Result<(), GenerateError> {
        for annotation in parameters.iter().filter_map(|p| p.annotation) {
            self.mark_type_ref(annotation)?;
        }
        Ok(())
    }

    /// Read of `symbol`. A narrowed symbol reads the binding it narrows and
    /// converts it to the narrowed type.
    fn read_symbol(&self, symbol: SymbolId, span: SourceSpan) -> Result<ExecKind, GenerateError> {
        let data = self
            .symbols
            .symbol(symbol)
            .ok_or(GenerateError::MissingSymbol { symbol: symbol.0 })?;
        match &data.kind {
            SymbolKind::External { .. } => Ok(ExecKind::HostValue {
                name: data.name.clone(),
            }),
            SymbolKind::Source { .. } | SymbolKind::Parameter { .. } => Ok(ExecKind::LocalValue {
                symbol,
                name: data.name.clone(),
            }),
            SymbolKind::Narrowed { .. } => {
                let base = self.symbols.unnarrowed(symbol);
                let base_data = self
                    .symbols
                    .symbol(base)
                    .ok_or(GenerateError::MissingSymbol { symbol: base.0 })?;
                let base_ty = match &base_data.kind {
                    SymbolKind::External { ty, .. } => ty.clone(),
                    _ => self
                        .result
                        .symbol_types
                        .get(&base)
                        .cloned()
                        .unwrap_or(Type::Unknown),
                };
                trace!(symbol = symbol.0, base = base.0, "narrowed read");
                let read = self.read_symbol(base, span)?;
                Ok(ExecKind::Convert {
                    value: Box::new(ExecNode::new(read, base_ty, span)),
                })
            }
        }
    }

    /// `object.member`. Members found through a bound generic are read at
    /// their declared type and converted to the bound type.
    fn member_read(
        &mut self,
        idx: NodeIndex,
        object: ExecNode,
        name: &str,
        found: &MemberDef,
        ty: &Type,
        span: SourceSpan,
    ) -> Result<ExecNode, GenerateError> {
        let declared = self.declared_member_type(&object.ty, name);
        self.finish(idx)?;
        let read = ExecKind::MemberRead {
            object: Box::new(object),
            member: found.clone(),
        };
        match declared {
            Some(declared) if &declared != ty => {
                trace!(node = idx.0, member = name, "converting generic member read");
                let inner = ExecNode::new(read, declared, span);
                Ok(ExecNode::new(
                    ExecKind::Convert {
                        value: Box::new(inner),
                    },
                    ty.clone(),
                    span,
                ))
            }
            _ => Ok(ExecNode::new(read, ty.clone(), span)),
        }
    }

    /// Type of `name` as declared on the generic definition behind
    /// `object_ty`, if `object_ty` is a bound generic.
    fn declared_member_type(&self, object_ty: &Type, name: &str) -> Option<Type> {
        let regular = object_ty.as_regular()?;
        regular.type_arguments.as_ref()?;
        let definitions = &self.env.definitions;
        let declaring = definitions.self_instance(regular.def);
        let mut members = find_members_by_name(definitions, &declaring, name);
        if members.len() == 1 {
            members.pop().map(|member| member.ty)
        } else {
            None
        }
    }
}

fn constant(token: &LiteralToken) -> ConstantValue {
    match token {
        LiteralToken::Number(n) => ConstantValue::Number(*n),
        LiteralToken::String(s) => ConstantValue::String(Name::from(s.as_str())),
        LiteralToken::Boolean(b) => ConstantValue::Boolean(*b),
        LiteralToken::Null => ConstantValue::Null,
    }
}
