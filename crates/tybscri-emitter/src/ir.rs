//! Executable form.
//!
//! A tree that mirrors the checked syntax tree, with every name resolved to
//! a host value or a local binding, every member read resolved to a concrete
//! member and every node typed. Execution backends walk this tree; it never
//! refers back to the syntax arena.

use std::fmt;
use tybscri_binder::SymbolId;
use tybscri_common::SourceSpan;
use tybscri_solver::{MemberDef, Name, Type};

#[derive(Clone, Debug, PartialEq)]
pub struct ExecNode {
    pub kind: ExecKind,
    pub ty: Type,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Number(f64),
    String(Name),
    Boolean(bool),
    Null,
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Number(n) if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            ConstantValue::Number(n) => write!(f, "{n}"),
            ConstantValue::String(s) => write!(f, "\"{s}\""),
            ConstantValue::Boolean(b) => write!(f, "{b}"),
            ConstantValue::Null => f.write_str("null"),
        }
    }
}

/// A lambda parameter as bound by the checker.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecParameter {
    pub symbol: SymbolId,
    pub name: Name,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExecKind {
    // =========================================================================
    // Values
    // =========================================================================
    Constant(ConstantValue),
    Collection(Vec<ExecNode>),
    /// Value supplied by the host under `name`.
    HostValue { name: Name },
    /// Script binding: a declaration or a lambda parameter.
    LocalValue { symbol: SymbolId, name: Name },

    // =========================================================================
    // Expressions
    // =========================================================================
    Conditional {
        condition: Box<ExecNode>,
        then_branch: Box<ExecNode>,
        else_branch: Box<ExecNode>,
    },
    /// Call with the callee's signature after type argument inference.
    Invoke {
        callee: Box<ExecNode>,
        arguments: Vec<ExecNode>,
        signature: Type,
    },
    MemberRead {
        object: Box<ExecNode>,
        member: MemberDef,
    },
    /// Reinterpret `value` at this node's type. Emitted for narrowed reads
    /// and for members read through a bound generic.
    Convert { value: Box<ExecNode> },
    Lambda {
        parameters: Vec<ExecParameter>,
        body: Box<ExecNode>,
    },
    TypeTest { value: Box<ExecNode>, target: Type },
    And {
        left: Box<ExecNode>,
        right: Box<ExecNode>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    Block(Vec<ExecNode>),
    Declare {
        symbol: SymbolId,
        name: Name,
        is_const: bool,
        value: Box<ExecNode>,
    },
    Assign {
        target: Box<ExecNode>,
        value: Box<ExecNode>,
    },
}

impl ExecNode {
    pub fn new(kind: ExecKind, ty: Type, span: SourceSpan) -> Self {
        Self { kind, ty, span }
    }

    /// Direct children in evaluation order.
    pub fn children(&self) -> Vec<&ExecNode> {
        match &self.kind {
            ExecKind::Constant(_) | ExecKind::HostValue { .. } | ExecKind::LocalValue { .. } => {
                Vec::new()
            }
            ExecKind::Collection(items) | ExecKind::Block(items) => items.iter().collect(),
            ExecKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => vec![&**condition, &**then_branch, &**else_branch],
            ExecKind::Invoke {
                callee, arguments, ..
            } => std::iter::once(&**callee).chain(arguments).collect(),
            ExecKind::MemberRead { object: value, .. }
            | ExecKind::Convert { value }
            | ExecKind::TypeTest { value, .. }
            | ExecKind::Declare { value, .. } => vec![&**value],
            ExecKind::Lambda { body, .. } => vec![&**body],
            ExecKind::And { left, right } => vec![&**left, &**right],
            ExecKind::Assign { target, value } => vec![&**target, &**value],
        }
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(ExecNode::size).sum::<usize>()
    }
}
