//! Node variants.
//!
//! Each language construct is one `NodeKind` variant holding exactly its
//! structural data: child indices and token text. Nodes carry no resolution
//! state; that lives in the checker's per-node state table.

use serde::Serialize;
use tybscri_common::SourceSpan;

/// Index of a node in its `NodeArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LiteralToken {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

/// A lambda parameter. Parameters are not nodes of their own; an optional
/// annotation is a `TypeRef` child of the lambda.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LambdaParameter {
    pub name: String,
    pub annotation: Option<NodeIndex>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum NodeKind {
    Identifier {
        name: String,
    },
    Literal(LiteralToken),
    /// `[a, b, c]`
    Collection {
        elements: Vec<NodeIndex>,
    },
    /// `if (condition) then else otherwise`; the else branch is optional.
    If {
        condition: NodeIndex,
        then_branch: NodeIndex,
        else_branch: Option<NodeIndex>,
    },
    /// `callee(arguments) { trailing }`
    Invocation {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
        trailing_lambda: Option<NodeIndex>,
    },
    /// `object.member`
    MemberAccess {
        object: NodeIndex,
        member: String,
    },
    /// `{ a, b -> body }`, or `{ body }` with the implicit parameter.
    Lambda {
        parameters: Vec<LambdaParameter>,
        body: NodeIndex,
    },
    /// `operand is Type`
    Is {
        operand: NodeIndex,
        target: NodeIndex,
    },
    /// `left and right`
    And {
        left: NodeIndex,
        right: NodeIndex,
    },
    Block {
        statements: Vec<NodeIndex>,
    },
    /// `const name: Annotation = initializer` / `let ...`
    Declaration {
        name: String,
        is_const: bool,
        annotation: Option<NodeIndex>,
        initializer: NodeIndex,
    },
    /// `target = value`
    Assignment {
        target: NodeIndex,
        value: NodeIndex,
    },
    /// A type reference such as `string` or `List<number>`.
    TypeRef {
        name: String,
        type_arguments: Vec<NodeIndex>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub span: SourceSpan,
}

impl Node {
    /// Immediate children in source order.
    pub fn children(&self) -> Vec<NodeIndex> {
        match &self.kind {
            NodeKind::Identifier { .. } | NodeKind::Literal(_) => Vec::new(),
            NodeKind::Collection { elements } => elements.clone(),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![*condition, *then_branch];
                children.extend(*else_branch);
                children
            }
            NodeKind::Invocation {
                callee,
                arguments,
                trailing_lambda,
            } => {
                let mut children = Vec::with_capacity(arguments.len() + 2);
                children.push(*callee);
                children.extend_from_slice(arguments);
                children.extend(*trailing_lambda);
                children
            }
            NodeKind::MemberAccess { object, .. } => vec![*object],
            NodeKind::Lambda { parameters, body } => {
                let mut children: Vec<NodeIndex> =
                    parameters.iter().filter_map(|p| p.annotation).collect();
                children.push(*body);
                children
            }
            NodeKind::Is { operand, target } => vec![*operand, *target],
            NodeKind::And { left, right } => vec![*left, *right],
            NodeKind::Block { statements } => statements.clone(),
            NodeKind::Declaration {
                annotation,
                initializer,
                ..
            } => {
                let mut children: Vec<NodeIndex> = annotation.iter().copied().collect();
                children.push(*initializer);
                children
            }
            NodeKind::Assignment { target, value } => vec![*target, *value],
            NodeKind::TypeRef { type_arguments, .. } => type_arguments.clone(),
        }
    }

    /// Short kind name for logs and error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::Collection { .. } => "Collection",
            NodeKind::If { .. } => "If",
            NodeKind::Invocation { .. } => "Invocation",
            NodeKind::MemberAccess { .. } => "MemberAccess",
            NodeKind::Lambda { .. } => "Lambda",
            NodeKind::Is { .. } => "Is",
            NodeKind::And { .. } => "And",
            NodeKind::Block { .. } => "Block",
            NodeKind::Declaration { .. } => "Declaration",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::TypeRef { .. } => "TypeRef",
        }
    }

    pub const fn is_type_ref(&self) -> bool {
        matches!(self.kind, NodeKind::TypeRef { .. })
    }
}
