//! Node arena for syntax tree storage.

use crate::node::{LambdaParameter, LiteralToken, Node, NodeIndex, NodeKind};
use serde::Serialize;
use tybscri_common::SourceSpan;

/// Arena-based storage for syntax nodes.
/// Nodes are stored contiguously and referenced by index; a parent is always
/// added after its children.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, kind: NodeKind, span: SourceSpan) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node { kind, span });
        NodeIndex(index)
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn kind(&self, index: NodeIndex) -> Option<&NodeKind> {
        self.get(index).map(|node| &node.kind)
    }

    pub fn span(&self, index: NodeIndex) -> SourceSpan {
        self.get(index).map_or(SourceSpan::EMPTY, |node| node.span)
    }

    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        self.get(index).map(Node::children).unwrap_or_default()
    }

    /// Identifier text, if `index` is an identifier reference.
    pub fn identifier_name(&self, index: NodeIndex) -> Option<&str> {
        match self.kind(index)? {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Pre-order traversal of the subtree rooted at `root`.
    pub fn descendants(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if self.get(index).is_none() {
                continue;
            }
            out.push(index);
            let children = self.children(index);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    pub fn add_identifier(&mut self, name: &str, span: SourceSpan) -> NodeIndex {
        self.add(
            NodeKind::Identifier {
                name: name.to_string(),
            },
            span,
        )
    }

    pub fn add_literal(&mut self, token: LiteralToken, span: SourceSpan) -> NodeIndex {
        self.add(NodeKind::Literal(token), span)
    }

    pub fn add_collection(&mut self, elements: Vec<NodeIndex>, span: SourceSpan) -> NodeIndex {
        self.add(NodeKind::Collection { elements }, span)
    }

    pub fn add_if(
        &mut self,
        condition: NodeIndex,
        then_branch: NodeIndex,
        else_branch: Option<NodeIndex>,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        )
    }

    pub fn add_invocation(
        &mut self,
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
        trailing_lambda: Option<NodeIndex>,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(
            NodeKind::Invocation {
                callee,
                arguments,
                trailing_lambda,
            },
            span,
        )
    }

    pub fn add_member_access(
        &mut self,
        object: NodeIndex,
        member: &str,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(
            NodeKind::MemberAccess {
                object,
                member: member.to_string(),
            },
            span,
        )
    }

    pub fn add_lambda(
        &mut self,
        parameters: Vec<LambdaParameter>,
        body: NodeIndex,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(NodeKind::Lambda { parameters, body }, span)
    }

    pub fn add_is(&mut self, operand: NodeIndex, target: NodeIndex, span: SourceSpan) -> NodeIndex {
        self.add(NodeKind::Is { operand, target }, span)
    }

    pub fn add_and(&mut self, left: NodeIndex, right: NodeIndex, span: SourceSpan) -> NodeIndex {
        self.add(NodeKind::And { left, right }, span)
    }

    pub fn add_block(&mut self, statements: Vec<NodeIndex>, span: SourceSpan) -> NodeIndex {
        self.add(NodeKind::Block { statements }, span)
    }

    pub fn add_declaration(
        &mut self,
        name: &str,
        is_const: bool,
        annotation: Option<NodeIndex>,
        initializer: NodeIndex,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(
            NodeKind::Declaration {
                name: name.to_string(),
                is_const,
                annotation,
                initializer,
            },
            span,
        )
    }

    pub fn add_assignment(
        &mut self,
        target: NodeIndex,
        value: NodeIndex,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(NodeKind::Assignment { target, value }, span)
    }

    pub fn add_type_ref(
        &mut self,
        name: &str,
        type_arguments: Vec<NodeIndex>,
        span: SourceSpan,
    ) -> NodeIndex {
        self.add(
            NodeKind::TypeRef {
                name: name.to_string(),
                type_arguments,
            },
            span,
        )
    }
}
