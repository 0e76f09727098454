//! Convenience construction of syntax trees.
//!
//! A parser adds nodes with real spans through the `NodeArena::add_*`
//! methods. Hosts that build trees programmatically (and the test suites)
//! use `TreeBuilder`, which hands out distinct synthetic spans so that
//! diagnostics can still be attributed to a node.

use crate::arena::NodeArena;
use crate::node::{LambdaParameter, LiteralToken, NodeIndex};
use tybscri_common::{SourceLocation, SourceSpan};

#[derive(Debug, Default)]
pub struct TreeBuilder {
    arena: NodeArena,
    offset: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn finish(self) -> NodeArena {
        self.arena
    }

    fn next_span(&mut self, width: u32) -> SourceSpan {
        let start = self.offset;
        self.offset += width.max(1) + 1;
        SourceSpan::new(
            SourceLocation::new(start, 1, start),
            SourceLocation::new(start + width.max(1), 1, start + width.max(1)),
        )
    }

    fn width(text: &str) -> u32 {
        text.len() as u32
    }

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        let span = self.next_span(Self::width(name));
        self.arena.add_identifier(name, span)
    }

    pub fn number(&mut self, value: f64) -> NodeIndex {
        let span = self.next_span(Self::width(&value.to_string()));
        self.arena.add_literal(LiteralToken::Number(value), span)
    }

    pub fn string(&mut self, value: &str) -> NodeIndex {
        let span = self.next_span(Self::width(value) + 2);
        self.arena
            .add_literal(LiteralToken::String(value.to_string()), span)
    }

    pub fn boolean(&mut self, value: bool) -> NodeIndex {
        let span = self.next_span(if value { 4 } else { 5 });
        self.arena.add_literal(LiteralToken::Boolean(value), span)
    }

    pub fn null(&mut self) -> NodeIndex {
        let span = self.next_span(4);
        self.arena.add_literal(LiteralToken::Null, span)
    }

    pub fn collection(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        let span = self.next_span(2);
        self.arena.add_collection(elements, span)
    }

    pub fn if_then(&mut self, condition: NodeIndex, then_branch: NodeIndex) -> NodeIndex {
        let span = self.next_span(2);
        self.arena.add_if(condition, then_branch, None, span)
    }

    pub fn if_else(
        &mut self,
        condition: NodeIndex,
        then_branch: NodeIndex,
        else_branch: NodeIndex,
    ) -> NodeIndex {
        let span = self.next_span(2);
        self.arena
            .add_if(condition, then_branch, Some(else_branch), span)
    }

    pub fn call(&mut self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        let span = self.next_span(2);
        self.arena.add_invocation(callee, arguments, None, span)
    }

    /// `callee(arguments) { lambda }`
    pub fn call_with_lambda(
        &mut self,
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
        lambda: NodeIndex,
    ) -> NodeIndex {
        let span = self.next_span(2);
        self.arena
            .add_invocation(callee, arguments, Some(lambda), span)
    }

    pub fn member(&mut self, object: NodeIndex, name: &str) -> NodeIndex {
        let span = self.next_span(Self::width(name) + 1);
        self.arena.add_member_access(object, name, span)
    }

    pub fn param(&mut self, name: &str) -> LambdaParameter {
        LambdaParameter {
            name: name.to_string(),
            annotation: None,
            span: self.next_span(Self::width(name)),
        }
    }

    pub fn typed_param(&mut self, name: &str, annotation: NodeIndex) -> LambdaParameter {
        LambdaParameter {
            name: name.to_string(),
            annotation: Some(annotation),
            span: self.next_span(Self::width(name)),
        }
    }

    pub fn lambda(&mut self, parameters: Vec<LambdaParameter>, body: NodeIndex) -> NodeIndex {
        let span = self.next_span(2);
        self.arena.add_lambda(parameters, body, span)
    }

    /// `{ body }` using the implicit parameter.
    pub fn implicit_lambda(&mut self, body: NodeIndex) -> NodeIndex {
        self.lambda(Vec::new(), body)
    }

    pub fn is(&mut self, operand: NodeIndex, target: NodeIndex) -> NodeIndex {
        let span = self.next_span(2);
        self.arena.add_is(operand, target, span)
    }

    pub fn and(&mut self, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        let span = self.next_span(3);
        self.arena.add_and(left, right, span)
    }

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        let span = self.next_span(2);
        self.arena.add_block(statements, span)
    }

    pub fn const_decl(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let span = self.next_span(Self::width(name) + 6);
        self.arena
            .add_declaration(name, true, None, initializer, span)
    }

    pub fn let_decl(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let span = self.next_span(Self::width(name) + 4);
        self.arena
            .add_declaration(name, false, None, initializer, span)
    }

    pub fn declaration(
        &mut self,
        name: &str,
        is_const: bool,
        annotation: Option<NodeIndex>,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let span = self.next_span(Self::width(name) + 6);
        self.arena
            .add_declaration(name, is_const, annotation, initializer, span)
    }

    pub fn assign(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        let span = self.next_span(1);
        self.arena.add_assignment(target, value, span)
    }

    pub fn type_ref(&mut self, name: &str) -> NodeIndex {
        let span = self.next_span(Self::width(name));
        self.arena.add_type_ref(name, Vec::new(), span)
    }

    pub fn generic_type_ref(&mut self, name: &str, type_arguments: Vec<NodeIndex>) -> NodeIndex {
        let span = self.next_span(Self::width(name) + 2);
        self.arena.add_type_ref(name, type_arguments, span)
    }
}
