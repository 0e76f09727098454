//! Compact text rendering of the executable form, for logs and tests.
//!
//! Host values print as `$name`; converted values print as `(value as T)`.

use crate::ir::{ExecKind, ExecNode};
use std::fmt::Write;
use tybscri_solver::format_type;

pub fn print_exec(node: &ExecNode) -> String {
    let mut out = String::new();
    ExecPrinter { out: &mut out }.print(node);
    out
}

struct ExecPrinter<'o> {
    out: &'o mut String,
}

impl ExecPrinter<'_> {
    fn print(&mut self, node: &ExecNode) {
        match &node.kind {
            ExecKind::Constant(value) => {
                let _ = write!(self.out, "{value}");
            }
            ExecKind::Collection(elements) => {
                self.out.push('[');
                self.list(elements, ", ");
                self.out.push(']');
            }
            ExecKind::HostValue { name } => {
                self.out.push('$');
                self.out.push_str(name);
            }
            ExecKind::LocalValue { name, .. } => self.out.push_str(name),
            ExecKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("if(");
                self.print(condition);
                self.out.push_str(", ");
                self.print(then_branch);
                self.out.push_str(", ");
                self.print(else_branch);
                self.out.push(')');
            }
            ExecKind::Invoke {
                callee, arguments, ..
            } => {
                self.print(callee);
                self.out.push('(');
                self.list(arguments, ", ");
                self.out.push(')');
            }
            ExecKind::MemberRead { object, member } => {
                self.print(object);
                self.out.push('.');
                self.out.push_str(&member.name);
            }
            ExecKind::Convert { value } => {
                self.out.push('(');
                self.print(value);
                let _ = write!(self.out, " as {})", format_type(&node.ty));
            }
            ExecKind::Lambda { parameters, body } => {
                self.out.push_str("{ ");
                if !parameters.is_empty() {
                    let names: Vec<&str> = parameters.iter().map(|p| &*p.name).collect();
                    self.out.push_str(&names.join(", "));
                    self.out.push_str(" -> ");
                }
                self.print(body);
                self.out.push_str(" }");
            }
            ExecKind::TypeTest { value, target } => {
                self.out.push('(');
                self.print(value);
                let _ = write!(self.out, " is {})", format_type(target));
            }
            ExecKind::And { left, right } => {
                self.out.push('(');
                self.print(left);
                self.out.push_str(" and ");
                self.print(right);
                self.out.push(')');
            }
            ExecKind::Block(statements) => {
                self.out.push_str("{ ");
                self.list(statements, "; ");
                self.out.push_str(" }");
            }
            ExecKind::Declare {
                name,
                is_const,
                value,
                ..
            } => {
                self.out.push_str(if *is_const { "const " } else { "let " });
                self.out.push_str(name);
                self.out.push_str(" = ");
                self.print(value);
            }
            ExecKind::Assign { target, value } => {
                self.print(target);
                self.out.push_str(" = ");
                self.print(value);
            }
        }
    }

    fn list(&mut self, nodes: &[ExecNode], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.print(node);
        }
    }
}
