//! Type display for diagnostics.

use crate::types::Type;

pub fn format_type(ty: &Type) -> String {
    TypeFormatter.format(ty)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TypeFormatter;

impl TypeFormatter {
    pub fn format(&self, ty: &Type) -> String {
        match ty {
            Type::Unknown => "unknown".to_string(),
            Type::Never => "never".to_string(),
            Type::Literal(literal) => literal.value.to_string(),
            Type::TypeParameter(param) => param.name.to_string(),
            Type::Union(union) => union
                .members
                .iter()
                .map(|member| match member {
                    Type::Func(_) => format!("({})", self.format(member)),
                    _ => self.format(member),
                })
                .collect::<Vec<_>>()
                .join(" | "),
            Type::Func(func) => {
                let params = func
                    .parameters
                    .iter()
                    .map(|p| format!("{}: {}", p.name, self.format(&p.ty)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({params}) -> {}", self.format(&func.return_type))
            }
            Type::Regular(regular) => match &regular.type_arguments {
                Some(args) => format!(
                    "{}<{}>",
                    regular.name,
                    args.iter()
                        .map(|arg| self.format(arg))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                None => regular.name.to_string(),
            },
        }
    }
}
