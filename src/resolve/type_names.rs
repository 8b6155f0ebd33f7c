//! Type expression expansion.
//!
//! Turns a checked type expression into the ordered list of reference
//! alternatives a documentation signature prints. Unions and
//! intersections flatten into one list in declaration order, duplicates
//! preserved to mirror the source; a single unresolvable constituent
//! fails the whole expansion.

use super::error::ResolveError;
use super::symbol_path::SymbolPathResolver;
use crate::program::{NamedType, TypeExpr};
use crate::psi::TypeName;

/// Expands type expressions into reference path alternatives.
#[derive(Clone, Copy, Debug)]
pub struct TypeNameExpander<'a> {
    symbols: SymbolPathResolver<'a>,
}

impl<'a> TypeNameExpander<'a> {
    pub fn new(symbols: SymbolPathResolver<'a>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> SymbolPathResolver<'a> {
        self.symbols
    }

    /// Expand a type expression into its ordered alternatives.
    pub fn expand(&self, ty: &TypeExpr) -> Result<Vec<TypeName>, ResolveError> {
        let mut out = Vec::new();
        self.expand_into(ty, &mut out)?;
        Ok(out)
    }

    fn expand_into(&self, ty: &TypeExpr, out: &mut Vec<TypeName>) -> Result<(), ResolveError> {
        match ty {
            TypeExpr::Boolean => out.push(TypeName::tag("boolean")),
            TypeExpr::Void => out.push(TypeName::tag("void")),
            TypeExpr::Null => out.push(TypeName::tag("null")),
            TypeExpr::String => out.push(TypeName::tag("string")),
            TypeExpr::Number => out.push(TypeName::tag("number")),
            TypeExpr::Undefined => out.push(TypeName::tag("undefined")),
            TypeExpr::Any => out.push(TypeName::tag("any")),
            TypeExpr::Literal(value) => out.push(TypeName::tag(format!("\"{value}\""))),
            TypeExpr::Function => out.push(TypeName::tag("callback")),
            TypeExpr::ObjectLiteral => out.push(TypeName::tag("Object.<string, any>")),
            TypeExpr::Union(parts) | TypeExpr::Intersection(parts) => {
                // Nested alternations flatten into the same list; grouping
                // is never reconstructed downstream.
                for part in parts {
                    self.expand_into(part, out)?;
                }
            }
            TypeExpr::Named(named) => out.push(self.expand_named(named)?),
        }
        Ok(())
    }

    fn expand_named(&self, named: &NamedType) -> Result<TypeName, ResolveError> {
        let path = self.symbols.resolve(&named.symbol)?;
        if named.type_args.is_empty() {
            return Ok(TypeName::Tag(path));
        }

        let mut args = Vec::new();
        for arg in &named.type_args {
            self.expand_into(arg, &mut args)?;
        }
        Ok(TypeName::Parameterized { name: path, args })
    }
}
