//! Checked type expressions.
//!
//! These are the shapes the type name expander consumes. The front end
//! has already classified every type: primitives and literals arrive as
//! their own variants, unions and intersections as ordered constituent
//! lists, and everything user-declared as a [`NamedType`] carrying the
//! resolved symbol plus any generic instantiation arguments.

use std::sync::Arc;

use super::scope::TypeSymbol;

/// A checked type expression.
#[derive(Clone, Debug)]
pub enum TypeExpr {
    Boolean,
    Void,
    Null,
    String,
    Number,
    Undefined,
    Any,
    /// A literal type; the carried text is the literal's value without
    /// quotes.
    Literal(Arc<str>),
    /// A function type expression. Parameter and return structure is not
    /// expanded; the whole expression documents as a callback.
    Function,
    /// An anonymous object-literal type. Member structure is not
    /// expanded; the whole expression documents as a string-keyed map.
    ObjectLiteral,
    /// A union; constituents in declaration order.
    Union(Vec<TypeExpr>),
    /// An intersection; constituents in declaration order.
    Intersection(Vec<TypeExpr>),
    /// A reference to a declared symbol, optionally instantiated.
    Named(NamedType),
}

/// A reference to a user-declared type, with generic arguments when the
/// reference is an instantiation.
#[derive(Clone, Debug)]
pub struct NamedType {
    pub symbol: TypeSymbol,
    pub type_args: Vec<TypeExpr>,
}

impl TypeExpr {
    /// A plain (non-generic) reference to a symbol.
    pub fn named(symbol: TypeSymbol) -> Self {
        TypeExpr::Named(NamedType {
            symbol,
            type_args: Vec::new(),
        })
    }

    /// A generic instantiation of a symbol.
    pub fn instantiated(symbol: TypeSymbol, type_args: Vec<TypeExpr>) -> Self {
        TypeExpr::Named(NamedType { symbol, type_args })
    }

    /// A literal type from its unquoted value text.
    pub fn literal(text: impl Into<Arc<str>>) -> Self {
        TypeExpr::Literal(text.into())
    }
}
