//! Error types for the resolution engine.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while computing canonical paths.
///
/// All variants are fatal for the analysis pass: a reference whose own
/// name cannot be printed corrupts every cross-reference to it, so
/// resolution never degrades to a default value.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A symbol's owner chain ran out without reaching a namespace or a
    /// source unit.
    #[error("cannot resolve a module path for `{name}`: no owning scope")]
    UnresolvedSymbol { name: Arc<str> },

    /// A symbol's owner chain pointed at a file the program model does
    /// not contain.
    #[error("cannot resolve a module path for `{name}`: owning file is not part of the program")]
    UnknownOwningUnit { name: Arc<str> },
}

impl ResolveError {
    /// An unresolved-symbol error for the given name.
    pub fn unresolved(name: impl Into<Arc<str>>) -> Self {
        Self::UnresolvedSymbol { name: name.into() }
    }

    /// An unknown-owning-unit error for the given name.
    pub fn unknown_unit(name: impl Into<Arc<str>>) -> Self {
        Self::UnknownOwningUnit { name: name.into() }
    }
}
