//! Canonical path resolution for declared symbols.
//!
//! A symbol's path is recomputed from its owner chain on every
//! resolution, so moving a declaration to a new owner changes its path
//! without any stored state to invalidate.

use std::sync::Arc;

use super::error::ResolveError;
use super::module_id::ModuleIdResolver;
use crate::program::{Program, Scope, ScopeKind, TypeSymbol};

/// Resolves symbols to canonical reference paths.
#[derive(Clone, Copy, Debug)]
pub struct SymbolPathResolver<'a> {
    program: &'a Program,
    modules: ModuleIdResolver<'a>,
}

impl<'a> SymbolPathResolver<'a> {
    pub fn new(program: &'a Program, modules: ModuleIdResolver<'a>) -> Self {
        Self { program, modules }
    }

    pub fn modules(&self) -> ModuleIdResolver<'a> {
        self.modules
    }

    /// Compute the canonical path of a symbol.
    ///
    /// Ambient symbols are globally addressable and short-circuit to
    /// their bare name. Everything else walks the owner chain outward:
    /// the outermost namespace decides the addressing style, and a
    /// top-level declaration takes its unit's module identity. A chain
    /// that runs out without matching is an error — an unresolved symbol
    /// would corrupt every cross-reference to it.
    pub fn resolve(&self, symbol: &TypeSymbol) -> Result<Arc<str>, ResolveError> {
        if symbol.ambient {
            return Ok(symbol.name.clone());
        }

        let mut scope: Option<&Scope> = symbol.scope.as_ref();
        while let Some(current) = scope {
            match current.kind() {
                ScopeKind::PlainNamespace(ns) if !current.is_nested_namespace() => {
                    return Ok(format!("{ns}:{}", symbol.name).into());
                }
                ScopeKind::ModuleNamespace(ns) if !current.is_nested_namespace() => {
                    return Ok(format!("module:{ns}.{}", symbol.name).into());
                }
                ScopeKind::Unit(file) => {
                    let unit = self
                        .program
                        .unit(*file)
                        .ok_or_else(|| ResolveError::unknown_unit(symbol.name.clone()))?;
                    let module = self.modules.resolve(unit);
                    return Ok(format!("module:{}.{}", module.id, symbol.name).into());
                }
                // Nested namespaces are transparent; keep walking out.
                _ => {}
            }
            scope = current.parent();
        }

        Err(ResolveError::unresolved(symbol.name.clone()))
    }
}
