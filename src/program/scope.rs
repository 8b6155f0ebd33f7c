//! Owner-chain scopes for declared symbols.
//!
//! A symbol's canonical path is never stored; it is recomputed from the
//! chain of scopes that own the declaration. The chain is an explicit
//! parent-linked list with a closed set of scope kinds, so the path walk
//! is an iterative loop over [`Scope::parent`] rather than an AST
//! traversal.

use std::sync::Arc;

use crate::base::FileId;

/// The closed set of scope kinds a declaration can be owned by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The top-level source unit itself.
    Unit(FileId),
    /// A module-style nesting (`module X`); produces `module:X.name`
    /// addressing.
    ModuleNamespace(Arc<str>),
    /// A namespace-style nesting (`namespace X`); produces `X:name`
    /// addressing.
    PlainNamespace(Arc<str>),
}

#[derive(Debug)]
struct ScopeData {
    kind: ScopeKind,
    parent: Option<Scope>,
}

/// One node in a declaration's owner chain.
///
/// Cheap to clone; chains are shared between all symbols declared in the
/// same scope.
#[derive(Clone, Debug)]
pub struct Scope(Arc<ScopeData>);

impl Scope {
    /// The scope of a top-level source unit.
    pub fn unit(file: FileId) -> Self {
        Self(Arc::new(ScopeData {
            kind: ScopeKind::Unit(file),
            parent: None,
        }))
    }

    /// A module-style namespace scope.
    pub fn module_namespace(name: impl Into<Arc<str>>, parent: Option<Scope>) -> Self {
        Self(Arc::new(ScopeData {
            kind: ScopeKind::ModuleNamespace(name.into()),
            parent,
        }))
    }

    /// A namespace-style namespace scope.
    pub fn plain_namespace(name: impl Into<Arc<str>>, parent: Option<Scope>) -> Self {
        Self(Arc::new(ScopeData {
            kind: ScopeKind::PlainNamespace(name.into()),
            parent,
        }))
    }

    /// The kind of this scope.
    pub fn kind(&self) -> &ScopeKind {
        &self.0.kind
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    /// Whether this scope is a namespace nested directly inside another
    /// namespace. Nested namespaces are transparent to the path walk; only
    /// the outermost one contributes to the address.
    pub fn is_nested_namespace(&self) -> bool {
        self.is_namespace()
            && matches!(self.parent(), Some(parent) if parent.is_namespace())
    }

    fn is_namespace(&self) -> bool {
        matches!(
            self.kind(),
            ScopeKind::ModuleNamespace(_) | ScopeKind::PlainNamespace(_)
        )
    }
}

/// A resolved, named type symbol as reported by the front end.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    /// The simple declared name.
    pub name: Arc<str>,
    /// Whether the declaration is ambient (defined in a trusted external
    /// type library). Ambient symbols are globally addressable by bare
    /// name and never rewritten.
    pub ambient: bool,
    /// The owner chain of the declaration. `None` for symbols the front
    /// end could not attach to any scope; resolving such a symbol fails.
    pub scope: Option<Scope>,
}

impl TypeSymbol {
    /// A symbol owned by the given scope.
    pub fn new(name: impl Into<Arc<str>>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            ambient: false,
            scope: Some(scope),
        }
    }

    /// A symbol declared at the top level of a source unit.
    pub fn in_unit(name: impl Into<Arc<str>>, file: FileId) -> Self {
        Self::new(name, Scope::unit(file))
    }

    /// An ambient symbol, addressable by bare name.
    pub fn ambient(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ambient: true,
            scope: None,
        }
    }

    /// A symbol with no resolvable owner chain.
    pub fn detached(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ambient: false,
            scope: None,
        }
    }
}
