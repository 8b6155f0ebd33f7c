//! The type-checked program model handed to the resolution engine.
//!
//! psidoc does not parse or type-check source text itself. The embedding
//! tool runs its own front end and hands over a fully-built, immutable
//! model: one [`SourceUnit`] per analyzed file, each carrying the
//! declarations that survived the front end together with their checked
//! [`TypeExpr`]s and owner-chain [`Scope`]s. The resolution engine never
//! triggers additional analysis — everything it needs is in this model.

mod scope;
mod types;


pub use scope::{Scope, ScopeKind, TypeSymbol};
pub use types::{NamedType, TypeExpr};

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::{FileId, paths};

// ============================================================================
// MODIFIERS
// ============================================================================

/// The modifier set carried by a declaration.
///
/// Modifiers are derived by the front end; the resolution engine consumes
/// them as-is and never re-derives visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub exported: bool,
    pub private: bool,
    pub protected: bool,
    pub readonly: bool,
    pub ambient: bool,
}

impl Modifiers {
    /// Modifier set with only `export` present.
    pub fn exported() -> Self {
        Self {
            exported: true,
            ..Self::default()
        }
    }

    /// Empty modifier set (a module-private declaration).
    pub fn none() -> Self {
        Self::default()
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A top-level declaration inside a source unit.
#[derive(Clone, Debug)]
pub enum Declaration {
    /// A class or interface declaration.
    Class(ClassDecl),
    /// A free function declaration.
    Function(FunctionDecl),
    /// A single-binding variable statement with a type annotation.
    Variable(VariableDecl),
    /// An enum declaration.
    Enum(EnumDecl),
}

impl Declaration {
    /// The declared simple name.
    pub fn name(&self) -> &Arc<str> {
        match self {
            Declaration::Class(d) => &d.name,
            Declaration::Function(d) => &d.name,
            Declaration::Variable(d) => &d.name,
            Declaration::Enum(d) => &d.name,
        }
    }
}

/// A class or interface declaration with its documentable members.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub name: Arc<str>,
    pub modifiers: Modifiers,
    /// Raw doc comment body (text between `/**` and `*/`), if any.
    pub doc: Option<Arc<str>>,
    pub is_interface: bool,
    /// Checked heritage clause types (`extends` / `implements`).
    pub heritage: Vec<TypeExpr>,
    pub properties: Vec<PropertyDecl>,
    pub methods: Vec<MethodDecl>,
}

/// A property of a class or interface.
#[derive(Clone, Debug)]
pub struct PropertyDecl {
    pub name: Arc<str>,
    pub modifiers: Modifiers,
    pub doc: Option<Arc<str>>,
    /// The checked property type (annotation or inferred by the front end).
    pub type_expr: TypeExpr,
    /// Whether the property carries a question token.
    pub optional: bool,
    /// Source text of a constant initializer, if one was evaluable.
    pub default_value: Option<String>,
}

/// A method of a class or interface, or (via [`FunctionDecl`]) a free
/// function signature.
#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: Arc<str>,
    pub modifiers: Modifiers,
    pub doc: Option<Arc<str>>,
    pub params: Vec<ParamDecl>,
    /// The checked return type of the signature.
    pub return_type: TypeExpr,
}

/// A parameter of a method or function.
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub name: Arc<str>,
    /// Annotated parameter type; `None` when the source had no annotation.
    pub type_expr: Option<TypeExpr>,
}

/// A free function declaration.
#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub name: Arc<str>,
    pub modifiers: Modifiers,
    pub doc: Option<Arc<str>>,
    pub params: Vec<ParamDecl>,
    pub return_type: TypeExpr,
}

/// A variable statement with exactly one typed declaration.
#[derive(Clone, Debug)]
pub struct VariableDecl {
    pub name: Arc<str>,
    pub modifiers: Modifiers,
    pub doc: Option<Arc<str>>,
    /// The annotated type expression.
    pub type_expr: TypeExpr,
    /// When the initializer's checked type resolved to a declared symbol,
    /// the front end records it here and the extractor prefers its path
    /// over expanding the annotation.
    pub inferred_symbol: Option<TypeSymbol>,
    pub is_const: bool,
}

/// An enum declaration; members document as number-typed constants.
#[derive(Clone, Debug)]
pub struct EnumDecl {
    pub name: Arc<str>,
    pub modifiers: Modifiers,
    pub doc: Option<Arc<str>>,
    pub members: Vec<Arc<str>>,
}

/// A named re-export statement (`export { A, B } from "./mod"`).
#[derive(Clone, Debug)]
pub struct ReExport {
    /// The module specifier as written; only relative specifiers are honored.
    pub specifier: Arc<str>,
    /// The exported names, in declaration order.
    pub names: Vec<Arc<str>>,
}

// ============================================================================
// SOURCE UNITS
// ============================================================================

/// One analyzed file. Created once per file when the program model is
/// built and immutable afterwards.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    pub file: FileId,
    /// Slash-normalized path of the file.
    pub path: Arc<str>,
    /// Whether this is an ambient, typing-only file.
    pub is_declaration_only: bool,
    pub declarations: Vec<Declaration>,
    /// Named re-exports declared in this unit; only consulted when the
    /// unit turns out to be the package entry point.
    pub re_exports: Vec<ReExport>,
}

impl SourceUnit {
    /// Create a regular source unit.
    pub fn new(file: FileId, path: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            path: paths::normalize(&path.into()).into(),
            is_declaration_only: false,
            declarations: Vec::new(),
            re_exports: Vec::new(),
        }
    }

    /// Create an ambient, typing-only unit.
    pub fn declaration_only(file: FileId, path: impl Into<Arc<str>>) -> Self {
        Self {
            is_declaration_only: true,
            ..Self::new(file, path)
        }
    }

    /// Whether there is nothing to document or flatten in this unit.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.re_exports.is_empty()
    }
}

// ============================================================================
// PROGRAM
// ============================================================================

/// The fully-built set of source units for one analysis pass.
#[derive(Debug, Default)]
pub struct Program {
    units: Vec<SourceUnit>,
    by_file: FxHashMap<FileId, usize>,
    by_path: FxHashMap<Arc<str>, usize>,
}

impl Program {
    /// Build a program from its units.
    pub fn new(units: Vec<SourceUnit>) -> Self {
        let mut by_file = FxHashMap::default();
        let mut by_path = FxHashMap::default();
        for (idx, unit) in units.iter().enumerate() {
            by_file.insert(unit.file, idx);
            by_path.insert(unit.path.clone(), idx);
        }
        Self {
            units,
            by_file,
            by_path,
        }
    }

    /// All units in build order.
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    /// Look up a unit by file id.
    pub fn unit(&self, file: FileId) -> Option<&SourceUnit> {
        self.by_file.get(&file).map(|&idx| &self.units[idx])
    }

    /// Look up a unit by normalized path.
    pub fn unit_by_path(&self, path: &str) -> Option<&SourceUnit> {
        self.by_path.get(path).map(|&idx| &self.units[idx])
    }

    /// Resolve a relative module specifier against the directory of
    /// `from`. Non-relative specifiers name external packages and are
    /// never resolved here.
    pub fn resolve_relative(&self, from: &SourceUnit, specifier: &str) -> Option<&SourceUnit> {
        if !specifier.starts_with('.') {
            return None;
        }
        let resolved = paths::join(paths::dirname(&from.path), specifier);
        self.unit_by_path(&format!("{resolved}.ts"))
            .or_else(|| self.unit_by_path(&resolved))
    }
}
