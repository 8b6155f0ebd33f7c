//! The documentation intermediate representation (PSI).
//!
//! Extraction turns the program model into per-module buckets of
//! documentable entries whose cross-references are [`TypeName`] lists —
//! already-resolved reference paths rather than raw syntax. The
//! re-export flattener mutates these buckets; the renderer consumes
//! them.

mod doc_comment;


pub use doc_comment::{DocComment, DocTag};

use std::sync::Arc;

use indexmap::IndexMap;

// ============================================================================
// TYPE NAMES
// ============================================================================

/// One alternative in an expanded type: either a plain textual tag (a
/// primitive, a quoted literal, or a resolved reference path) or a
/// parameterized reference carrying nested alternatives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeName {
    Tag(Arc<str>),
    Parameterized { name: Arc<str>, args: Vec<TypeName> },
}

impl TypeName {
    /// A plain tag.
    pub fn tag(text: impl Into<Arc<str>>) -> Self {
        TypeName::Tag(text.into())
    }

    /// The tag text, if this is a plain tag.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            TypeName::Tag(text) => Some(text),
            TypeName::Parameterized { .. } => None,
        }
    }

    /// The reference path in name position (tag text or the base path of
    /// a parameterized reference).
    pub fn base(&self) -> &str {
        match self {
            TypeName::Tag(text) => text,
            TypeName::Parameterized { name, .. } => name,
        }
    }
}

/// Whether an expanded type list contains a given plain tag.
pub fn contains_tag(types: &[TypeName], tag: &str) -> bool {
    types.iter().any(|t| t.as_tag() == Some(tag))
}

// ============================================================================
// PSI ENTRIES
// ============================================================================

/// A documented class or interface.
#[derive(Clone, Debug)]
pub struct ClassPsi {
    /// The owning module reference (`module:<ModuleId>`). Mutated when
    /// re-export flattening moves the class to the entry-point module.
    pub module_path: Arc<str>,
    pub name: Arc<str>,
    pub is_interface: bool,
    /// Expanded heritage references, in clause order.
    pub parents: Vec<TypeName>,
    pub properties: Vec<PropertyPsi>,
    pub methods: Vec<FunctionPsi>,
    pub doc: Option<DocComment>,
}

/// A documented property.
#[derive(Clone, Debug)]
pub struct PropertyPsi {
    pub name: Arc<str>,
    pub types: Vec<TypeName>,
    pub is_optional: bool,
    pub default_value: Option<String>,
    pub doc: Option<DocComment>,
}

/// A documented method or free function.
#[derive(Clone, Debug)]
pub struct FunctionPsi {
    pub name: Arc<str>,
    /// Pre-rendered tags attached during extraction (`@protected`).
    pub tags: Vec<String>,
    pub is_protected: bool,
    pub doc: Option<DocComment>,
    pub params: Vec<ParamPsi>,
    pub return_types: Vec<TypeName>,
}

/// A documented parameter.
#[derive(Clone, Debug)]
pub struct ParamPsi {
    pub name: Arc<str>,
    /// Expanded parameter type; `None` when the source had no annotation.
    pub types: Option<Vec<TypeName>>,
}

/// A documented module-level variable.
#[derive(Clone, Debug)]
pub struct VariablePsi {
    pub name: Arc<str>,
    pub types: Vec<TypeName>,
    pub is_const: bool,
    pub doc: Option<DocComment>,
}

/// A documented enum; members render as number-typed constants.
#[derive(Clone, Debug)]
pub struct EnumPsi {
    /// Fully qualified id (`module:<ModuleId>.<Name>`).
    pub id: Arc<str>,
    pub name: Arc<str>,
    /// The owning module reference.
    pub memberof: Arc<str>,
    pub readonly: bool,
    pub doc: Option<DocComment>,
    pub members: Vec<EnumMemberPsi>,
}

/// One member of a documented enum.
#[derive(Clone, Debug)]
pub struct EnumMemberPsi {
    pub name: Arc<str>,
    /// The owning enum id.
    pub memberof: Arc<str>,
}

/// A module-level member entry: a plain variable or an enum descriptor.
#[derive(Clone, Debug)]
pub enum MemberPsi {
    Variable(VariablePsi),
    Enum(EnumPsi),
}

impl MemberPsi {
    /// The declared name of the member.
    pub fn name(&self) -> &Arc<str> {
        match self {
            MemberPsi::Variable(v) => &v.name,
            MemberPsi::Enum(e) => &e.name,
        }
    }
}

// ============================================================================
// BUCKETS
// ============================================================================

/// Per-module container of documented entries.
#[derive(Clone, Debug, Default)]
pub struct PsiBucket {
    pub classes: Vec<ClassPsi>,
    pub functions: Vec<FunctionPsi>,
    pub members: Vec<MemberPsi>,
}

impl PsiBucket {
    /// Append another extraction result for the same module id. Two files
    /// can fold to one module (a package's public surface); their entries
    /// accumulate in declaration order.
    pub fn append(&mut self, mut other: PsiBucket) {
        self.classes.append(&mut other.classes);
        self.functions.append(&mut other.functions);
        self.members.append(&mut other.members);
    }

    /// Whether the bucket documents nothing.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.members.is_empty()
    }
}

/// The ModuleId -> bucket map, insertion-ordered so output order is
/// deterministic across runs.
#[derive(Debug, Default)]
pub struct PsiMap {
    buckets: IndexMap<Arc<str>, PsiBucket>,
}

impl PsiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bucket for a module id, created lazily on first use.
    pub fn bucket_mut(&mut self, module_id: impl Into<Arc<str>>) -> &mut PsiBucket {
        self.buckets.entry(module_id.into()).or_default()
    }

    pub fn get(&self, module_id: &str) -> Option<&PsiBucket> {
        self.buckets.get(module_id)
    }

    pub fn get_mut(&mut self, module_id: &str) -> Option<&mut PsiBucket> {
        self.buckets.get_mut(module_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &PsiBucket)> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Names re-exported from the entry point, keyed by the source ModuleId,
/// insertion-ordered.
#[derive(Debug, Default)]
pub struct MainMappings {
    mappings: IndexMap<Arc<str>, Vec<Arc<str>>>,
}

impl MainMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record re-exported names for a source module.
    pub fn add(&mut self, module_id: impl Into<Arc<str>>, names: impl IntoIterator<Item = Arc<str>>) {
        self.mappings
            .entry(module_id.into())
            .or_default()
            .extend(names);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Vec<Arc<str>>)> {
        self.mappings.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
