//! Declaration extraction.
//!
//! Walks the program model and produces the per-module PSI buckets the
//! renderer consumes, resolving every type reference through the
//! resolution engine on the way. The entry point's named re-exports are
//! collected as [`MainMappings`] for the flattening pass; nothing is
//! flattened here.


use std::sync::Arc;

use tracing::{debug, warn};

use crate::program::{
    ClassDecl, Declaration, EnumDecl, FunctionDecl, MethodDecl, ParamDecl, Program, PropertyDecl,
    ReExport, SourceUnit, VariableDecl,
};
use crate::psi::{
    ClassPsi, DocComment, EnumMemberPsi, EnumPsi, FunctionPsi, MainMappings, MemberPsi, ParamPsi,
    PropertyPsi, PsiBucket, PsiMap, VariablePsi, contains_tag,
};
use crate::resolve::{
    AnalysisOptions, ModuleIdResolver, ModuleInfo, ResolveError, SymbolPathResolver,
    TypeNameExpander,
};

/// Which access levels are documented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessFilter {
    /// Document public and protected members.
    #[default]
    All,
    /// Document public members only.
    Public,
}

/// The extraction output: PSI buckets plus the entry point's re-export
/// mappings.
#[derive(Debug, Default)]
pub struct Extraction {
    pub psi: PsiMap,
    pub main_mappings: MainMappings,
}

/// Walks source units and builds PSI entries.
pub struct Extractor<'a> {
    program: &'a Program,
    access: AccessFilter,
    modules: ModuleIdResolver<'a>,
    types: TypeNameExpander<'a>,
}

impl<'a> Extractor<'a> {
    pub fn new(program: &'a Program, options: &'a AnalysisOptions, access: AccessFilter) -> Self {
        let modules = ModuleIdResolver::new(options);
        Self {
            program,
            access,
            modules,
            types: TypeNameExpander::new(SymbolPathResolver::new(program, modules)),
        }
    }

    /// Extract every non-ambient, non-empty unit.
    pub fn run(&self) -> Result<Extraction, ResolveError> {
        let mut out = Extraction::default();
        for unit in self.program.units() {
            if unit.is_declaration_only || unit.is_empty() {
                continue;
            }
            self.extract_unit(unit, &mut out)?;
        }
        Ok(out)
    }

    fn extract_unit(&self, unit: &SourceUnit, out: &mut Extraction) -> Result<(), ResolveError> {
        let module = self.modules.resolve(unit);
        debug!(path = unit.path.as_ref(), module = module.id.as_ref(), "extracting unit");

        let mut bucket = PsiBucket::default();
        for declaration in &unit.declarations {
            match declaration {
                Declaration::Class(decl) => {
                    if let Some(psi) = self.describe_class(decl, &module)? {
                        bucket.classes.push(psi);
                    }
                }
                Declaration::Function(decl) => {
                    if let Some(psi) = self.describe_function(decl)? {
                        bucket.functions.push(psi);
                    }
                }
                Declaration::Variable(decl) => {
                    if let Some(psi) = self.describe_variable(decl)? {
                        bucket.members.push(MemberPsi::Variable(psi));
                    }
                }
                Declaration::Enum(decl) => {
                    if let Some(psi) = describe_enum(decl, &module) {
                        bucket.members.push(MemberPsi::Enum(psi));
                    }
                }
            }
        }

        if module.is_main {
            for re_export in &unit.re_exports {
                self.collect_re_export(unit, re_export, &mut out.main_mappings);
            }
        }

        // Several files can fold to the same module id; later units append
        // to the bucket the first one created.
        out.psi.bucket_mut(module.id.clone()).append(bucket);
        Ok(())
    }

    fn collect_re_export(&self, unit: &SourceUnit, re_export: &ReExport, out: &mut MainMappings) {
        if !re_export.specifier.starts_with('.') {
            // External package re-export; nothing of ours to flatten.
            return;
        }
        let Some(target) = self.program.resolve_relative(unit, &re_export.specifier) else {
            warn!(
                specifier = re_export.specifier.as_ref(),
                "re-export specifier does not resolve to an analyzed unit"
            );
            return;
        };
        let target_id = self.modules.resolve(target).id;
        out.add(target_id, re_export.names.iter().cloned());
    }

    // ========================================================================
    // DECLARATION DESCRIPTORS
    // ========================================================================

    fn describe_class(
        &self,
        decl: &ClassDecl,
        module: &ModuleInfo,
    ) -> Result<Option<ClassPsi>, ResolveError> {
        if !decl.modifiers.exported {
            return Ok(None);
        }
        let doc = parse_doc(decl.doc.as_deref());
        if is_hidden(&doc) {
            return Ok(None);
        }

        let mut parents = Vec::new();
        for heritage in &decl.heritage {
            parents.extend(self.types.expand(heritage)?);
        }

        let mut properties = Vec::new();
        for property in &decl.properties {
            if let Some(psi) = self.describe_property(property, !decl.is_interface)? {
                properties.push(psi);
            }
        }

        let mut methods = Vec::new();
        for method in &decl.methods {
            if let Some(psi) = self.describe_method(method)? {
                methods.push(psi);
            }
        }
        sort_methods(&mut methods);

        Ok(Some(ClassPsi {
            module_path: format!("module:{}", module.id).into(),
            name: decl.name.clone(),
            is_interface: decl.is_interface,
            parents,
            properties,
            methods,
            doc,
        }))
    }

    fn describe_property(
        &self,
        decl: &PropertyDecl,
        in_class: bool,
    ) -> Result<Option<PropertyPsi>, ResolveError> {
        if decl.modifiers.private {
            return Ok(None);
        }
        if self.access == AccessFilter::Public && decl.modifiers.protected {
            return Ok(None);
        }

        let types = self.types.expand(&decl.type_expr)?;

        let mut is_optional =
            decl.optional || decl.default_value.is_some() || contains_tag(&types, "null");
        if !is_optional && in_class && decl.modifiers.readonly {
            is_optional = true;
        }

        Ok(Some(PropertyPsi {
            name: decl.name.clone(),
            types,
            is_optional,
            default_value: decl.default_value.clone(),
            doc: parse_doc(decl.doc.as_deref()),
        }))
    }

    fn describe_method(&self, decl: &MethodDecl) -> Result<Option<FunctionPsi>, ResolveError> {
        if decl.modifiers.private {
            return Ok(None);
        }
        if self.access == AccessFilter::Public && decl.modifiers.protected {
            return Ok(None);
        }
        let doc = parse_doc(decl.doc.as_deref());
        if is_hidden(&doc) {
            return Ok(None);
        }

        let mut tags = Vec::new();
        if decl.modifiers.protected {
            tags.push("@protected".to_string());
        }

        Ok(Some(FunctionPsi {
            name: decl.name.clone(),
            tags,
            is_protected: decl.modifiers.protected,
            doc,
            params: self.describe_params(&decl.params)?,
            return_types: self.types.expand(&decl.return_type)?,
        }))
    }

    fn describe_function(&self, decl: &FunctionDecl) -> Result<Option<FunctionPsi>, ResolveError> {
        if !decl.modifiers.exported {
            return Ok(None);
        }
        let doc = parse_doc(decl.doc.as_deref());
        if is_hidden(&doc) {
            return Ok(None);
        }

        Ok(Some(FunctionPsi {
            name: decl.name.clone(),
            tags: Vec::new(),
            is_protected: false,
            doc,
            params: self.describe_params(&decl.params)?,
            return_types: self.types.expand(&decl.return_type)?,
        }))
    }

    fn describe_params(&self, params: &[ParamDecl]) -> Result<Vec<ParamPsi>, ResolveError> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let types = match &param.type_expr {
                Some(ty) => Some(self.types.expand(ty)?),
                None => None,
            };
            out.push(ParamPsi {
                name: param.name.clone(),
                types,
            });
        }
        Ok(out)
    }

    fn describe_variable(&self, decl: &VariableDecl) -> Result<Option<VariablePsi>, ResolveError> {
        if !decl.modifiers.exported {
            return Ok(None);
        }
        let doc = parse_doc(decl.doc.as_deref());
        if is_hidden(&doc) {
            return Ok(None);
        }

        // When the checker pinned the initializer to a declared symbol,
        // that single path documents the variable; otherwise expand the
        // annotation.
        let types = match &decl.inferred_symbol {
            Some(symbol) => vec![crate::psi::TypeName::Tag(
                self.types.symbols().resolve(symbol)?,
            )],
            None => self.types.expand(&decl.type_expr)?,
        };

        Ok(Some(VariablePsi {
            name: decl.name.clone(),
            types,
            is_const: decl.is_const,
            doc,
        }))
    }
}

fn describe_enum(decl: &EnumDecl, module: &ModuleInfo) -> Option<EnumPsi> {
    if !decl.modifiers.exported {
        return None;
    }

    let id: Arc<str> = format!("module:{}.{}", module.id, decl.name).into();
    let members = decl
        .members
        .iter()
        .map(|name| EnumMemberPsi {
            name: name.clone(),
            memberof: id.clone(),
        })
        .collect();

    // readonly stays unset: an enum is obviously immutable and the tag
    // only adds noise downstream.
    Some(EnumPsi {
        id: id.clone(),
        name: decl.name.clone(),
        memberof: format!("module:{}", module.id).into(),
        readonly: false,
        doc: parse_doc(decl.doc.as_deref()),
        members,
    })
}

fn parse_doc(raw: Option<&str>) -> Option<DocComment> {
    raw.map(DocComment::parse)
}

fn is_hidden(doc: &Option<DocComment>) -> bool {
    doc.as_ref().is_some_and(DocComment::is_hidden)
}

/// Order methods for rendering: protected methods sink below public
/// ones, otherwise mutator-prefix-trimmed names compare so `getFeedURL`
/// and `setFeedURL` stay adjacent.
fn sort_methods(methods: &mut [FunctionPsi]) {
    methods.sort_by(|a, b| {
        let a_weight = u8::from(a.is_protected);
        let b_weight = u8::from(b.is_protected);
        a_weight
            .cmp(&b_weight)
            .then_with(|| trim_mutator_prefix(&a.name).cmp(&trim_mutator_prefix(&b.name)))
    });
}

fn trim_mutator_prefix(name: &str) -> String {
    let bytes = name.as_bytes();
    if name.len() > 4
        && (name.starts_with("get") || name.starts_with("set"))
        && bytes[3].is_ascii_uppercase()
    {
        let mut trimmed = String::with_capacity(name.len() - 3);
        trimmed.push(bytes[3].to_ascii_lowercase() as char);
        trimmed.push_str(&name[4..]);
        return trimmed;
    }
    name.to_string()
}
