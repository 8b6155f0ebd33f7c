//! Documentation text emission.
//!
//! Renders PSI buckets into documentation comment blocks. Every
//! reference path printed here goes through the module path mapper,
//! which applies the flattening rewrite table (identity fallback) and
//! optionally redirects unflattened internal paths to `external:` links
//! when the entry-point module is being rendered.


use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::psi::{
    ClassPsi, DocTag, EnumPsi, FunctionPsi, MemberPsi, PropertyPsi, PsiBucket, TypeName,
    VariablePsi,
};
use crate::resolve::RewriteTable;

/// One rendered module document.
#[derive(Clone, Debug)]
pub struct RenderedModule {
    pub module_id: Arc<str>,
    /// Module id flattened to a writable file stem (`/` folded to `-`).
    pub file_stem: String,
    pub text: String,
}

/// Renders PSI buckets to documentation text.
pub struct Renderer<'a> {
    rewrites: &'a RewriteTable,
    /// The entry-point module id, when the package has one.
    main_module: Option<&'a str>,
    /// Link target for references that stay on internal module paths
    /// while rendering the entry point.
    external_if_not_main: Option<&'a str>,
}

/// Per-module mapping state: rewrites plus collected external links.
struct PathMap<'a> {
    rewrites: &'a RewriteTable,
    redirect_externals: bool,
    /// external name -> owning module path, in first-use order.
    externals: IndexMap<String, String>,
}

impl PathMap<'_> {
    /// Map one reference path. Total: unmatched paths pass through.
    fn map(&mut self, path: &str) -> String {
        if !path.starts_with("module:") {
            return path.to_string();
        }
        if let Some(rewritten) = self.rewrites.get(path) {
            return rewritten.to_string();
        }
        if self.redirect_externals {
            // module:<inner/module>.<Name> renders as external:<Name>,
            // with a footnote pointing at the externally-published docs.
            if let Some(dot) = path.rfind('.') {
                let name = &path[dot + 1..];
                let module = &path[path.find(':').map_or(0, |c| c + 1)..dot];
                self.externals.insert(name.to_string(), module.to_string());
                return format!("external:{name}");
            }
        }
        path.to_string()
    }
}

impl<'a> Renderer<'a> {
    pub fn new(
        rewrites: &'a RewriteTable,
        main_module: Option<&'a str>,
        external_if_not_main: Option<&'a str>,
    ) -> Self {
        Self {
            rewrites,
            main_module,
            external_if_not_main,
        }
    }

    /// Render one module's bucket. Returns `None` when nothing in the
    /// bucket produced text.
    pub fn render_module(&self, module_id: &str, bucket: &PsiBucket) -> Option<RenderedModule> {
        let mut paths = PathMap {
            rewrites: self.rewrites,
            redirect_externals: self.external_if_not_main.is_some()
                && self.main_module == Some(module_id),
            externals: IndexMap::new(),
        };

        let mut body = String::new();
        for member in sorted_by_name(&bucket.members, |m| m.name()) {
            match member {
                MemberPsi::Variable(variable) => {
                    body.push_str(&self.render_variable(variable, &mut paths));
                }
                MemberPsi::Enum(descriptor) => {
                    body.push_str(&render_enum(descriptor));
                }
            }
        }
        for class in sorted_by_name(&bucket.classes, |c| &c.name) {
            body.push_str(&self.render_class(class, &mut paths));
        }
        for function in sorted_by_name(&bucket.functions, |f| &f.name) {
            body.push_str(&self.render_function(function, None, "", &mut paths));
        }

        if body.is_empty() {
            return None;
        }

        let mut text = String::new();
        if let Some(external) = self.external_if_not_main {
            for (name, module) in &paths.externals {
                text.push_str(&format!(
                    "/**\n* @external {name}\n* @see {external}#module_{module}.{name}\n*/\n"
                ));
            }
        }
        text.push_str(&format!("/**\n * @module {module_id}\n */\n\n{body}"));

        Some(RenderedModule {
            module_id: module_id.into(),
            file_stem: module_id.replace('/', "-"),
            text,
        })
    }

    // ========================================================================
    // ENTRIES
    // ========================================================================

    fn render_class(&self, class: &ClassPsi, paths: &mut PathMap<'_>) -> String {
        let mut tags: Vec<String> = Vec::new();

        if class.is_interface {
            tags.push(format!("@interface {}.{}", class.module_path, class.name));
        }
        for parent in &class.parents {
            // Subtype arguments are dropped: the tag expects a namepath,
            // not a type expression.
            tags.push(format!("@extends {}", paths.map(parent.base())));
        }

        render_property_tags(&class.properties, &mut tags, paths);

        let description = match &class.doc {
            Some(doc) => {
                for tag in &doc.tags {
                    tags.push(print_tag(tag));
                }
                doc.description.clone()
            }
            None => String::new(),
        };

        let mut result = format_comment("", &description, &tags);
        result.push_str(&format!("export class {} {{\n", class.name));
        for (idx, method) in class.methods.iter().enumerate() {
            result.push_str(&self.render_function(method, Some(class), "  ", paths));
            if idx + 1 != class.methods.len() {
                result.push('\n');
            }
        }
        result.push_str("}\n\n");
        result
    }

    fn render_function(
        &self,
        function: &FunctionPsi,
        class: Option<&ClassPsi>,
        indent: &str,
        paths: &mut PathMap<'_>,
    ) -> String {
        let mut tags = function.tags.clone();

        let mut param_docs: IndexMap<&str, &DocTag> = IndexMap::new();
        let mut returns_doc: Option<&DocTag> = None;
        if let Some(doc) = &function.doc {
            for tag in &doc.tags {
                match tag.title.as_ref() {
                    "param" => {
                        if let Some(name) = &tag.name {
                            param_docs.insert(name.as_str(), tag);
                        }
                    }
                    "returns" | "return" => returns_doc = Some(tag),
                    _ => tags.push(print_tag(tag)),
                }
            }
        }

        for param in &function.params {
            let mut text = "@param".to_string();
            if let Some(types) = &param.types {
                text.push_str(&format!(" {}", render_types(types, paths)));
            }
            text.push_str(&format!(" {}", param.name));
            if let Some(description) = param_docs
                .get(param.name.as_ref())
                .and_then(|tag| tag.description.as_deref())
            {
                text.push_str(&format!(" {description}"));
            }
            tags.push(text);
        }

        if let Some(class) = class {
            // Anchors the method to its owning class for tools that do not
            // infer membership from the surrounding block.
            tags.push(format!(
                "@function {}.{}#{}",
                class.module_path, class.name, function.name
            ));
        }

        if !crate::psi::contains_tag(&function.return_types, "void") {
            let mut text = format!("@returns {}", render_types(&function.return_types, paths));
            if let Some(description) = returns_doc.and_then(|tag| tag.description.as_deref()) {
                text.push_str(&format!(" {description}"));
            }
            tags.push(text);
        }

        let description = function
            .doc
            .as_ref()
            .map(|doc| doc.description.clone())
            .unwrap_or_default();
        let mut result = format_comment(indent, &description, &tags);
        result.push_str(indent);
        if class.is_none() {
            result.push_str("export function ");
        }
        result.push_str(&format!("{}() {{}}\n", function.name));
        result
    }

    fn render_variable(&self, variable: &VariablePsi, paths: &mut PathMap<'_>) -> String {
        let mut tags = vec![format!("@type {}", render_types(&variable.types, paths))];
        if variable.is_const {
            tags.push("@constant".to_string());
        }

        let description = match &variable.doc {
            Some(doc) => {
                for tag in &doc.tags {
                    tags.push(print_tag(tag));
                }
                doc.description.clone()
            }
            None => String::new(),
        };

        let mut result = format_comment("", &description, &tags);
        // Always emitted as `var`: downstream tooling cannot parse const.
        result.push_str(&format!("export var {}\n", variable.name));
        result
    }
}

fn render_enum(descriptor: &EnumPsi) -> String {
    let mut tags = vec!["@enum {number}".to_string()];
    if descriptor.readonly {
        tags.push("@readonly".to_string());
    }
    for member in &descriptor.members {
        tags.push(format!("@property {}", member.name));
    }

    let description = descriptor
        .doc
        .as_ref()
        .map(|doc| doc.description.clone())
        .unwrap_or_default();
    let mut result = format_comment("", &description, &tags);
    result.push_str(&format!("export var {}\n", descriptor.name));
    result
}

// ============================================================================
// TAG AND COMMENT FORMATTING
// ============================================================================

fn render_property_tags(properties: &[PropertyPsi], tags: &mut Vec<String>, paths: &mut PathMap<'_>) {
    'properties: for property in properties {
        let mut default_value = property.default_value.clone();
        let mut is_optional = property.is_optional;
        let mut description = property
            .doc
            .as_ref()
            .map(|doc| doc.description.clone())
            .unwrap_or_default();

        if let Some(doc) = &property.doc {
            for tag in &doc.tags {
                match tag.title.as_ref() {
                    "default" => default_value = tag.description.clone(),
                    "private" => continue 'properties,
                    "required" => is_optional = false,
                    "see" => {
                        if let Some(text) = &tag.description {
                            description.push_str(&format!("\nSee: {text}"));
                        }
                    }
                    "deprecated" => {
                        if let Some(text) = &tag.description {
                            description.push_str(&format!("\nDeprecated: {text}"));
                        }
                    }
                    other => warn!(
                        property = property.name.as_ref(),
                        tag = other,
                        "property-level tag is not supported"
                    ),
                }
            }
        }

        let mut result = format!("@property {} ", render_types(&property.types, paths));
        if is_optional {
            result.push('[');
        }
        result.push_str(&property.name);
        if let Some(value) = &default_value {
            result.push_str(&format!("={value}"));
        }
        if is_optional {
            result.push(']');
        }

        let description = description.trim();
        if !description.is_empty() {
            // A single newline in doc source is a formatting break, not a
            // paragraph; fold it to a space and keep paragraph breaks.
            let folded = description.replace("\n\n", "<br><br>").replace('\n', " ");
            result.push_str(&format!(" {folded}"));
        }
        tags.push(result);
    }
}

fn render_types(types: &[TypeName], paths: &mut PathMap<'_>) -> String {
    format!("{{{}}}", render_type_list(types, paths))
}

fn render_type_list(types: &[TypeName], paths: &mut PathMap<'_>) -> String {
    types
        .iter()
        .map(|ty| render_type(ty, paths))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_type(ty: &TypeName, paths: &mut PathMap<'_>) -> String {
    match ty {
        TypeName::Tag(text) => paths.map(text),
        TypeName::Parameterized { name, args } => {
            format!("{}<{}>", paths.map(name), render_type_list(args, paths))
        }
    }
}

fn print_tag(tag: &DocTag) -> String {
    let mut text = format!("@{}", tag.title);
    if let Some(name) = &tag.name {
        text.push_str(&format!(" {name}"));
    }
    if let Some(description) = &tag.description {
        text.push_str(&format!(" {description}"));
    }
    text
}

fn format_comment(indent: &str, description: &str, tags: &[String]) -> String {
    let mut result = format!("{indent}/**\n");
    if !description.is_empty() {
        let normalized = description
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(&format!("\n{indent} * "));
        result.push_str(&format!("{indent} * {normalized}\n"));
    }
    // Structured tags always follow the user's description.
    for tag in tags {
        result.push_str(&format!("{indent} * {tag}\n"));
    }
    result.push_str(&format!("{indent} */\n"));
    result
}

fn sorted_by_name<'e, T, F>(entries: &'e [T], name: F) -> Vec<&'e T>
where
    F: Fn(&T) -> &Arc<str>,
{
    let mut sorted: Vec<&T> = entries.iter().collect();
    sorted.sort_by(|a, b| name(a).cmp(name(b)));
    sorted
}
