//! Module identity resolution.
//!
//! Maps a source unit to the canonical module identifier used in every
//! documentation reference. Published identifiers mirror the compiled
//! output layout, not the source layout, which is why the relative
//! output directory participates in the computed id.

use std::sync::Arc;

use crate::base::paths;
use crate::program::SourceUnit;

/// Sentinel module id for well-known platform ambient typings.
pub const NODE_MODULE_ID: &str = "node";

/// Identity-affecting configuration for one analysis pass.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// The package-level module name, when the analyzed tree is a
    /// published package.
    pub package_name: Option<Arc<str>>,
    /// The package's declared entry point (compiled path, e.g.
    /// `out/main.js`). When absent, a file stem of `main` marks the
    /// entry point.
    pub main_file: Option<Arc<str>>,
    /// Common ancestor directory of all analyzed source units.
    pub common_source_dir: Arc<str>,
    /// Compiled output directory relative to the package root.
    pub relative_out_dir: Arc<str>,
    /// Prefix stripped from ambient-declaration identifiers.
    pub base_url: Option<Arc<str>>,
    /// File name suffix recognized as platform ambient typings.
    pub platform_typings_suffix: Arc<str>,
}

impl AnalysisOptions {
    pub fn new(
        package_name: Option<Arc<str>>,
        main_file: Option<Arc<str>>,
        common_source_dir: impl Into<Arc<str>>,
        relative_out_dir: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            package_name,
            main_file,
            common_source_dir: common_source_dir.into(),
            relative_out_dir: relative_out_dir.into(),
            base_url: None,
            platform_typings_suffix: "node.d.ts".into(),
        }
    }

    /// Set the ambient base-url prefix.
    pub fn with_base_url(mut self, base_url: impl Into<Arc<str>>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// The resolved identity of one source unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleInfo {
    pub id: Arc<str>,
    /// Whether the unit is the package entry point. Entry-point identity
    /// collapses to the bare package name and anchors re-export
    /// flattening.
    pub is_main: bool,
}

/// Resolves source units to module identifiers.
///
/// Resolution is a pure function of the unit and the options: identical
/// inputs yield the identical identifier within one run and across runs.
#[derive(Clone, Copy, Debug)]
pub struct ModuleIdResolver<'a> {
    options: &'a AnalysisOptions,
}

impl<'a> ModuleIdResolver<'a> {
    pub fn new(options: &'a AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        self.options
    }

    /// Compute the module identity of a source unit.
    pub fn resolve(&self, unit: &SourceUnit) -> ModuleInfo {
        if unit.is_declaration_only {
            return self.resolve_declaration_only(unit);
        }

        let stem = paths::strip_extension(&unit.path);
        let name = paths::relative(&self.options.common_source_dir, stem);

        let mut id = match &self.options.package_name {
            Some(package) => {
                let mut id = package.to_string();
                if name != "index" {
                    id.push('/');
                    id.push_str(&self.options.relative_out_dir);
                }
                id
            }
            None => self.options.relative_out_dir.to_string(),
        };
        if name != "index" {
            id.push('/');
            id.push_str(&name);
        }

        let is_main = match &self.options.main_file {
            None => stem.ends_with("/main") || stem == "main",
            Some(main) => {
                let main_tail = paths::relative(&self.options.relative_out_dir, main);
                format!("{stem}.js").contains(&main_tail)
            }
        };
        if is_main {
            if let Some(package) = &self.options.package_name {
                id = package.to_string();
            }
        }

        ModuleInfo {
            id: id.into(),
            is_main,
        }
    }

    fn resolve_declaration_only(&self, unit: &SourceUnit) -> ModuleInfo {
        if unit.path.ends_with(self.options.platform_typings_suffix.as_ref()) {
            return ModuleInfo {
                id: NODE_MODULE_ID.into(),
                is_main: false,
            };
        }

        let mut stem = paths::strip_suffix(&unit.path, ".d.ts");
        if let Some(base_url) = &self.options.base_url {
            if let Some(rest) = stem.strip_prefix(base_url.as_ref()) {
                stem = rest.strip_prefix('/').unwrap_or(rest);
            }
        }
        ModuleInfo {
            id: stem.into(),
            is_main: false,
        }
    }
}
