//! One-shot analysis driver.
//!
//! Ties the stages together in their required order: extraction over
//! the whole program, one flattening pass, then per-module rendering
//! with the rewrite table applied. Configuration preconditions are
//! checked before any resolution begins.


use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::base::paths;
use crate::extract::{AccessFilter, Extractor};
use crate::program::Program;
use crate::psi::PsiMap;
use crate::render::{RenderedModule, Renderer};
use crate::resolve::{AnalysisOptions, ResolveError, RewriteTable, flatten_re_exports};

// ============================================================================
// OPTIONS
// ============================================================================

/// Documentation options from the host tool's config block.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocOptions {
    /// Output directory for rendered module files.
    pub out: String,
    /// Access filter: `"public"` drops protected members.
    #[serde(default)]
    pub access: Option<String>,
    /// Base link for references that stay on internal module paths in
    /// the entry-point module.
    #[serde(default)]
    pub external_if_not_main: Option<String>,
}

impl DocOptions {
    /// Parse the config block. A bare string is shorthand for the output
    /// directory.
    pub fn from_config(value: &serde_json::Value) -> Result<Self, ConfigError> {
        match value {
            serde_json::Value::String(out) => Ok(Self {
                out: out.clone(),
                access: None,
                external_if_not_main: None,
            }),
            other => {
                serde_json::from_value(other.clone()).map_err(|_| ConfigError::MissingDocOutput)
            }
        }
    }

    /// The access filter the options select.
    pub fn access_filter(&self) -> AccessFilter {
        match self.access.as_deref() {
            Some("public") => AccessFilter::Public,
            _ => AccessFilter::All,
        }
    }
}

/// Configuration-level failures, raised before any resolution begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The compiler configuration does not name an output directory, so
    /// module identifiers cannot mirror the compiled layout.
    #[error("outDir is not specified in the compiler options")]
    MissingOutputDir,

    /// The documentation config block does not name an output directory.
    #[error("no documentation output directory specified")]
    MissingDocOutput,
}

/// Compute the output directory relative to the package root, failing
/// when the compiler configuration omits it.
pub fn resolve_out_dir(
    base_path: &str,
    compiler_out_dir: Option<&str>,
) -> Result<Arc<str>, ConfigError> {
    let out_dir = compiler_out_dir.ok_or(ConfigError::MissingOutputDir)?;
    Ok(paths::relative(base_path, out_dir).into())
}

// ============================================================================
// ANALYSIS
// ============================================================================

/// The analysis output handed to rendering and the embedder.
#[derive(Debug)]
pub struct Analysis {
    pub psi: PsiMap,
    pub rewrites: RewriteTable,
    /// The entry-point module id, when the package has one.
    pub main_module: Option<Arc<str>>,
}

/// Run extraction and flattening over a fully-built program.
///
/// Flattening runs exactly once, after extraction completes; running it
/// again on the mutated buckets would find nothing left to move.
pub fn analyze(
    program: &Program,
    options: &AnalysisOptions,
    access: AccessFilter,
) -> Result<Analysis, ResolveError> {
    let extraction = Extractor::new(program, options, access).run()?;
    let mut psi = extraction.psi;

    let rewrites = match &options.package_name {
        Some(package) => flatten_re_exports(&mut psi, package, &extraction.main_mappings),
        None => RewriteTable::new(),
    };

    Ok(Analysis {
        psi,
        rewrites,
        main_module: options.package_name.clone(),
    })
}

/// Render every non-empty module of an analysis.
pub fn render_modules(analysis: &Analysis, options: &DocOptions) -> Vec<RenderedModule> {
    let renderer = Renderer::new(
        &analysis.rewrites,
        analysis.main_module.as_deref(),
        options.external_if_not_main.as_deref(),
    );
    analysis
        .psi
        .iter()
        .filter_map(|(module_id, bucket)| renderer.render_module(module_id, bucket))
        .collect()
}
