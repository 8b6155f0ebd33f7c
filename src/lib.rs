//! # psidoc-base
//!
//! Core library for documentation PSI generation: canonical module
//! identity, symbol path resolution, type reference expansion, and
//! re-export flattening over a type-checked program model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → one-shot driver (analyze, render), doc options
//!   ↓
//! render    → doc comment emission, rewrite-table application
//!   ↓
//! extract   → declaration walk producing PSI buckets + re-export mappings
//!   ↓
//! resolve   → module identity, symbol paths, type expansion, flattening
//!   ↓
//! psi       → documentation IR (buckets, type names, doc comments)
//!   ↓
//! program   → type-checked input model (units, scopes, type expressions)
//!   ↓
//! base      → primitives (FileId, path arithmetic)
//! ```

// ============================================================================
// MODULES (dependency order: base → program → psi → resolve → extract →
// render → pipeline)
// ============================================================================

/// Foundation types: FileId, path arithmetic
pub mod base;

/// Type-checked program model supplied by the embedder
pub mod program;

/// Documentation IR: PSI buckets, type names, doc comments
pub mod psi;

/// Resolution engine: module identity, symbol paths, flattening
pub mod resolve;

/// Declaration extraction into PSI buckets
pub mod extract;

/// Documentation text rendering
pub mod render;

/// One-shot analysis driver and doc options
pub mod pipeline;

// Re-export foundation types
pub use base::FileId;

// Re-export the resolution surface most embedders touch
pub use resolve::{AnalysisOptions, ModuleIdResolver, ResolveError, RewriteTable};
