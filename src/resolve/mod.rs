//! The symbol and module identity resolution engine.
//!
//! Everything documentation-facing addresses declarations through the
//! canonical paths computed here:
//!
//! 1. [`ModuleIdResolver`] maps a source unit to its module identifier —
//!    a pure function of the unit's path and the analysis options.
//! 2. [`SymbolPathResolver`] walks a symbol's owner chain and builds its
//!    canonical reference path (`module:<id>.<name>` or `<ns>:<name>`).
//! 3. [`TypeNameExpander`] turns an arbitrary checked type expression
//!    into the ordered list of reference alternatives the renderer
//!    prints.
//! 4. [`flatten_re_exports`] rewrites the identity of declarations
//!    re-exported from the package entry point, producing the
//!    [`RewriteTable`] applied to every rendered reference.
//!
//! Resolution is fail-fast: an unresolvable symbol aborts the pass with
//! [`ResolveError`] instead of degrading to a wrong-but-silent path.

mod error;
mod flatten;
mod module_id;
mod symbol_path;
mod type_names;


pub use error::ResolveError;
pub use flatten::{
    MoveCategory, PlannedMove, RewriteTable, apply_moves, flatten_re_exports, plan_moves,
};
pub use module_id::{AnalysisOptions, ModuleIdResolver, ModuleInfo, NODE_MODULE_ID};
pub use symbol_path::SymbolPathResolver;
pub use type_names::TypeNameExpander;
