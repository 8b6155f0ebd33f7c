//! Re-export flattening.
//!
//! Declarations re-exported from the package entry point move into the
//! entry point's PSI bucket so external references point at the
//! flattened public path. Flattening runs in two phases: plan the full
//! move set against the frozen buckets, then apply the moves and build
//! the rewrite table. Callers run it exactly once per analysis pass,
//! after extraction and before rendering.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::psi::{MainMappings, PsiBucket, PsiMap};

// ============================================================================
// REWRITE TABLE
// ============================================================================

/// Old-path -> new-path mappings produced by flattening.
#[derive(Debug, Default)]
pub struct RewriteTable {
    entries: IndexMap<Arc<str>, Arc<str>>,
}

impl RewriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rewrite from an old canonical path to its new location.
    pub fn insert(&mut self, old: impl Into<Arc<str>>, new: impl Into<Arc<str>>) {
        self.entries.insert(old.into(), new.into());
    }

    /// Rewrite a path, falling back to the input when no entry matches.
    /// Total: never fails, never drops a reference.
    pub fn apply<'p>(&'p self, path: &'p str) -> &'p str {
        self.entries.get(path).map(Arc::as_ref).unwrap_or(path)
    }

    /// The recorded rewrite for a path, if any.
    pub fn get(&self, path: &str) -> Option<&Arc<str>> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Arc<str>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// MOVE PLANNING
// ============================================================================

/// Which bucket list a re-exported name matched in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveCategory {
    Class,
    Function,
    Member,
}

/// One planned relocation of a declaration into the main bucket.
#[derive(Clone, Debug)]
pub struct PlannedMove {
    pub source_module: Arc<str>,
    pub name: Arc<str>,
    pub category: MoveCategory,
}

/// Compute the full move set for the entry point's re-exports.
///
/// Search order per name is classes, then functions, then members; the
/// first match wins. A name matching in more than one category is
/// order-dependent and flagged as ambiguous. A name matching nowhere is
/// skipped — the re-export may point at a type-only alias this engine
/// does not track.
pub fn plan_moves(psi: &PsiMap, mappings: &MainMappings) -> Vec<PlannedMove> {
    let mut moves = Vec::new();
    for (module_id, names) in mappings.iter() {
        let Some(bucket) = psi.get(module_id) else {
            warn!(module = module_id.as_ref(), "re-export source module has no documented entries");
            continue;
        };
        for name in names {
            match categorize(bucket, name) {
                Some(category) => moves.push(PlannedMove {
                    source_module: module_id.clone(),
                    name: name.clone(),
                    category,
                }),
                None => warn!(
                    module = module_id.as_ref(),
                    name = name.as_ref(),
                    "re-exported name not found in source module, skipping"
                ),
            }
        }
    }
    moves
}

fn categorize(bucket: &PsiBucket, name: &str) -> Option<MoveCategory> {
    let mut matched = Vec::new();
    if bucket.classes.iter().any(|c| c.name.as_ref() == name) {
        matched.push(MoveCategory::Class);
    }
    if bucket.functions.iter().any(|f| f.name.as_ref() == name) {
        matched.push(MoveCategory::Function);
    }
    if bucket.members.iter().any(|m| m.name().as_ref() == name) {
        matched.push(MoveCategory::Member);
    }
    if matched.len() > 1 {
        warn!(
            name,
            categories = ?matched,
            "re-exported name is ambiguous across categories; using the first match"
        );
    }
    matched.first().copied()
}

// ============================================================================
// MOVE APPLICATION
// ============================================================================

/// Apply a planned move set: splice each declaration out of its source
/// bucket into the main bucket and record class rewrites.
///
/// Only class moves produce rewrite entries — a moved class carries its
/// `module_path`, which other references name; functions and members are
/// referenced through their owning module only.
pub fn apply_moves(psi: &mut PsiMap, main_module: &str, moves: &[PlannedMove]) -> RewriteTable {
    let mut rewrites = RewriteTable::new();
    let main_path: Arc<str> = format!("module:{main_module}").into();

    for planned in moves {
        if planned.source_module.as_ref() == main_module {
            // Re-export of the entry point's own declaration; identity is
            // already the flattened one.
            continue;
        }
        let Some(source) = psi.get_mut(&planned.source_module) else {
            continue;
        };
        let moved = match planned.category {
            MoveCategory::Class => {
                let idx = source
                    .classes
                    .iter()
                    .position(|c| c.name == planned.name);
                idx.map(|idx| {
                    let mut class = source.classes.remove(idx);
                    class.module_path = main_path.clone();
                    rewrites.insert(
                        format!("module:{}.{}", planned.source_module, planned.name),
                        format!("module:{main_module}.{}", planned.name),
                    );
                    Moved::Class(class)
                })
            }
            MoveCategory::Function => {
                let idx = source
                    .functions
                    .iter()
                    .position(|f| f.name == planned.name);
                idx.map(|idx| Moved::Function(source.functions.remove(idx)))
            }
            MoveCategory::Member => {
                let idx = source
                    .members
                    .iter()
                    .position(|m| *m.name() == planned.name);
                idx.map(|idx| Moved::Member(source.members.remove(idx)))
            }
        };

        let main = psi.bucket_mut(main_module);
        match moved {
            Some(Moved::Class(class)) => main.classes.push(class),
            Some(Moved::Function(function)) => main.functions.push(function),
            Some(Moved::Member(member)) => main.members.push(member),
            None => {}
        }
    }

    rewrites
}

enum Moved {
    Class(crate::psi::ClassPsi),
    Function(crate::psi::FunctionPsi),
    Member(crate::psi::MemberPsi),
}

/// Plan and apply in one step.
pub fn flatten_re_exports(
    psi: &mut PsiMap,
    main_module: &str,
    mappings: &MainMappings,
) -> RewriteTable {
    let moves = plan_moves(psi, mappings);
    apply_moves(psi, main_module, &moves)
}
