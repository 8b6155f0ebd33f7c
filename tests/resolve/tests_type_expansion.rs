//! Type expansion over realistic signatures.

use psidoc::program::{TypeExpr, TypeSymbol};
use psidoc::psi::TypeName;
use psidoc::resolve::{ModuleIdResolver, SymbolPathResolver, TypeNameExpander};

use crate::helpers::program_fixtures::{pkg_options, pkg_program, util_symbol};

fn tags(names: &[TypeName]) -> Vec<String> {
    names
        .iter()
        .map(|name| match name {
            TypeName::Tag(text) => text.to_string(),
            TypeName::Parameterized { name, args } => {
                format!("{name}<{}>", tags(args).join(" | "))
            }
        })
        .collect()
}

fn with_expander<R>(run: impl FnOnce(TypeNameExpander<'_>) -> R) -> R {
    let program = pkg_program();
    let options = pkg_options();
    let expander = TypeNameExpander::new(SymbolPathResolver::new(
        &program,
        ModuleIdResolver::new(&options),
    ));
    run(expander)
}

#[test]
fn test_literal_union_keeps_declaration_order() {
    // `"github" | "bintray" | "s3" | "generic"`
    let ty = TypeExpr::Union(vec![
        TypeExpr::literal("github"),
        TypeExpr::literal("bintray"),
        TypeExpr::literal("s3"),
        TypeExpr::literal("generic"),
    ]);
    with_expander(|expander| {
        let names = expander.expand(&ty).unwrap();
        assert_eq!(
            tags(&names),
            ["\"github\"", "\"bintray\"", "\"s3\"", "\"generic\""]
        );
    });
}

#[test]
fn test_nullable_property_type_keeps_null_alternative() {
    // `string | null`, never deduplicated or alphabetized
    let ty = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Null]);
    with_expander(|expander| {
        let names = expander.expand(&ty).unwrap();
        assert_eq!(tags(&names), ["string", "null"]);
    });
}

#[test]
fn test_nested_unions_flatten_to_one_alternative_list() {
    let nested = TypeExpr::Union(vec![
        TypeExpr::literal("private"),
        TypeExpr::Union(vec![TypeExpr::literal("public-read"), TypeExpr::Null]),
    ]);
    with_expander(|expander| {
        let names = expander.expand(&nested).unwrap();
        assert_eq!(tags(&names), ["\"private\"", "\"public-read\"", "null"]);
    });
}

#[test]
fn test_function_and_object_types_collapse_to_fixed_tags() {
    let ty = TypeExpr::Union(vec![TypeExpr::Function, TypeExpr::ObjectLiteral]);
    with_expander(|expander| {
        let names = expander.expand(&ty).unwrap();
        assert_eq!(tags(&names), ["callback", "Object.<string, any>"]);
    });
}

#[test]
fn test_generic_instantiation_carries_resolved_paths() {
    // `Promise<Helper>` with an ambient Promise and a project-local Helper
    let ty = TypeExpr::instantiated(
        TypeSymbol::ambient("Promise"),
        vec![TypeExpr::named(util_symbol("Helper"))],
    );
    with_expander(|expander| {
        let names = expander.expand(&ty).unwrap();
        assert_eq!(tags(&names), ["Promise<module:pkg/out/util.Helper>"]);
    });
}

#[test]
fn test_single_unresolvable_constituent_fails_the_expansion() {
    let ty = TypeExpr::Union(vec![
        TypeExpr::String,
        TypeExpr::named(TypeSymbol::detached("Mystery")),
        TypeExpr::Number,
    ]);
    with_expander(|expander| {
        assert!(expander.expand(&ty).is_err());
    });
}
