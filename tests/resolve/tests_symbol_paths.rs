//! Symbol path resolution through owner chains.

use psidoc::base::FileId;
use psidoc::program::{Scope, TypeSymbol};
use psidoc::resolve::{ModuleIdResolver, SymbolPathResolver};

use crate::helpers::program_fixtures::{pkg_options, pkg_program, util_symbol};

#[test]
fn test_top_level_symbol_addresses_through_module_identity() {
    let program = pkg_program();
    let options = pkg_options();
    let resolver = SymbolPathResolver::new(&program, ModuleIdResolver::new(&options));

    let path = resolver.resolve(&util_symbol("Helper")).unwrap();
    assert_eq!(path.as_ref(), "module:pkg/out/util.Helper");
}

#[test]
fn test_entry_point_symbol_addresses_through_package_name() {
    let program = pkg_program();
    let options = pkg_options();
    let resolver = SymbolPathResolver::new(&program, ModuleIdResolver::new(&options));

    let symbol = TypeSymbol::in_unit("AppUpdater", FileId::new(0));
    assert_eq!(resolver.resolve(&symbol).unwrap().as_ref(), "module:pkg.AppUpdater");
}

#[test]
fn test_namespace_styles_pick_their_addressing() {
    let program = pkg_program();
    let options = pkg_options();
    let resolver = SymbolPathResolver::new(&program, ModuleIdResolver::new(&options));

    let plain = TypeSymbol::new(
        "RequestOptions",
        Scope::plain_namespace("Electron", Some(Scope::unit(FileId::new(1)))),
    );
    assert_eq!(resolver.resolve(&plain).unwrap().as_ref(), "Electron:RequestOptions");

    let module_style = TypeSymbol::new(
        "IncomingMessage",
        Scope::module_namespace("http", Some(Scope::unit(FileId::new(1)))),
    );
    assert_eq!(
        resolver.resolve(&module_style).unwrap().as_ref(),
        "module:http.IncomingMessage"
    );
}

#[test]
fn test_deeply_nested_namespaces_address_via_outermost() {
    let program = pkg_program();
    let options = pkg_options();
    let resolver = SymbolPathResolver::new(&program, ModuleIdResolver::new(&options));

    let outer = Scope::plain_namespace("A", Some(Scope::unit(FileId::new(1))));
    let middle = Scope::plain_namespace("B", Some(outer));
    let inner = Scope::plain_namespace("C", Some(middle));

    let symbol = TypeSymbol::new("Leaf", inner);
    assert_eq!(resolver.resolve(&symbol).unwrap().as_ref(), "A:Leaf");
}

#[test]
fn test_ambient_symbols_stay_bare_and_unrewritten() {
    let program = pkg_program();
    let options = pkg_options();
    let resolver = SymbolPathResolver::new(&program, ModuleIdResolver::new(&options));

    for name in ["Error", "Promise", "Array"] {
        assert_eq!(
            resolver.resolve(&TypeSymbol::ambient(name)).unwrap().as_ref(),
            name
        );
    }
}

#[test]
fn test_unresolvable_owner_chain_is_surfaced() {
    let program = pkg_program();
    let options = pkg_options();
    let resolver = SymbolPathResolver::new(&program, ModuleIdResolver::new(&options));

    assert!(resolver.resolve(&TypeSymbol::detached("Orphan")).is_err());
}
