//! Builders for program models used across integration tests.
//!
//! The fixtures model a small publishing library: an entry point that
//! re-exports the updater class, a util module with helpers, and a
//! publish-options module with interfaces in the style of real
//! published packages.

use std::sync::Arc;

use psidoc::base::FileId;
use psidoc::program::{
    ClassDecl, Declaration, EnumDecl, FunctionDecl, MethodDecl, Modifiers, ParamDecl, Program,
    PropertyDecl, ReExport, SourceUnit, TypeExpr, TypeSymbol, VariableDecl,
};
use psidoc::resolve::AnalysisOptions;

/// Analysis options for the `pkg` fixture package (sources under `lib`,
/// compiled to `out`, entry inferred from the `main` stem).
pub fn pkg_options() -> AnalysisOptions {
    AnalysisOptions::new(Some("pkg".into()), None, "lib", "out")
}

pub fn class_decl(name: &str) -> ClassDecl {
    ClassDecl {
        name: name.into(),
        modifiers: Modifiers::exported(),
        doc: None,
        is_interface: false,
        heritage: Vec::new(),
        properties: Vec::new(),
        methods: Vec::new(),
    }
}

pub fn interface_decl(name: &str) -> ClassDecl {
    ClassDecl {
        is_interface: true,
        ..class_decl(name)
    }
}

pub fn function_decl(name: &str, return_type: TypeExpr) -> FunctionDecl {
    FunctionDecl {
        name: name.into(),
        modifiers: Modifiers::exported(),
        doc: None,
        params: Vec::new(),
        return_type,
    }
}

pub fn method_decl(name: &str, return_type: TypeExpr) -> MethodDecl {
    MethodDecl {
        name: name.into(),
        modifiers: Modifiers::none(),
        doc: None,
        params: Vec::new(),
        return_type,
    }
}

pub fn param(name: &str, type_expr: TypeExpr) -> ParamDecl {
    ParamDecl {
        name: name.into(),
        type_expr: Some(type_expr),
    }
}

pub fn property_decl(name: &str, type_expr: TypeExpr) -> PropertyDecl {
    PropertyDecl {
        name: name.into(),
        modifiers: Modifiers::none(),
        doc: None,
        type_expr,
        optional: false,
        default_value: None,
    }
}

pub fn variable_decl(name: &str, type_expr: TypeExpr) -> VariableDecl {
    VariableDecl {
        name: name.into(),
        modifiers: Modifiers::exported(),
        doc: None,
        type_expr,
        inferred_symbol: None,
        is_const: false,
    }
}

pub fn enum_decl(name: &str, members: &[&str]) -> EnumDecl {
    EnumDecl {
        name: name.into(),
        modifiers: Modifiers::exported(),
        doc: None,
        members: members.iter().map(|m| Arc::from(*m)).collect(),
    }
}

pub fn re_export(specifier: &str, names: &[&str]) -> ReExport {
    ReExport {
        specifier: specifier.into(),
        names: names.iter().map(|n| Arc::from(*n)).collect(),
    }
}

/// A unit at `path` with the given declarations.
pub fn unit(file: u32, path: &str, declarations: Vec<Declaration>) -> SourceUnit {
    let mut unit = SourceUnit::new(FileId::new(file), path);
    unit.declarations = declarations;
    unit
}

/// The standard fixture: `lib/main.ts` re-exports `Helper` from
/// `lib/util.ts`, which also declares a function and a variable.
pub fn pkg_program() -> Program {
    let mut main = unit(
        0,
        "lib/main.ts",
        vec![Declaration::Class(class_decl("AppUpdater"))],
    );
    main.re_exports = vec![re_export("./util", &["Helper"])];

    let util = unit(
        1,
        "lib/util.ts",
        vec![
            Declaration::Class(class_decl("Helper")),
            Declaration::Function(function_decl("doWork", TypeExpr::Void)),
            Declaration::Variable(variable_decl(
                "channel",
                TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Null]),
            )),
        ],
    );

    Program::new(vec![main, util])
}

/// A symbol declared at the top level of the fixture's util unit.
pub fn util_symbol(name: &str) -> TypeSymbol {
    TypeSymbol::in_unit(name, FileId::new(1))
}
