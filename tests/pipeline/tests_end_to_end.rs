//! Whole-pipeline scenarios modeled on a real publishing library:
//! options interfaces with nullable properties, an updater class behind
//! the entry point, and re-exported helpers.

use serde_json::json;

use psidoc::extract::AccessFilter;
use psidoc::pipeline::{DocOptions, analyze, render_modules};
use psidoc::program::{Declaration, Modifiers, Program, TypeExpr};

use crate::helpers::program_fixtures::*;

fn publish_program() -> Program {
    let mut publish_options = interface_decl("PublishConfiguration");
    publish_options.doc = Some(
        "Can be specified in the config or any platform-specific options.".into(),
    );
    publish_options.properties = vec![
        {
            let mut p = property_decl(
                "provider",
                TypeExpr::Union(vec![
                    TypeExpr::literal("github"),
                    TypeExpr::literal("s3"),
                    TypeExpr::literal("generic"),
                ]),
            );
            p.doc = Some("The provider.".into());
            p.modifiers = Modifiers {
                readonly: true,
                ..Modifiers::none()
            };
            p
        },
        {
            let mut p = property_decl(
                "owner",
                TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Null]),
            );
            p.doc = Some("The owner.".into());
            p.optional = true;
            p
        },
        {
            let mut p = property_decl(
                "channel",
                TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Null]),
            );
            p.doc = Some("The channel.\n@default latest".into());
            p.optional = true;
            p
        },
    ];

    let mut updater = class_decl("AppUpdater");
    updater.methods = vec![
        method_decl("checkForUpdates", TypeExpr::Void),
        {
            let mut m = method_decl("setFeedURL", TypeExpr::Void);
            m.params = vec![param(
                "options",
                TypeExpr::named(util_symbol("Helper")),
            )];
            m
        },
        {
            let mut m = method_decl("doDownloadUpdate", TypeExpr::Void);
            m.modifiers = Modifiers {
                protected: true,
                ..Modifiers::none()
            };
            m
        },
    ];

    let mut main = unit(0, "lib/main.ts", vec![Declaration::Class(updater)]);
    main.re_exports = vec![re_export("./util", &["Helper"]), re_export("./publishOptions", &["PublishConfiguration"])];

    let util = unit(
        1,
        "lib/util.ts",
        vec![
            Declaration::Class(class_decl("Helper")),
            Declaration::Enum(enum_decl("UpdateStatus", &["Idle", "Downloading"])),
        ],
    );

    let publish = unit(
        2,
        "lib/publishOptions.ts",
        vec![Declaration::Class(publish_options)],
    );

    Program::new(vec![main, util, publish])
}

#[test]
fn test_analysis_flattens_both_re_exports() {
    let program = publish_program();
    let analysis = analyze(&program, &pkg_options(), AccessFilter::All).unwrap();

    let main = analysis.psi.get("pkg").unwrap();
    let class_names: Vec<&str> = main.classes.iter().map(|c| c.name.as_ref()).collect();
    assert_eq!(class_names, ["AppUpdater", "Helper", "PublishConfiguration"]);

    assert_eq!(
        analysis.rewrites.apply("module:pkg/out/util.Helper"),
        "module:pkg.Helper"
    );
    assert_eq!(
        analysis
            .rewrites
            .apply("module:pkg/out/publishOptions.PublishConfiguration"),
        "module:pkg.PublishConfiguration"
    );
}

#[test]
fn test_rendered_entry_point_uses_flattened_references() {
    let program = publish_program();
    let analysis = analyze(&program, &pkg_options(), AccessFilter::All).unwrap();
    let options = DocOptions::from_config(&json!("jsdoc-out")).unwrap();

    let rendered = render_modules(&analysis, &options);
    let main = rendered
        .iter()
        .find(|m| m.module_id.as_ref() == "pkg")
        .unwrap();

    // The parameter typed with the re-exported class points at the
    // flattened path, not the internal module.
    assert!(main.text.contains("@param {module:pkg.Helper} options"));
    assert!(!main.text.contains("module:pkg/out/util.Helper"));

    // Readonly on an interface does not imply optional.
    assert!(
        main.text
            .contains("@property {\"github\" | \"s3\" | \"generic\"} provider The provider.")
    );
    // Nullable properties document as optional with both alternatives.
    assert!(main.text.contains("@property {string | null} [owner] The owner."));
    // The @default doc tag feeds the rendered default value.
    assert!(main.text.contains("[channel=latest] The channel."));
}

#[test]
fn test_un_flattened_enum_stays_in_util_module() {
    let program = publish_program();
    let analysis = analyze(&program, &pkg_options(), AccessFilter::All).unwrap();
    let options = DocOptions::from_config(&json!("jsdoc-out")).unwrap();

    let rendered = render_modules(&analysis, &options);
    let util = rendered
        .iter()
        .find(|m| m.module_id.as_ref() == "pkg/out/util")
        .unwrap();
    assert!(util.text.contains("@enum {number}"));
    assert!(util.text.contains("export var UpdateStatus"));
}

#[test]
fn test_public_access_filter_drops_protected_method_end_to_end() {
    let program = publish_program();
    let options = DocOptions::from_config(&json!({
        "out": "jsdoc-out",
        "access": "public",
    }))
    .unwrap();
    let analysis = analyze(&program, &pkg_options(), options.access_filter()).unwrap();

    let rendered = render_modules(&analysis, &options);
    let main = rendered
        .iter()
        .find(|m| m.module_id.as_ref() == "pkg")
        .unwrap();
    assert!(!main.text.contains("doDownloadUpdate"));
    assert!(main.text.contains("checkForUpdates"));
}

#[test]
fn test_rendered_modules_write_as_flat_files() {
    let program = publish_program();
    let analysis = analyze(&program, &pkg_options(), AccessFilter::All).unwrap();
    let options = DocOptions::from_config(&json!("jsdoc-out")).unwrap();

    let out = tempfile::tempdir().unwrap();
    for module in render_modules(&analysis, &options) {
        let path = out.path().join(format!("{}.js", module.file_stem));
        std::fs::write(&path, &module.text).unwrap();
    }

    assert!(out.path().join("pkg.js").exists());
    assert!(out.path().join("pkg-out-util.js").exists());
}

#[test]
fn test_protected_method_sorts_after_public_ones() {
    let program = publish_program();
    let analysis = analyze(&program, &pkg_options(), AccessFilter::All).unwrap();

    let main = analysis.psi.get("pkg").unwrap();
    let updater = main
        .classes
        .iter()
        .find(|c| c.name.as_ref() == "AppUpdater")
        .unwrap();
    let names: Vec<&str> = updater.methods.iter().map(|m| m.name.as_ref()).collect();
    assert_eq!(names, ["checkForUpdates", "setFeedURL", "doDownloadUpdate"]);
}
