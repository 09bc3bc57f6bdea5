//! Tests for the tree-walking fixer

use regtools::config::FixerConfig;
use regtools::fixer::{FixError, FixOutcome, Fixer, ImportRule, fix_file};

use crate::common::TestTree;

const DUPLICATED: &str = "import React from 'react';\nimport { useState } from 'react';\n\nexport const A = () => null;\n";
const FIXED: &str = "import { useState } from 'react';\n\nexport const A = () => null;\n";
const SINGLE: &str = "import React from 'react';\n\nexport const B = () => null;\n";
const NAMED_ONLY: &str = "import { useState } from 'react';\nimport { useMemo } from 'react';\n";

fn fixer() -> Fixer {
    Fixer::from_config(&FixerConfig::default()).unwrap()
}

#[test]
fn test_removes_simple_form_and_keeps_other_lines() {
    let tree = TestTree::new();
    tree.add_file("src/App.tsx", DUPLICATED);

    let report = fixer().run(tree.path()).unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.modified.len(), 1);
    assert_eq!(report.modified[0].line, 1);
    assert!(report.is_clean());
    assert_eq!(tree.read("src/App.tsx"), FIXED);
}

#[test]
fn test_single_import_untouched() {
    let tree = TestTree::new();
    tree.add_file("src/B.jsx", SINGLE);

    let report = fixer().run(tree.path()).unwrap();

    assert!(report.modified.is_empty());
    assert_eq!(tree.read("src/B.jsx"), SINGLE);
}

#[test]
fn test_named_only_untouched() {
    let tree = TestTree::new();
    tree.add_file("src/hooks.ts", NAMED_ONLY);

    let report = fixer().run(tree.path()).unwrap();

    assert!(report.modified.is_empty());
    assert_eq!(tree.read("src/hooks.ts"), NAMED_ONLY);
}

#[test]
fn test_skips_dependency_and_build_dirs() {
    let tree = TestTree::new();
    tree.add_file("node_modules/pkg/index.js", DUPLICATED);
    tree.add_file(".next/server/page.js", DUPLICATED);
    tree.add_file("dist/bundle.js", DUPLICATED);
    tree.add_file("app/page.js", DUPLICATED);

    let report = fixer().run(tree.path()).unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(tree.read("node_modules/pkg/index.js"), DUPLICATED);
    assert_eq!(tree.read(".next/server/page.js"), DUPLICATED);
    assert_eq!(tree.read("dist/bundle.js"), DUPLICATED);
    assert_eq!(tree.read("app/page.js"), FIXED);
}

#[test]
fn test_ignores_other_extensions() {
    let tree = TestTree::new();
    tree.add_file("docs/example.md", DUPLICATED);
    tree.add_file("src/styles.css", DUPLICATED);

    let report = fixer().run(tree.path()).unwrap();

    assert_eq!(report.scanned, 0);
    assert_eq!(tree.read("docs/example.md"), DUPLICATED);
}

#[test]
fn test_dry_run_writes_nothing() {
    let tree = TestTree::new();
    tree.add_file("src/App.js", DUPLICATED);

    let report = fixer().dry_run(true).run(tree.path()).unwrap();

    assert_eq!(report.modified.len(), 1);
    assert_eq!(tree.read("src/App.js"), DUPLICATED);
}

#[test]
fn test_deterministic_order() {
    let tree = TestTree::new();
    tree.add_file("src/b.js", DUPLICATED);
    tree.add_file("src/a.js", DUPLICATED);
    tree.add_file("lib/c.js", DUPLICATED);

    let report = fixer().run(tree.path()).unwrap();
    let names: Vec<_> = report
        .modified
        .iter()
        .map(|f| f.path.strip_prefix(tree.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, ["lib/c.js", "src/a.js", "src/b.js"]);
}

#[test]
fn test_invalid_utf8_is_recorded_and_walk_continues() {
    let tree = TestTree::new();
    let bad = tree.path().join("src/binary.js");
    std::fs::create_dir_all(bad.parent().unwrap()).unwrap();
    std::fs::write(&bad, [0xff, 0xfe, 0x00, 0x41]).unwrap();
    tree.add_file("src/good.js", DUPLICATED);

    let report = fixer().run(tree.path()).unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, bad);
    assert!(!report.is_clean());
    assert_eq!(tree.read("src/good.js"), FIXED);
}

#[test]
fn test_missing_root() {
    let tree = TestTree::new();
    let missing = tree.path().join("nope");

    let err = fixer().run(&missing).unwrap_err();
    assert!(matches!(err, FixError::RootNotFound(_)));
}

#[test]
fn test_root_is_file() {
    let tree = TestTree::new();
    let file = tree.add_file("App.js", SINGLE);

    let err = fixer().run(&file).unwrap_err();
    assert!(matches!(err, FixError::NotADirectory(_)));
}

#[test]
fn test_custom_extensions_and_skip_dirs() {
    let tree = TestTree::new();
    tree.add_file("src/App.mjs", DUPLICATED);
    tree.add_file("vendor/lib.mjs", DUPLICATED);

    let config = FixerConfig {
        extensions: vec!["mjs".to_string()],
        skip_dirs: vec!["vendor".to_string()],
        ..FixerConfig::default()
    };
    let report = Fixer::from_config(&config).unwrap().run(tree.path()).unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(tree.read("src/App.mjs"), FIXED);
    assert_eq!(tree.read("vendor/lib.mjs"), DUPLICATED);
}

#[test]
fn test_fix_file_outcomes() {
    let tree = TestTree::new();
    let dup = tree.add_file("dup.js", DUPLICATED);
    let single = tree.add_file("single.js", SINGLE);
    let rule = ImportRule::new("react", "React").unwrap();

    assert_eq!(fix_file(&rule, &dup, false).unwrap(), FixOutcome::Removed { line: 1 });
    assert_eq!(fix_file(&rule, &dup, false).unwrap(), FixOutcome::Unchanged);
    assert_eq!(fix_file(&rule, &single, false).unwrap(), FixOutcome::Unchanged);
    assert!(matches!(
        fix_file(&rule, &tree.path().join("missing.js"), false),
        Err(FixError::Io(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_fixed_through_link() {
    let tree = TestTree::new();
    let target = tree.add_file("shared/App.jsx", DUPLICATED);
    std::fs::create_dir_all(tree.path().join("src")).unwrap();
    let link = tree.path().join("src/App.jsx");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let report = fixer().run(tree.path().join("src")).unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.modified.len(), 1);
    assert_eq!(report.modified[0].path, link);
    assert_eq!(tree.read("shared/App.jsx"), FIXED);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_descended() {
    let tree = TestTree::new();
    tree.add_file("vendor/lib.js", DUPLICATED);
    std::fs::create_dir_all(tree.path().join("src")).unwrap();
    std::os::unix::fs::symlink(tree.path().join("vendor"), tree.path().join("src/vendor")).unwrap();

    let report = fixer().run(tree.path().join("src")).unwrap();

    assert_eq!(report.scanned, 0);
    assert_eq!(tree.read("vendor/lib.js"), DUPLICATED);
}
