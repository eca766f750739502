mod common;

use common::{
    ios_device, ios_libraries, ios_simulator, macos, rule, rule_with, target, write_framework,
    write_xcframework,
};
use kodegen_prebuilt_framework::framework::{
    Error, FrameworkRef, GraphNode, PreprocessorDep, PreprocessorInput,
};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn transitive_input_includes_self_and_dependencies() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let bar = Arc::new(rule_with(
        "Bar",
        &write_framework(dir.path(), "Bar.framework"),
        &out,
        Vec::new(),
        |b| b.framework(FrameworkRef::sdk("System/Library/Frameworks/UIKit.framework")),
    ));
    let foo = rule_with(
        "Foo",
        &write_framework(dir.path(), "Foo.framework"),
        &out,
        vec![bar.clone() as Arc<dyn GraphNode>],
        |b| b,
    );

    let inputs = foo.transitive_preprocessor_input(&ios_device()).unwrap();

    assert_eq!(inputs.len(), 2);
    assert_eq!(
        inputs[&target("Foo")],
        PreprocessorInput::new([FrameworkRef::path(foo.output_path())].into())
    );
    let bar_input = &inputs[&target("Bar")];
    assert_eq!(bar_input.frameworks.len(), 2);
    assert!(bar_input.frameworks.contains(&FrameworkRef::path(bar.output_path())));
}

#[test]
fn diamond_dependencies_appear_once() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let base = Arc::new(rule("Base", &write_framework(dir.path(), "Base.framework"), &out));
    let left = Arc::new(rule_with(
        "Left",
        &write_framework(dir.path(), "Left.framework"),
        &out,
        vec![base.clone() as Arc<dyn GraphNode>],
        |b| b,
    ));
    let right = Arc::new(rule_with(
        "Right",
        &write_framework(dir.path(), "Right.framework"),
        &out,
        vec![base.clone() as Arc<dyn GraphNode>],
        |b| b,
    ));
    let top = rule_with(
        "Top",
        &write_framework(dir.path(), "Top.framework"),
        &out,
        vec![left as Arc<dyn GraphNode>, right as Arc<dyn GraphNode>],
        |b| b,
    );

    let inputs = top.transitive_preprocessor_input(&macos()).unwrap();
    let targets: Vec<_> = inputs.keys().map(|t| t.short_name().to_string()).collect();
    assert_eq!(targets, ["Base", "Left", "Right", "Top"]);
}

#[test]
fn unsupported_platform_stops_propagation() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let bar = Arc::new(rule("Bar", &write_framework(dir.path(), "Bar.framework"), &out));
    let foo = rule_with(
        "Foo",
        &write_framework(dir.path(), "Foo.framework"),
        &out,
        vec![bar as Arc<dyn GraphNode>],
        |b| b.supported_platforms_regex("^iphone"),
    );

    assert!(foo.preprocessor_deps(&macos()).is_empty());
    assert_eq!(foo.preprocessor_deps(&ios_device()).len(), 1);

    let inputs = foo.transitive_preprocessor_input(&macos()).unwrap();
    assert_eq!(inputs.len(), 1);
    assert!(inputs[&target("Foo")].is_empty());
}

#[test]
fn transitive_input_is_cached_per_flavor() {
    let dir = TempDir::new().unwrap();
    let foo = rule(
        "Foo",
        &write_framework(dir.path(), "Foo.framework"),
        &dir.path().join("out"),
    );

    let first = foo.transitive_preprocessor_input(&ios_device()).unwrap();
    let second = foo.transitive_preprocessor_input(&ios_device()).unwrap();
    let other = foo.transitive_preprocessor_input(&ios_simulator()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(*first, *other);
}

#[test]
fn xcframework_input_references_slice() {
    let dir = TempDir::new().unwrap();
    let bundle = write_xcframework(dir.path(), "Foo.xcframework", &ios_libraries());
    let foo = rule("Foo", &bundle, &dir.path().join("out"));

    let input = foo.preprocessor_input(&ios_simulator()).unwrap();
    let slice = foo
        .output_path()
        .join("ios-arm64_x86_64-simulator/Foo.framework");
    assert!(input.frameworks.contains(&FrameworkRef::path(&slice)));
    assert_eq!(foo.declared_output(&ios_simulator()).unwrap(), slice);

    let err = foo.preprocessor_input(&macos()).unwrap_err();
    assert!(matches!(err, Error::NoSliceForPlatform { .. }), "{err}");
}

#[test]
fn ordinary_framework_declares_staged_bundle() {
    let dir = TempDir::new().unwrap();
    let foo = rule(
        "Foo",
        &write_framework(dir.path(), "Foo.framework"),
        &dir.path().join("out"),
    );

    for platform in [ios_device(), ios_simulator(), macos()] {
        assert_eq!(foo.declared_output(&platform).unwrap(), foo.output_path());
        assert_eq!(foo.resolve_slice(&platform).unwrap(), "");
    }
}
