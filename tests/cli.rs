mod common;

use assert_cmd::Command;
use common::{ios_libraries, write_framework, write_xcframework};
use predicates::prelude::*;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Writes a project with one XCFramework and one ordinary framework.
fn project(dir: &TempDir) -> PathBuf {
    write_xcframework(dir.path(), "Foo.xcframework", &ios_libraries());
    write_framework(dir.path(), "Bar.framework");

    let config = dir.path().join("frameworks.toml");
    fs::write(
        &config,
        r#"
out_root = "out"

[[platform]]
flavor = "iphoneos-arm64"
sdk = "iphoneos"
architectures = ["arm64"]

[[platform]]
flavor = "iphonesimulator-arm64"
sdk = "iphonesimulator"
architectures = ["arm64"]

[[platform]]
flavor = "macosx-arm64"
sdk = "macosx"
architectures = ["arm64"]

[[framework]]
target = "//vendor:Foo"
path = "Foo.xcframework"
exported_linker_flags = ["-ObjC"]
deps = ["//vendor:Bar"]

[[framework]]
target = "//vendor:Bar"
path = "Bar.framework"
"#,
    )
    .unwrap();
    config
}

fn tool() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_prebuilt_framework").unwrap();
    cmd.env_remove("KODEGEN_FRAMEWORK_CONFIG");
    cmd
}

#[test]
fn slice_prints_selected_slice() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .args(["slice", "--target", "//vendor:Foo", "--platform", "iphonesimulator-arm64"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("ios-arm64_x86_64-simulator/Foo.framework\n");
}

#[test]
fn link_prints_json_with_rpaths() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    let output = tool()
        .args(["link", "-t", "//vendor:Bar", "-p", "macosx-arm64", "--link-mode", "shared"])
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json["args"],
        serde_json::json!([
            "-rpath",
            "@loader_path/../Frameworks",
            "-rpath",
            "@executable_path/../Frameworks"
        ])
    );
    let frameworks = json["frameworks"].as_array().unwrap();
    assert_eq!(frameworks.len(), 1);
    assert!(
        frameworks[0]
            .as_str()
            .unwrap()
            .ends_with("out/gen/vendor/Bar/Bar.framework")
    );
    assert_eq!(json["libraries"], serde_json::json!([]));
}

#[test]
fn link_without_slice_fails() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .args(["link", "-t", "//vendor:Foo", "-p", "macosx-arm64"])
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no slice"));
}

#[test]
fn preprocessor_prints_inputs_by_target() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .args(["preprocessor", "-t", "//vendor:Foo", "-p", "iphoneos-arm64"])
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"//vendor:Bar\"")
                .and(predicate::str::contains("\"//vendor:Foo\""))
                .and(predicate::str::contains("ios-arm64/Foo.framework")),
        );
}

#[test]
fn stage_dry_run_prints_steps_without_touching_disk() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .args(["stage", "--dry-run", "--target", "//vendor:Bar"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("mkdir -p")
                .and(predicate::str::contains("rm -rf"))
                .and(predicate::str::contains("cp -R")),
        );

    assert!(!dir.path().join("out").exists());
}

#[test]
fn stage_copies_every_framework() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .arg("stage")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("(not cacheable)").count(2));

    let gen_dir = dir.path().join("out/gen/vendor");
    assert!(gen_dir.join("Bar/Bar.framework/Versions/A/Foo").is_file());
    assert!(
        gen_dir
            .join("Foo/Foo.xcframework/ios-arm64/Foo.framework/Foo")
            .is_file()
    );
    assert!(gen_dir.join("Foo/Foo.xcframework/Info.plist").is_file());
}

#[test]
fn invalid_target_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .args(["slice", "--target", "vendor:Foo", "--platform", "iphoneos-arm64"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));
}

#[test]
fn unknown_platform_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = project(&dir);

    tool()
        .args(["slice", "--target", "//vendor:Foo", "--platform", "appletvos-arm64"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown platform"));
}
