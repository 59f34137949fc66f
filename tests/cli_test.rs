use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Default layout: include/<root> built into dist/<root> under the working directory.
#[test]
fn test_default_layout() {
    let temp_dir = tempdir().unwrap();
    let include = temp_dir.path().join("include");
    fs::create_dir(&include).unwrap();
    fs::write(include.join("dcf.hpp"), "#include \"value.hpp\"\nint dcf;\n").unwrap();
    fs::write(include.join("value.hpp"), "int value;\n").unwrap();

    Command::cargo_bin("hppmerge")
        .unwrap()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("as version 0.0.1"));

    let output = fs::read_to_string(temp_dir.path().join("dist/dcf.hpp")).unwrap();
    assert!(output.contains("//   version 0.0.1"));
    assert!(output.contains("//   begin of \"value.hpp\""));
    assert!(output.contains("int dcf;"));
}

#[test]
fn test_custom_paths_and_label() {
    let temp_dir = tempdir().unwrap();
    let src = temp_dir.path().join("headers");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("main.h"), "#include \"main.h\"\nint main_h;\n").unwrap();

    let output_file = temp_dir.path().join("out/nested/single.h");

    Command::cargo_bin("hppmerge")
        .unwrap()
        .arg("main.h")
        .arg("-s")
        .arg(src.to_str().unwrap())
        .arg("-o")
        .arg(output_file.to_str().unwrap())
        .arg("--label")
        .arg("3.1.4")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built").and(predicate::str::contains("3.1.4")));

    let output = fs::read_to_string(&output_file).unwrap();
    assert!(output.contains("//   version 3.1.4"));
    assert_eq!(output.matches("//   begin of \"main.h\"").count(), 1);
}

#[test]
fn test_missing_root_fails() {
    let temp_dir = tempdir().unwrap();

    Command::cargo_bin("hppmerge")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("nothing.hpp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing.hpp"));

    assert!(!temp_dir.path().join("dist").exists());
}

#[test]
fn test_strict_flag() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("r.h"), "#include \"a.h\" extra\n").unwrap();
    fs::write(temp_dir.path().join("a.h"), "a\n").unwrap();

    Command::cargo_bin("hppmerge")
        .unwrap()
        .arg("r.h")
        .arg("-s")
        .arg(temp_dir.path().to_str().unwrap())
        .arg("-o")
        .arg(temp_dir.path().join("out.h").to_str().unwrap())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed include directive"));
}

#[test]
fn test_invalid_arguments() {
    Command::cargo_bin("hppmerge")
        .unwrap()
        .arg("--invalid-arg")
        .assert()
        .failure();
}

#[cfg(feature = "restore")]
#[test]
fn test_restore_round_trip() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("r.h"), "#include \"a.h\"\nr\n").unwrap();
    fs::write(temp_dir.path().join("a.h"), "a\n").unwrap();

    let built = temp_dir.path().join("dist/r.h");
    Command::cargo_bin("hppmerge")
        .unwrap()
        .arg("r.h")
        .arg("-s")
        .arg(temp_dir.path().to_str().unwrap())
        .arg("-o")
        .arg(built.to_str().unwrap())
        .assert()
        .success();

    let restored = temp_dir.path().join("restored");
    Command::cargo_bin("hppmerge")
        .unwrap()
        .arg("--restore")
        .arg(built.to_str().unwrap())
        .arg("--restore-path")
        .arg(restored.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 2 file(s)"));

    assert_eq!(
        fs::read_to_string(restored.join("r.h")).unwrap(),
        "#include \"a.h\"\nr\n"
    );
    assert_eq!(fs::read_to_string(restored.join("a.h")).unwrap(), "a\n");
}
