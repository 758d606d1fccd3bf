//! End-to-end test of the library flow
//!
//! plan file -> block specs -> locked read -> splice -> atomic write.

use pretty_assertions::assert_eq;
use splice_blocks::{Error, SplicePlan, locate_in_file, splice_file};
use splice_fs::NormalizedPath;
use std::fs;
use tempfile::TempDir;

/// A CRLF source file with two functions and a YAML plan for them.
fn setup_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let source = [
        "#include <stdio.h>",
        "",
        "int render(void) {",
        "    if (ready) {",
        "        draw();",
        "    }",
        "    return 0;",
        "}",
        "",
        "int export_pdf(void) {",
        "    for (int i = 0; i < 3; i++) {",
        "        page(i);",
        "    }",
        "    return 1;",
        "}",
        "",
        "int main(void) { return render(); }",
    ]
    .iter()
    .map(|line| format!("{line}\r\n"))
    .collect::<String>();
    fs::write(temp.path().join("main.c"), source).unwrap();

    fs::create_dir(temp.path().join("plans")).unwrap();
    fs::write(
        temp.path().join("plans").join("splice.yaml"),
        r#"
block:
  - name: render
    start: "int render(void)"
    end:
      kind: brace-depth
    replacement: "int render(void) { return draw_all(); }"
  - name: export_pdf
    start: "int export_pdf(void)"
    end:
      kind: closing-line
      token: "}"
      min_lines_after_start: 3
    replacement_file: export_pdf.c
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("plans").join("export_pdf.c"),
        "int export_pdf(void) {\r\n    return write_pdf();\r\n}\r\n",
    )
    .unwrap();

    temp
}

#[test]
fn test_plan_to_file_round_trip() {
    let temp = setup_workspace();
    let plan_path = NormalizedPath::new(temp.path().join("plans").join("splice.yaml"));
    let target = NormalizedPath::new(temp.path().join("main.c"));

    let specs = SplicePlan::load(&plan_path).unwrap().into_specs().unwrap();
    let report = splice_file(&target, &specs, false).unwrap();

    let expected = [
        "#include <stdio.h>",
        "",
        "int render(void) { return draw_all(); }",
        "",
        "int export_pdf(void) {",
        "    return write_pdf();",
        "}",
        "",
        "int main(void) { return render(); }",
    ]
    .iter()
    .map(|line| format!("{line}\r\n"))
    .collect::<String>();

    assert_eq!(fs::read_to_string(target.to_native()).unwrap(), expected);
    assert_eq!(report.outcome.lines_before, 17);
    assert_eq!(report.outcome.lines_after(), 9);
    assert_eq!(report.outcome.line_delta(), -8);

    let ranges: Vec<(usize, usize)> = report
        .outcome
        .blocks
        .iter()
        .map(|b| (b.span.first_line(), b.span.last_line()))
        .collect();
    assert_eq!(ranges, vec![(3, 8), (10, 15)]);
}

#[test]
fn test_locate_matches_splice_spans() {
    let temp = setup_workspace();
    let plan_path = NormalizedPath::new(temp.path().join("plans").join("splice.yaml"));
    let target = NormalizedPath::new(temp.path().join("main.c"));
    let specs = SplicePlan::load(&plan_path).unwrap().into_specs().unwrap();

    let located = locate_in_file(&target, &specs).unwrap();
    let report = splice_file(&target, &specs, true).unwrap();

    let spliced: Vec<_> = report.outcome.blocks.iter().map(|b| b.span).collect();
    assert_eq!(located, spliced);
    assert!(!report.written);
}

#[test]
fn test_second_run_is_rejected_and_file_kept() {
    let temp = setup_workspace();
    let plan_path = NormalizedPath::new(temp.path().join("plans").join("splice.yaml"));
    let target = NormalizedPath::new(temp.path().join("main.c"));
    let specs = SplicePlan::load(&plan_path).unwrap().into_specs().unwrap();

    splice_file(&target, &specs, false).unwrap();
    let after_first = fs::read_to_string(target.to_native()).unwrap();

    let second = splice_file(&target, &specs, false);

    assert!(second.is_err(), "re-applying must not succeed silently");
    assert_eq!(fs::read_to_string(target.to_native()).unwrap(), after_first);
}

#[test]
fn test_failed_plan_never_writes() {
    let temp = setup_workspace();
    let target = NormalizedPath::new(temp.path().join("main.c"));
    let before = fs::read_to_string(target.to_native()).unwrap();

    fs::write(
        temp.path().join("bad.toml"),
        "[[block]]\nname = \"render\"\nstart = \"int render(void)\"\nend = { kind = \"closing-line\", token = \"};\" }\nreplacement = \"x\"\n",
    )
    .unwrap();
    let specs = SplicePlan::load(&NormalizedPath::new(temp.path().join("bad.toml")))
        .unwrap()
        .into_specs()
        .unwrap();

    let result = splice_file(&target, &specs, false);

    assert!(matches!(result, Err(Error::BlockNotFound { .. })));
    assert_eq!(fs::read_to_string(target.to_native()).unwrap(), before);
}
