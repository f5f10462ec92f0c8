// crates/hxcrepair-cli/tests/repair_cli.rs

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const GOOD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<disk_layout>
  <layout>
    <number_of_track>1</number_of_track>
    <number_of_side>1</number_of_side>
    <start_sector_id>1</start_sector_id>
    <sector_per_track>26</sector_per_track>
    <sector_size>128</sector_size>
    <track_list>
      <track track_number="00" side_number="0">
        <data_offset>0x000000</data_offset>
        <sector_list>
          <sector sector_id="1" sector_size="128">
            <data_fill>0xE5</data_fill>
            <datamark>0xFB</datamark>
            <data_offset>0x000000</data_offset>
          </sector>
          <sector sector_id="2" sector_size="128">
            <data_fill>0xE5</data_fill>
            <datamark>0xFB</datamark>
            <data_offset>0x000080</data_offset>
          </sector>
          <sector sector_id="4" sector_size="128">
            <data_fill>0xE5</data_fill>
            <datamark>0xFB</datamark>
            <data_offset>0x000100</data_offset>
          </sector>
          <sector sector_id="5" sector_size="128">
            <data_fill>0xE5</data_fill>
            <datamark>0xFB</datamark>
            <data_offset>0x000180</data_offset>
          </sector>
        </sector_list>
      </track>
    </track_list>
  </layout>
</disk_layout>
"#;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hxcrepair-cli"))
        .args(args)
        .env("RUST_LOG", "info")
        .env_remove("HXCREPAIR_LOG_FORMAT")
        .output()
        .expect("spawn hxcrepair-cli")
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let p = dir.join(name);
    fs::write(&p, body).expect("write fixture");
    p.to_str().unwrap().to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn repairs_gap_and_prints_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "gap.xml", GOOD);

    let out = run(&[path.as_str()]);
    assert_eq!(out.status.code(), Some(0), "stderr:\n{}", stderr(&out));

    let log = stderr(&out);
    let xml = String::from_utf8(out.stdout).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<sector sector_id=\"3\" sector_size=\"128\">"));
    assert!(xml.contains("<data_offset>0x000200</data_offset>"));

    assert!(log.contains("Repair HxC XML"));
    assert!(log.contains("1 tracks, 1 sides, 26 sectors, starting at 1, 128 bytes per sector"));
    assert!(log.contains("adding sector"));
}

#[test]
fn output_repairs_to_itself() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "in.xml", GOOD);
    let first = run(&[input.as_str()]);
    assert!(first.status.success());

    let again = write(dir.path(), "again.xml", &String::from_utf8(first.stdout.clone()).unwrap());
    let second = run(&[again.as_str()]);
    assert!(second.status.success());
    assert_eq!(second.stdout, first.stdout);
}

#[test]
fn integrity_violation_exits_1_with_empty_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let bad = GOOD.replace("<data_offset>0x000080</data_offset>", "<data_offset>0x000090</data_offset>");
    let path = write(dir.path(), "bad.xml", &bad);
    let out = run(&[path.as_str()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("expectation fails: Sector offset: 0x90 == 0x80"));
}

#[test]
fn missing_argument_prints_usage() {
    let out = run(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = stderr(&out);
    assert!(err.contains("Filename missing"));
    assert!(err.contains("Usage"));
}

#[test]
fn unreadable_or_irregular_paths_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.xml");
    let out = run(&[missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("File not readable"));

    let out = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Not a plain file"));
    assert!(out.stdout.is_empty());
}

#[test]
fn malformed_xml_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.xml", "<disk_layout><layout>");
    let out = run(&[path.as_str()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn help_flag_succeeds() {
    let out = run(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("HXC_XML"));
}
