//! End-to-end tests of the `romident` binary.

use std::fs;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};
use predicates::prelude::*;

fn ines_rom(fill: u8) -> Vec<u8> {
    let mut data = b"NES\x1a\x02\x01\x01\x00".to_vec();
    data.resize(16, 0);
    data.resize(16 + 2 * 16 * 1024 + 8 * 1024, fill);
    data
}

fn crc_hex(data: &[u8]) -> String {
    format!("{:08X}", romident::core::hash::crc32(data))
}

fn write_gz(path: &Path, entry: &str, data: &[u8]) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = GzBuilder::new()
        .filename(entry)
        .write(file, Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap();
}

fn bin() -> Command {
    Command::cargo_bin("romident").unwrap()
}

#[test]
fn test_identify_prints_checksums() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0xEA);
    let path = dir.path().join("Game (Europe).nes");
    fs::write(&path, &rom).unwrap();

    bin()
        .arg("identify")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(crc_hex(&rom)))
        .stdout(predicate::str::contains(
            romident::core::hash::sha1(&rom).to_hex(),
        ))
        .stdout(predicate::str::contains("Game (Europe)"))
        .stdout(predicate::str::contains("NES (PAL)"))
        .stdout(predicate::str::contains("Mapper: 0"));
}

#[test]
fn test_identify_json() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0x01);
    let path = dir.path().join("game.nes");
    fs::write(&path, &rom).unwrap();

    let output = bin()
        .args(["--format", "json", "identify"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["info"]["crc32"], crc_hex(&rom));
    assert_eq!(json["info"]["format"], "ines");
    assert_eq!(json["info"]["details"]["kind"], "ines");
    assert_eq!(json["status"], "loaded");
}

#[test]
fn test_identify_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0x02);
    let path = dir.path().join("game.nes");
    fs::write(&path, &rom).unwrap();

    bin()
        .args(["--format", "tsv", "identify"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name\tpath\tformat"))
        .stdout(predicate::str::contains(crc_hex(&rom)));
}

#[test]
fn test_identify_gzip_entry() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0x33);
    let path = dir.path().join("pack.gz");
    write_gz(&path, "Inner (VS).nes", &rom);

    bin()
        .arg("identify")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(crc_hex(&rom)))
        .stdout(predicate::str::contains("pack.gz!/Inner (VS).nes"))
        .stdout(predicate::str::contains("Vs. System"));
}

#[test]
fn test_identify_too_short_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.nes");
    fs::write(&path, b"NES\x1a").unwrap();

    bin()
        .arg("identify")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("too small"));
}

#[test]
fn test_identify_headerless_with_database() {
    let dir = tempfile::tempdir().unwrap();
    let payload = vec![0x5C; 16 * 1024];
    let path = dir.path().join("bare.nes");
    fs::write(&path, &payload).unwrap();

    bin().arg("identify").arg(&path).assert().failure();

    let db_path = dir.path().join("headers.json");
    fs::write(
        &db_path,
        format!(
            r#"{{"version": "1.0.0", "entries": [
                {{"crc32": "{}", "name": "Bare", "mapper": 3, "prg_rom_kb": 16}}
            ]}}"#,
            crc_hex(&payload)
        ),
    )
    .unwrap();

    bin()
        .arg("identify")
        .arg(&path)
        .arg("--database")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Headerless: yes"))
        .stdout(predicate::str::contains("Mapper: 3"));
}

#[test]
fn test_find_renamed_rom() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0x99);
    fs::write(dir.path().join("decoy.nes"), ines_rom(0x10)).unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let renamed = dir.path().join("sub").join("renamed.nes");
    fs::write(&renamed, &rom).unwrap();

    bin()
        .args(["find", "--name", "Original (E).nes", "--crc32"])
        .arg(crc_hex(&rom))
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("renamed.nes"));
}

#[test]
fn test_find_inside_gzip() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0x44);
    write_gz(&dir.path().join("bundle.gz"), "wanted.nes", &rom);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&ines_rom(0x45)).unwrap();
    fs::write(dir.path().join("other.nes.gz"), encoder.finish().unwrap()).unwrap();

    bin()
        .args(["find", "--mode", "slow", "--sha1"])
        .arg(romident::core::hash::sha1(&rom).to_hex())
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle.gz!/wanted.nes"));
}

#[test]
fn test_find_no_match_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.nes"), ines_rom(0x01)).unwrap();

    bin()
        .args(["--format", "json", "find", "--crc32", "DEADBEEF", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"not_found\""));
}

#[test]
fn test_find_requires_a_hash() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .args(["find", "--name", "a.nes", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--crc32 or --sha1"));
}

#[test]
fn test_find_rejects_bad_crc() {
    let dir = tempfile::tempdir().unwrap();
    bin()
        .args(["find", "--crc32", "xyz", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid CRC-32"));
}

#[test]
fn test_find_max_attempts() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5u8 {
        fs::write(dir.path().join(format!("rom{i}.nes")), ines_rom(i)).unwrap();
    }

    bin()
        .args(["find", "--mode", "slow", "--max-attempts", "3", "--crc32", "DEADBEEF", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Attempts: 3"))
        .stderr(predicate::str::contains("within 3 attempts"));
}

#[test]
fn test_find_no_recursive_skips_subfolders() {
    let dir = tempfile::tempdir().unwrap();
    let rom = ines_rom(0x61);
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("deep.nes"), &rom).unwrap();

    bin()
        .args(["find", "--mode", "slow", "--no-recursive", "--crc32"])
        .arg(crc_hex(&rom))
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Attempts: 0"));
}
