//! Bounded search tests against an in-memory provider.

mod common;

use std::path::PathBuf;

use common::{ines_rom, MemoryProvider};
use romident::catalog::store::HeaderDatabase;
use romident::core::hash::{crc32, sha1, Sha1Hash, TargetIdentity};
use romident::core::source::ByteSource;
use romident::matching::{RomMatcher, SearchConfig, SearchOutcome, MAX_FILES_TO_CHECK};

fn paths(names: &[String]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

/// `count` distinct iNES files named `roms/game-N.nes`
fn rom_folder(count: usize) -> (MemoryProvider, Vec<String>) {
    let mut provider = MemoryProvider::new();
    let mut names = Vec::new();
    for i in 0..count {
        let name = format!("roms/game-{i:03}.nes");
        let fill = u8::try_from(i % 251).unwrap();
        let mut data = ines_rom(fill);
        data.extend_from_slice(&u32::try_from(i).unwrap().to_le_bytes());
        provider = provider.with_file(&name, data);
        names.push(name);
    }
    (provider, names)
}

fn unmatched_target() -> TargetIdentity {
    TargetIdentity::new(0xDEAD_BEEF, Sha1Hash([0x11; 20]))
}

#[test]
fn test_slow_search_caps_attempts() {
    let (provider, names) = rom_folder(150);
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);

    let report = matcher.search(&paths(&names), "", &unmatched_target(), false);
    assert_eq!(report.outcome, SearchOutcome::BudgetExhausted);
    assert_eq!(report.attempts, MAX_FILES_TO_CHECK);
    assert_eq!(provider.reads(), MAX_FILES_TO_CHECK);
}

#[test]
fn test_exactly_ceiling_candidates_is_not_found() {
    let (provider, names) = rom_folder(MAX_FILES_TO_CHECK);
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);

    let report = matcher.search(&paths(&names), "", &unmatched_target(), false);
    assert_eq!(report.outcome, SearchOutcome::NotFound);
    assert_eq!(report.attempts, MAX_FILES_TO_CHECK);
}

#[test]
fn test_archive_entries_share_the_budget() {
    let (provider, mut names) = rom_folder(60);
    let entries: Vec<(String, Vec<u8>)> = (0..60u8)
        .map(|i| (format!("inner-{i}.nes"), ines_rom(i.wrapping_add(100))))
        .collect();
    let provider = provider.with_archive(
        "roms/pack.gz",
        entries.iter().map(|(n, d)| (n.as_str(), d.clone())).collect(),
    );
    names.insert(0, "roms/pack.gz".to_string());

    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);
    let report = matcher.search(&paths(&names), "", &unmatched_target(), false);

    assert_eq!(report.outcome, SearchOutcome::BudgetExhausted);
    assert_eq!(provider.reads(), MAX_FILES_TO_CHECK);
}

#[test]
fn test_configured_ceiling() {
    let (provider, names) = rom_folder(20);
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database).with_config(SearchConfig { max_attempts: 5 });

    let report = matcher.search(&paths(&names), "", &unmatched_target(), false);
    assert_eq!(report.outcome, SearchOutcome::BudgetExhausted);
    assert_eq!(report.attempts, 5);
}

#[test]
fn test_crc_match_with_wrong_sha1_still_matches() {
    let data = ines_rom(0x42);
    let provider = MemoryProvider::new()
        .with_file("roms/other.nes", ines_rom(0x01))
        .with_file("roms/renamed.nes", data.clone());
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);
    let candidates = paths(&["roms/other.nes".to_string(), "roms/renamed.nes".to_string()]);

    let target = TargetIdentity::new(crc32(&data), Sha1Hash([0; 20]));
    assert_eq!(
        matcher.find_match(&candidates, "", &target, false),
        Some(ByteSource::file("roms/renamed.nes"))
    );

    let by_sha1 = TargetIdentity::from_sha1(sha1(&data));
    assert_eq!(
        matcher.find_match(&candidates, "", &by_sha1, false),
        Some(ByteSource::file("roms/renamed.nes"))
    );
}

#[test]
fn test_no_field_agrees() {
    let provider = MemoryProvider::new().with_file("roms/a.nes", ines_rom(1));
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);
    let candidates = vec![PathBuf::from("roms/a.nes")];

    let report = matcher.search(&candidates, "", &unmatched_target(), false);
    assert_eq!(report.outcome, SearchOutcome::NotFound);
    assert_eq!(report.attempts, 1);
}

#[test]
fn test_fast_mode_checks_only_named_candidates() {
    let bar = ines_rom(0xBB);
    let provider = MemoryProvider::new()
        .with_file("a/Foo (E).nes", ines_rom(0xAA))
        .with_file("b/Bar.nes", bar.clone());
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);
    let candidates = vec![PathBuf::from("a/Foo (E).nes"), PathBuf::from("b/Bar.nes")];

    // Bar would match, but fast mode never looks at it
    let target = TargetIdentity::from_crc32(crc32(&bar));
    let report = matcher.search(&candidates, "Foo (E).nes", &target, true);
    assert_eq!(report.outcome, SearchOutcome::NotFound);
    assert_eq!(report.attempts, 1);
    assert_eq!(provider.reads(), 1);
}

#[test]
fn test_fast_mode_is_case_insensitive() {
    let foo = ines_rom(0xAA);
    let provider = MemoryProvider::new().with_file("a/FOO (E).NES", foo.clone());
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);

    let found = matcher.find_match(
        &[PathBuf::from("a/FOO (E).NES")],
        "foo (e).nes",
        &TargetIdentity::from_crc32(crc32(&foo)),
        true,
    );
    assert_eq!(found, Some(ByteSource::file("a/FOO (E).NES")));
}

#[test]
fn test_archive_match_is_entry_qualified() {
    let wanted = ines_rom(0x77);
    let provider = MemoryProvider::new().with_archive(
        "roms/pack.gz",
        vec![
            ("readme.txt", b"not a rom at all".to_vec()),
            ("first.nes", ines_rom(0x01)),
            ("Wanted.nes", wanted.clone()),
        ],
    );
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);

    let report = matcher.search(
        &[PathBuf::from("roms/pack.gz")],
        "",
        &TargetIdentity::from_crc32(crc32(&wanted)),
        false,
    );
    let source = report.clone().into_match().unwrap();
    assert_eq!(source.to_string(), "roms/pack.gz!/Wanted.nes");
    // readme.txt is filtered out before loading
    assert_eq!(report.attempts, 2);
}

#[test]
fn test_failed_record_never_matches() {
    // Unrecognized data still gets a CRC-32, but the load failed
    let junk = vec![0x00; 64];
    let provider = MemoryProvider::new().with_file("roms/junk.nes", junk.clone());
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);

    let found = matcher.find_match(
        &[PathBuf::from("roms/junk.nes")],
        "",
        &TargetIdentity::from_crc32(crc32(&junk)),
        false,
    );
    assert_eq!(found, None);
}

#[test]
fn test_empty_target_checks_nothing() {
    let (provider, names) = rom_folder(3);
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);

    let report = matcher.search(&paths(&names), "", &TargetIdentity::default(), false);
    assert_eq!(report.outcome, SearchOutcome::NotFound);
    assert_eq!(provider.reads(), 0);
}

#[test]
fn test_locate_falls_back_to_slow_pass() {
    let data = ines_rom(0x5A);
    let provider = MemoryProvider::new()
        .with_file("roms/Game (E).nes", ines_rom(0x01))
        .with_file("roms/renamed copy.nes", data.clone());
    let database = HeaderDatabase::new();
    let matcher = RomMatcher::new(&provider, &database);
    let candidates = vec![
        PathBuf::from("roms/Game (E).nes"),
        PathBuf::from("roms/renamed copy.nes"),
    ];

    let report = matcher.locate(&candidates, "Game (E).nes", &TargetIdentity::from_crc32(crc32(&data)));
    assert_eq!(
        report.outcome,
        SearchOutcome::Found(ByteSource::file("roms/renamed copy.nes"))
    );
    // One fast attempt, then two slow ones
    assert_eq!(report.attempts, 3);
}
