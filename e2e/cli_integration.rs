//! End-to-end tests driving the pipeline through
//! `pipeline::process_operand`, covering end-to-end scenarios
//! that involve the file system: recursive directory walk, the extension
//! priority rule, and restore-name decompression.

use std::fs;

use rzcompress::algorithm::{CompressOptions, GZIP, LZW};
use rzcompress::cli::args::Mode;
use rzcompress::pipeline::walk::expand_inputs;
use rzcompress::pipeline::{process_operand, Outcome, RunOptions};

fn base_opts(mode: Mode) -> RunOptions {
    RunOptions {
        mode,
        stdout: false,
        force: false,
        keep: false,
        list: false,
        test: false,
        quiet: false,
        verbose: false,
        restore_name: None,
        algorithm: None,
        level: None,
        suffix: None,
        output: None,
    }
}

#[test]
fn recursive_compress_skips_already_suffixed_and_unlinks_originals() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.txt"), b"one one one one one").unwrap();
    fs::write(dir.path().join("two.txt"), b"two two two two two").unwrap();
    fs::write(dir.path().join("already.Z"), b"pretend-compressed").unwrap();

    let inputs = vec![dir.path().to_string_lossy().into_owned()];
    let expanded = expand_inputs(&inputs, true, Mode::Compress, &LZW, None).unwrap();
    assert_eq!(expanded.len(), 2); // already.Z excluded

    let opts = base_opts(Mode::Compress);
    for input in &expanded {
        let outcome = process_operand(input, &opts);
        assert_eq!(outcome, Outcome::Success);
    }

    assert!(!dir.path().join("one.txt").exists());
    assert!(!dir.path().join("two.txt").exists());
    assert!(dir.path().join("one.txt.Z").exists());
    assert!(dir.path().join("two.txt.Z").exists());
    // The pre-existing already.Z was never touched by the recursive run.
    assert_eq!(
        fs::read(dir.path().join("already.Z")).unwrap(),
        b"pretend-compressed"
    );
}

#[test]
fn extension_priority_beats_content_probe_and_surfaces_format_error() {
    let dir = tempfile::tempdir().unwrap();
    // Named .Z but actually gzip content: the extension wins and the LZW
    // decoder must reject the header.
    let path = dir.path().join("mislabeled.Z");
    let mut gzip_bytes = Vec::new();
    let opts = CompressOptions {
        level: 6,
        ..Default::default()
    };
    let mut input: &[u8] = b"gzip content under a .Z name";
    (GZIP.compress)(&mut input, &mut gzip_bytes, &opts).unwrap();
    fs::write(&path, &gzip_bytes).unwrap();

    let dopts = base_opts(Mode::Decompress);
    let outcome = process_operand(path.to_str().unwrap(), &dopts);
    assert_eq!(outcome, Outcome::Failed);
    // Neither a `.gz`-decoded file nor a bare-named file should appear.
    assert!(!dir.path().join("mislabeled").exists());
}

#[test]
fn restore_name_decompress_writes_to_the_stored_filename() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("readme.txt");
    fs::write(&original, b"documentation body").unwrap();

    let copts = CompressOptions {
        level: 6,
        save_name: true,
        name_hint: Some("readme.txt".to_string()),
        mtime_hint: None,
    };
    let mut gzip_bytes = Vec::new();
    let mut input: &[u8] = b"documentation body";
    (GZIP.compress)(&mut input, &mut gzip_bytes, &copts).unwrap();

    let archive = dir.path().join("dump.gz");
    fs::write(&archive, &gzip_bytes).unwrap();
    fs::remove_file(&original).unwrap();

    let mut dopts = base_opts(Mode::Decompress);
    dopts.restore_name = Some(true);
    // Run from inside the temp directory so the recovered relative name
    // lands next to the archive rather than the process cwd.
    let cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let outcome = process_operand("dump.gz", &dopts);
    std::env::set_current_dir(cwd).unwrap();

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(fs::read(&original).unwrap(), b"documentation body");
}

#[test]
fn no_op_output_suffix_reports_failure_without_touching_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("already.Z");
    fs::write(&path, b"contents").unwrap();

    let opts = base_opts(Mode::Compress);
    let outcome = process_operand(path.to_str().unwrap(), &opts);
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(fs::read(&path).unwrap(), b"contents");
}
