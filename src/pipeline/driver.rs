//! Per-operand pipeline: resolve the algorithm and output name, open source
//! and destination, run the codec, then apply metadata and decide what
//! happens to the input. A single-file `process_file` entry point,
//! generalized from one codec to the algorithm registry.

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use crate::algorithm::{probe_all, Algorithm, CompressOptions};
use crate::cli::args::Mode;
use crate::cli::constants::display_level;
use crate::error::CodecError;
use crate::file_info::FileInfo;
use crate::pipeline::io::{open_dst, open_src};
use crate::pipeline::naming::{
    algorithm_for_extension, compress_output_name, decompress_output_name,
};
use crate::util::set_file_stat;

/// How one operand's processing concluded. Aggregated across operands by
/// the caller into the process exit code: fatal error dominates "didn't
/// shrink", which dominates success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Compression completed but the output was not smaller than the
    /// input; the output was discarded and the input left untouched.
    NotShrunk,
    Failed,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: Mode,
    pub stdout: bool,
    pub force: bool,
    pub keep: bool,
    pub list: bool,
    pub test: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub restore_name: Option<bool>,
    pub algorithm: Option<&'static Algorithm>,
    pub level: Option<i32>,
    pub suffix: Option<String>,
    /// Explicit `-o FILE`; only ever set when there is exactly one operand
    /// (enforced by `cli::args::validate`).
    pub output: Option<String>,
}

/// Number of leading bytes read to probe a format when the extension
/// doesn't already resolve one. 6 bytes covers every registered magic
/// (xz's is the longest at 6).
const PROBE_LEN: usize = 6;

pub fn process_operand(input_path: &str, opts: &RunOptions) -> Outcome {
    match opts.mode {
        Mode::Compress => process_compress(input_path, opts),
        Mode::Decompress => process_decompress(input_path, opts),
    }
}

fn process_compress(input_path: &str, opts: &RunOptions) -> Outcome {
    let algo = opts.algorithm.unwrap_or(&crate::algorithm::LZW);

    let dest_name = if opts.stdout || opts.output.is_some() {
        None
    } else {
        match compress_output_name(input_path, algo, opts.suffix.as_deref()) {
            Some(name) => Some(name),
            None => {
                if display_level() >= 2 {
                    eprintln!("{input_path}: already has {} suffix -- unchanged", {
                        let ext = opts.suffix.as_deref().unwrap_or_else(|| algo.primary_extension());
                        format!(".{ext}")
                    });
                }
                return Outcome::Failed;
            }
        }
    };

    let mut input = match open_src(input_path) {
        Ok(r) => r,
        Err(e) => {
            report_open_error(input_path, &e);
            return Outcome::Failed;
        }
    };

    let source_meta = fs::metadata(input_path).ok();
    let level = opts.level.unwrap_or(algo.default_level);
    let copts = CompressOptions {
        level,
        save_name: opts.restore_name.unwrap_or(false),
        name_hint: Some(input_path.to_string()),
        mtime_hint: source_meta.as_ref().and_then(|m| m.modified().ok()),
    };

    if opts.list || opts.test {
        let mut sink = io::sink();
        return match (algo.compress)(&mut input, &mut sink, &copts) {
            Ok(_) => Outcome::Success,
            Err(e) => {
                report_codec_error(input_path, e);
                Outcome::Failed
            }
        };
    }

    let out_path = opts
        .output
        .clone()
        .or(dest_name)
        .unwrap_or_else(|| "-".to_string());
    let out_is_stdout = opts.stdout || out_path == "-";

    let mut buffer = Vec::new();
    let info = {
        let mut sink: Box<dyn Write> = Box::new(Cursor::new(&mut buffer));
        match (algo.compress)(&mut input, &mut sink, &copts) {
            Ok(info) => info,
            Err(e) => {
                report_codec_error(input_path, e);
                return Outcome::Failed;
            }
        }
    };

    if !out_is_stdout && info.compressed_bytes >= info.uncompressed_bytes && !opts.force {
        if display_level() >= 2 {
            eprintln!("{input_path}: no savings -- file unchanged");
        }
        return Outcome::NotShrunk;
    }

    if let Err(e) = write_destination(&out_path, out_is_stdout, opts.force, &buffer) {
        report_open_error(&out_path, &e);
        return Outcome::Failed;
    }

    if opts.verbose && display_level() >= 3 {
        eprintln!(
            "{input_path}: -- replaced with {out_path} ({:.1}% savings)",
            info.ratio() * 100.0
        );
    }

    if !out_is_stdout {
        if let Some(meta) = &source_meta {
            copy_metadata(Path::new(&out_path), meta);
        }
        if !opts.keep {
            let _ = fs::remove_file(input_path);
        }
    }

    Outcome::Success
}

fn process_decompress(input_path: &str, opts: &RunOptions) -> Outcome {
    // If the bare name doesn't exist on disk and carries no recognized
    // extension, retry with the suffix appended — lets `compress -d foo`
    // find `foo.Z` without the caller spelling it out.
    let suffix = opts.suffix.as_deref().unwrap_or("Z");
    let input_path = if !Path::new(input_path).exists()
        && input_path != "-"
        && algorithm_for_extension(input_path, crate::algorithm::REGISTRY).is_none()
    {
        let candidate = format!("{input_path}.{suffix}");
        if Path::new(&candidate).exists() {
            candidate
        } else {
            input_path.to_string()
        }
    } else {
        input_path.to_string()
    };
    let input_path = input_path.as_str();

    // An extension match always wins over content probing, even if the
    // content turns out to mismatch (the codec's own header check then
    // reports CodecError::Format).
    let by_ext = algorithm_for_extension(input_path, crate::algorithm::REGISTRY);

    let mut input = match open_src(input_path) {
        Ok(r) => r,
        Err(e) => {
            report_open_error(input_path, &e);
            return Outcome::Failed;
        }
    };

    let algo = match by_ext {
        Some(a) => a,
        None => {
            let mut probe_buf = [0u8; PROBE_LEN];
            let n = match read_fill(&mut input, &mut probe_buf) {
                Ok(n) => n,
                Err(e) => {
                    report_open_error(input_path, &e);
                    return Outcome::Failed;
                }
            };
            let Some(found) = probe_all(&probe_buf[..n]) else {
                if display_level() >= 1 {
                    eprintln!("{input_path}: not in a supported format");
                }
                return Outcome::Failed;
            };
            // Rewind logically: chain the already-read bytes back in front
            // of the remaining stream so the codec sees the full header.
            input = Box::new(Cursor::new(probe_buf[..n].to_vec()).chain(input));
            found
        }
    };

    let dest_name = if opts.stdout || opts.output.is_some() {
        None
    } else {
        decompress_output_name(input_path, algo)
    };

    let mut buffer = Vec::new();
    let info = {
        let mut sink: Box<dyn Write> = if opts.list || opts.test {
            Box::new(io::sink())
        } else {
            Box::new(Cursor::new(&mut buffer))
        };
        match (algo.decompress)(&mut input, &mut sink) {
            Ok(info) => info,
            Err(e) => {
                report_codec_error(input_path, e);
                return Outcome::Failed;
            }
        }
    };

    if opts.list || opts.test {
        if opts.list && display_level() >= 2 {
            println!(
                "{input_path}: {} bytes -> {} bytes",
                info.compressed_bytes, info.uncompressed_bytes
            );
        }
        return Outcome::Success;
    }

    // Restore-name mode: if the codec recovered a stored filename and the
    // caller asked for it (`-N`), that name wins over the extension-derived
    // one. The payload is already fully buffered above, so opening the real
    // destination late costs nothing extra — see pipeline::io::DstFile docs.
    let restore = opts.restore_name.unwrap_or(false);
    let out_path = opts
        .output
        .clone()
        .or_else(|| {
            if restore {
                info.original_name.clone()
            } else {
                None
            }
        })
        .or(dest_name)
        .unwrap_or_else(|| "-".to_string());
    let out_is_stdout = opts.stdout || out_path == "-";

    if let Err(e) = write_destination(&out_path, out_is_stdout, opts.force, &buffer) {
        report_open_error(&out_path, &e);
        return Outcome::Failed;
    }

    if !out_is_stdout {
        let source_meta = fs::metadata(input_path).ok();
        if let Some(mtime) = info.mtime.or_else(|| source_meta.as_ref().and_then(|m| m.modified().ok())) {
            if let Some(meta) = &source_meta {
                copy_metadata_with_mtime(Path::new(&out_path), meta, mtime);
            }
        } else if let Some(meta) = &source_meta {
            copy_metadata(Path::new(&out_path), meta);
        }
        if !opts.keep {
            let _ = fs::remove_file(input_path);
        }
    }

    Outcome::Success
}

fn write_destination(path: &str, is_stdout: bool, force: bool, buffer: &[u8]) -> io::Result<()> {
    if is_stdout {
        io::stdout().write_all(buffer)?;
        return Ok(());
    }
    let mut dst = open_dst(path, force)?;
    dst.write_all(buffer)?;
    Ok(())
}

fn read_fill(r: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match r.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(unix)]
fn copy_metadata(path: &Path, meta: &fs::Metadata) {
    use std::os::unix::fs::MetadataExt;
    if let Ok(mtime) = meta.modified() {
        let _ = set_file_stat(path, mtime, meta.uid(), meta.gid(), meta.mode());
    }
}

#[cfg(not(unix))]
fn copy_metadata(path: &Path, meta: &fs::Metadata) {
    if let Ok(mtime) = meta.modified() {
        let _ = set_file_stat(path, mtime, 0, 0, 0o644);
    }
}

#[cfg(unix)]
fn copy_metadata_with_mtime(path: &Path, meta: &fs::Metadata, mtime: std::time::SystemTime) {
    use std::os::unix::fs::MetadataExt;
    let _ = set_file_stat(path, mtime, meta.uid(), meta.gid(), meta.mode());
}

#[cfg(not(unix))]
fn copy_metadata_with_mtime(path: &Path, _meta: &fs::Metadata, mtime: std::time::SystemTime) {
    let _ = set_file_stat(path, mtime, 0, 0, 0o644);
}

fn report_open_error(path: &str, err: &io::Error) {
    if display_level() >= 1 {
        eprintln!("{path}: {err}");
    }
}

fn report_codec_error(path: &str, err: CodecError) {
    if display_level() >= 1 {
        eprintln!("{path}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

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
    fn compress_then_decompress_round_trips() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("data.txt");
        fs::write(&src, b"hello hello hello hello hello world".repeat(4)).unwrap();

        let mut opts = base_opts(Mode::Compress);
        opts.keep = true;
        let outcome = process_operand(src.to_str().unwrap(), &opts);
        assert_eq!(outcome, Outcome::Success);

        let compressed = src.with_extension("txt.Z");
        assert!(compressed.exists());

        let mut dopts = base_opts(Mode::Decompress);
        dopts.keep = true;
        let outcome = process_operand(compressed.to_str().unwrap(), &dopts);
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(fs::read(&src).unwrap(), b"hello hello hello hello hello world".repeat(4));
    }

    #[test]
    fn compress_skips_already_suffixed_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("already.Z");
        fs::write(&src, b"irrelevant").unwrap();
        let opts = base_opts(Mode::Compress);
        assert_eq!(process_operand(src.to_str().unwrap(), &opts), Outcome::Failed);
    }

    #[test]
    fn decompress_unrecognized_format_fails() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("plain.bin");
        fs::write(&src, b"not a compressed stream").unwrap();
        let opts = base_opts(Mode::Decompress);
        assert_eq!(process_operand(src.to_str().unwrap(), &opts), Outcome::Failed);
    }
}
