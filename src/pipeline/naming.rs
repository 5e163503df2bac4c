//! Output-name resolution. Pure functions over strings; no filesystem
//! access, so they're straightforward to test in isolation.

use crate::algorithm::Algorithm;

/// Compress-mode output name: append the algorithm's primary extension (or
/// `suffix_override`) unless the name already ends in it.
///
/// Returns `None` when the name already carries the target extension — the
/// caller's cue to skip the file in recursive mode.
pub fn compress_output_name(input: &str, algo: &Algorithm, suffix_override: Option<&str>) -> Option<String> {
    let ext = suffix_override.unwrap_or_else(|| algo.primary_extension());
    let dotted = format!(".{ext}");
    if input.ends_with(&dotted) {
        return None;
    }
    Some(format!("{input}{dotted}"))
}

/// Splits `name` into `(stem, extension)` at the last `.`, if any. A leading
/// dot (dotfile) does not count as an extension separator.
fn split_extension(name: &str) -> Option<(&str, &str)> {
    let dot = name.rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some((&name[..dot], &name[dot + 1..]))
}

/// Decompress-mode output name once `algo` has already been selected for
/// `input` by extension match. Returns `None` if `input` has no extension
/// matching any of `algo`'s entries (caller should not have reached here in
/// that case; kept total rather than panicking).
pub fn decompress_output_name(input: &str, algo: &Algorithm) -> Option<String> {
    let (stem, ext) = split_extension(input)?;
    let replacement = algo.resolve_extension(ext)?;
    match replacement {
        Some(repl) => Some(format!("{stem}.{repl}")),
        None => Some(stem.to_string()),
    }
}

/// Looks up which registered algorithm (if any) claims `input`'s extension.
pub fn algorithm_for_extension<'a>(
    input: &str,
    registry: &'a [&'a Algorithm],
) -> Option<&'a Algorithm> {
    let (_, ext) = split_extension(input)?;
    registry.iter().find(|a| a.resolve_extension(ext).is_some()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{GZIP, LZW, REGISTRY, XZ};

    #[test]
    fn compress_appends_extension() {
        assert_eq!(
            compress_output_name("notes.txt", &LZW, None).as_deref(),
            Some("notes.txt.Z")
        );
    }

    #[test]
    fn compress_skips_if_already_suffixed() {
        assert_eq!(compress_output_name("archive.Z", &LZW, None), None);
    }

    #[test]
    fn compress_honors_suffix_override() {
        assert_eq!(
            compress_output_name("notes.txt", &LZW, Some("lzw")).as_deref(),
            Some("notes.txt.lzw")
        );
    }

    #[test]
    fn decompress_strips_plain_extension() {
        assert_eq!(
            decompress_output_name("notes.txt.Z", &LZW).as_deref(),
            Some("notes.txt")
        );
    }

    #[test]
    fn decompress_replaces_tgz_with_tar() {
        assert_eq!(
            decompress_output_name("backup.tgz", &GZIP).as_deref(),
            Some("backup.tar")
        );
    }

    #[test]
    fn decompress_replaces_taz_with_tar() {
        assert_eq!(
            decompress_output_name("backup.taz", &LZW).as_deref(),
            Some("backup.tar")
        );
    }

    #[test]
    fn decompress_returns_none_for_unrelated_extension() {
        assert_eq!(decompress_output_name("notes.txt", &GZIP), None);
    }

    #[test]
    fn algorithm_for_extension_finds_xz() {
        let algo = algorithm_for_extension("archive.xz", REGISTRY).unwrap();
        assert_eq!(algo.primary_name(), "xz");
    }

    #[test]
    fn algorithm_for_extension_none_when_no_dot() {
        assert!(algorithm_for_extension("README", REGISTRY).is_none());
    }

    #[test]
    fn algorithm_for_extension_ignores_leading_dot_dotfiles() {
        assert!(algorithm_for_extension(".bashrc", REGISTRY).is_none());
    }

    #[test]
    fn xz_extension_resolves_to_xz_algorithm_specifically() {
        let algo = algorithm_for_extension("a.xz", REGISTRY).unwrap();
        assert_eq!(algo.primary_name(), XZ.primary_name());
    }
}
