//! Directory recursion. Expands `-r` operands into a flat file list via
//! `util::file_list::create_file_list`, then drops files that compression
//! would skip anyway (already carrying the target suffix) so a recursive
//! run doesn't report spurious failures for them.

use std::path::Path;

use crate::algorithm::Algorithm;
use crate::cli::args::Mode;
use crate::pipeline::naming::compress_output_name;
use crate::util::create_file_list;

/// Expands `inputs` into the concrete list of file paths to process.
/// Non-recursive inputs are passed straight through (directories among them
/// are left for the driver to reject); recursive inputs are walked and, in
/// compress mode, filtered to exclude files already carrying the target
/// suffix.
pub fn expand_inputs(
    inputs: &[String],
    recursive: bool,
    mode: Mode,
    algo: &Algorithm,
    suffix_override: Option<&str>,
) -> std::io::Result<Vec<String>> {
    if !recursive {
        return Ok(inputs.to_vec());
    }

    let paths: Vec<&Path> = inputs.iter().map(|s| Path::new(s.as_str())).collect();
    let expanded = create_file_list(&paths)?;

    let mut result = Vec::with_capacity(expanded.len());
    for path in expanded {
        let name = path.to_string_lossy().into_owned();
        if mode == Mode::Compress && compress_output_name(&name, algo, suffix_override).is_none() {
            continue;
        }
        result.push(name);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::LZW;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn non_recursive_passes_inputs_through_unchanged() {
        let inputs = vec!["a.txt".to_string(), "b.txt".to_string()];
        let out = expand_inputs(&inputs, false, Mode::Compress, &LZW, None).unwrap();
        assert_eq!(out, inputs);
    }

    #[test]
    fn recursive_walks_directory_and_skips_already_suffixed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b.txt.Z"), b"already").unwrap();

        let inputs = vec![dir.path().to_string_lossy().into_owned()];
        let out = expand_inputs(&inputs, true, Mode::Compress, &LZW, None).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].ends_with("a.txt"));
    }

    #[test]
    fn recursive_decompress_keeps_every_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt.Z"), b"x").unwrap();
        let inputs = vec![dir.path().to_string_lossy().into_owned()];
        let out = expand_inputs(&inputs, true, Mode::Decompress, &LZW, None).unwrap();
        assert_eq!(out.len(), 1);
    }
}
