//! Command-line argument parsing, hand-rolled: a single pass over `argv`
//! recognizing aggregated short flags (`-kf`), `--long` / `--long=value`
//! options, and bare digits, accumulating into a [`ParsedArgs`] before any
//! filesystem work happens. `clap` is declared nowhere in this crate: the
//! historical `compress(1)` flag set (short aggregated options, bare digit
//! levels, `--fast`/`--best`) doesn't map cleanly onto a declarative parser,
//! and a hand-rolled loop keeps every rule auditable in one place.

use anyhow::{anyhow, Result};

/// Compression level request before it's resolved against the chosen
/// algorithm's [min, default, max] range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRequest {
    Numeric(i32),
    Fast,
    Best,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

#[derive(Debug, Clone)]
pub struct ParsedArgs {
    pub mode: Mode,
    pub stdout: bool,
    pub force: bool,
    pub keep: bool,
    pub list: bool,
    pub test: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub recursive: bool,
    /// `Some(true)` for `-N/--name`, `Some(false)` for `-n/--no-name`.
    pub restore_name: Option<bool>,
    /// Explicit algorithm selection via `-m`, `-g`, or `-O`.
    pub algorithm: Option<String>,
    pub level: Option<LevelRequest>,
    pub suffix: Option<String>,
    pub output: Option<String>,
    pub show_help: bool,
    pub show_version: bool,
    pub inputs: Vec<String>,
}

impl Default for ParsedArgs {
    fn default() -> Self {
        ParsedArgs {
            mode: Mode::Compress,
            stdout: false,
            force: false,
            keep: false,
            list: false,
            test: false,
            quiet: false,
            verbose: false,
            recursive: false,
            restore_name: None,
            algorithm: None,
            level: None,
            suffix: None,
            output: None,
            show_help: false,
            show_version: false,
            inputs: Vec::new(),
        }
    }
}

/// Parses `std::env::args()`, skipping argv[0].
pub fn parse_args() -> Result<ParsedArgs> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&argv)
}

pub fn parse_args_from(argv: &[String]) -> Result<ParsedArgs> {
    let mut args = ParsedArgs::default();
    let mut only_inputs = false;
    let mut i = 0;

    while i < argv.len() {
        let arg = &argv[i];

        if only_inputs || arg == "-" || !arg.starts_with('-') {
            args.inputs.push(arg.clone());
            i += 1;
            continue;
        }

        if arg == "--" {
            only_inputs = true;
            i += 1;
            continue;
        }

        if let Some(rest) = arg.strip_prefix("--") {
            parse_long_option(rest, &mut args)?;
            i += 1;
            continue;
        }

        // Aggregated short options, e.g. `-kfv`, `-b16`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            let c = chars[j];
            match c {
                'c' => args.stdout = true,
                'd' => args.mode = Mode::Decompress,
                'f' => args.force = true,
                'g' => args.algorithm = Some("gzip".to_string()),
                'h' => args.show_help = true,
                'k' => args.keep = true,
                'l' => args.list = true,
                'N' => args.restore_name = Some(true),
                'n' => args.restore_name = Some(false),
                'O' => args.algorithm = Some("lzw".to_string()),
                'q' => args.quiet = true,
                'r' => args.recursive = true,
                't' => args.test = true,
                'v' => args.verbose = true,
                'V' => args.show_version = true,
                'b' => {
                    let rest: String = chars[j + 1..].iter().collect();
                    let value = if rest.is_empty() {
                        i += 1;
                        argv.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -b requires a level"))?
                    } else {
                        rest
                    };
                    args.level = Some(LevelRequest::Numeric(parse_level(&value)?));
                    j = chars.len();
                    continue;
                }
                'm' => {
                    let rest: String = chars[j + 1..].iter().collect();
                    let value = if rest.is_empty() {
                        i += 1;
                        argv.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -m requires an algorithm name"))?
                    } else {
                        rest
                    };
                    args.algorithm = Some(value);
                    j = chars.len();
                    continue;
                }
                'o' => {
                    let rest: String = chars[j + 1..].iter().collect();
                    let value = if rest.is_empty() {
                        i += 1;
                        argv.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -o requires a filename"))?
                    } else {
                        rest
                    };
                    args.output = Some(value);
                    j = chars.len();
                    continue;
                }
                'S' => {
                    let rest: String = chars[j + 1..].iter().collect();
                    let value = if rest.is_empty() {
                        i += 1;
                        argv.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -S requires a suffix"))?
                    } else {
                        rest
                    };
                    args.suffix = Some(value.trim_start_matches('.').to_string());
                    j = chars.len();
                    continue;
                }
                '0'..='9' => {
                    args.level = Some(LevelRequest::Numeric(c as i32 - '0' as i32));
                    if args.algorithm.is_none() {
                        args.algorithm = Some("gzip".to_string());
                    }
                }
                other => return Err(anyhow!("bad usage: unrecognized option -{other}")),
            }
            j += 1;
        }
        i += 1;
    }

    Ok(args)
}

fn parse_long_option(rest: &str, args: &mut ParsedArgs) -> Result<()> {
    let (name, value) = match rest.split_once('=') {
        Some((n, v)) => (n, Some(v.to_string())),
        None => (rest, None),
    };
    match name {
        "stdout" | "to-stdout" => args.stdout = true,
        "decompress" | "uncompress" => args.mode = Mode::Decompress,
        "force" => args.force = true,
        "help" => args.show_help = true,
        "keep" => args.keep = true,
        "list" => args.list = true,
        "name" => args.restore_name = Some(true),
        "no-name" => args.restore_name = Some(false),
        "quiet" | "silent" => args.quiet = true,
        "recursive" => args.recursive = true,
        "test" => args.test = true,
        "verbose" => args.verbose = true,
        "version" => args.show_version = true,
        "ascii" => {} // accepted, ignored
        "fast" => args.level = Some(LevelRequest::Fast),
        "best" => args.level = Some(LevelRequest::Best),
        "suffix" => {
            let v = value.ok_or_else(|| anyhow!("bad usage: --suffix requires a value"))?;
            args.suffix = Some(v.trim_start_matches('.').to_string());
        }
        other => return Err(anyhow!("bad usage: unrecognized option --{other}")),
    }
    Ok(())
}

fn parse_level(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| anyhow!("bad usage: invalid level '{raw}'"))
}

/// Cross-flag constraints not expressible while scanning left-to-right:
/// `-o` is disallowed with `-c`, `-l`, `-r`, `-t`, or multiple inputs.
pub fn validate(args: &ParsedArgs) -> Result<()> {
    if args.output.is_some() {
        if args.stdout {
            return Err(anyhow!("bad usage: -o cannot be combined with -c"));
        }
        if args.list {
            return Err(anyhow!("bad usage: -o cannot be combined with -l"));
        }
        if args.recursive {
            return Err(anyhow!("bad usage: -o cannot be combined with -r"));
        }
        if args.test {
            return Err(anyhow!("bad usage: -o cannot be combined with -t"));
        }
        if args.inputs.len() > 1 {
            return Err(anyhow!("bad usage: -o cannot be combined with multiple inputs"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_compress_mode() {
        let parsed = parse_args_from(&argv(&["file.txt"])).unwrap();
        assert_eq!(parsed.mode, Mode::Compress);
        assert_eq!(parsed.inputs, vec!["file.txt"]);
    }

    #[test]
    fn aggregated_short_flags() {
        let parsed = parse_args_from(&argv(&["-dfv", "file.Z"])).unwrap();
        assert_eq!(parsed.mode, Mode::Decompress);
        assert!(parsed.force);
        assert!(parsed.verbose);
    }

    #[test]
    fn dash_b_with_attached_value() {
        let parsed = parse_args_from(&argv(&["-b16", "file.txt"])).unwrap();
        assert_eq!(parsed.level, Some(LevelRequest::Numeric(16)));
    }

    #[test]
    fn dash_b_with_separate_value() {
        let parsed = parse_args_from(&argv(&["-b", "12", "file.txt"])).unwrap();
        assert_eq!(parsed.level, Some(LevelRequest::Numeric(12)));
    }

    #[test]
    fn dash_m_selects_algorithm() {
        let parsed = parse_args_from(&argv(&["-m", "xz", "file.txt"])).unwrap();
        assert_eq!(parsed.algorithm.as_deref(), Some("xz"));
    }

    #[test]
    fn digit_sets_level_and_defaults_to_gzip() {
        let parsed = parse_args_from(&argv(&["-9", "file.txt"])).unwrap();
        assert_eq!(parsed.level, Some(LevelRequest::Numeric(9)));
        assert_eq!(parsed.algorithm.as_deref(), Some("gzip"));
    }

    #[test]
    fn digit_does_not_override_explicit_algorithm() {
        let parsed = parse_args_from(&argv(&["-m", "xz", "-9", "file.txt"])).unwrap();
        assert_eq!(parsed.algorithm.as_deref(), Some("xz"));
    }

    #[test]
    fn long_options_with_equals() {
        let parsed = parse_args_from(&argv(&["--suffix=.gz", "file.txt"])).unwrap();
        assert_eq!(parsed.suffix.as_deref(), Some("gz"));
    }

    #[test]
    fn fast_and_best_are_distinct_from_numeric() {
        let parsed = parse_args_from(&argv(&["--fast", "file.txt"])).unwrap();
        assert_eq!(parsed.level, Some(LevelRequest::Fast));
        let parsed = parse_args_from(&argv(&["--best", "file.txt"])).unwrap();
        assert_eq!(parsed.level, Some(LevelRequest::Best));
    }

    #[test]
    fn double_dash_stops_option_parsing() {
        let parsed = parse_args_from(&argv(&["--", "-weird-name"])).unwrap();
        assert_eq!(parsed.inputs, vec!["-weird-name"]);
    }

    #[test]
    fn lone_dash_is_an_input_not_an_option() {
        let parsed = parse_args_from(&argv(&["-c", "-"])).unwrap();
        assert_eq!(parsed.inputs, vec!["-"]);
    }

    #[test]
    fn unrecognized_short_option_errors() {
        assert!(parse_args_from(&argv(&["-Z"])).is_err());
    }

    #[test]
    fn validate_rejects_output_with_stdout() {
        let mut args = ParsedArgs::default();
        args.output = Some("out.Z".to_string());
        args.stdout = true;
        assert!(validate(&args).is_err());
    }

    #[test]
    fn validate_rejects_output_with_multiple_inputs() {
        let mut args = ParsedArgs::default();
        args.output = Some("out.Z".to_string());
        args.inputs = vec!["a".to_string(), "b".to_string()];
        assert!(validate(&args).is_err());
    }

    #[test]
    fn validate_allows_output_with_single_input() {
        let mut args = ParsedArgs::default();
        args.output = Some("out.Z".to_string());
        args.inputs = vec!["a".to_string()];
        assert!(validate(&args).is_ok());
    }
}
