//! Binary entry point: alias detection from `argv[0]`, argument parsing,
//! then dispatch through the pipeline driver with exit-code aggregation.

use std::io::IsTerminal;

use rzcompress::algorithm::{by_name, Algorithm, LZW};
use rzcompress::cli::args::{parse_args_from, validate, LevelRequest, Mode, ParsedArgs};
use rzcompress::cli::constants::{display_level, set_display_level};
use rzcompress::cli::help::{print_bad_usage, print_usage_advanced, print_version};
use rzcompress::cli::init::detect_alias;
use rzcompress::pipeline::walk::expand_inputs;
use rzcompress::pipeline::{process_operand, Outcome, RunOptions};

fn resolve_algorithm(args: &ParsedArgs) -> Result<&'static Algorithm, String> {
    match &args.algorithm {
        Some(name) => by_name(name).ok_or_else(|| format!("unknown algorithm '{name}'")),
        None => Ok(&LZW),
    }
}

fn resolve_level(args: &ParsedArgs, algo: &'static Algorithm) -> Option<i32> {
    match args.level {
        Some(LevelRequest::Numeric(n)) => Some(n.clamp(algo.min_level, algo.max_level)),
        Some(LevelRequest::Fast) => Some(algo.min_level),
        Some(LevelRequest::Best) => Some(algo.max_level),
        None => None,
    }
}

fn run(mut args: ParsedArgs, program: &str) -> i32 {
    if args.show_help {
        print_usage_advanced(program);
        return 0;
    }
    if args.show_version {
        print_version();
        return 0;
    }

    if let Err(e) = validate(&args) {
        print_bad_usage(program, &e.to_string());
    }

    if args.quiet {
        set_display_level(1);
    }
    if args.verbose && display_level() == 2 {
        set_display_level(3);
    }

    let algo = match resolve_algorithm(&args) {
        Ok(a) => a,
        Err(msg) => print_bad_usage(program, &msg),
    };
    let level = resolve_level(&args, algo);

    if args.inputs.is_empty() {
        args.inputs.push("-".to_string());
        if args.output.is_none() {
            args.stdout = true;
        }
    }

    if args.inputs.iter().any(|f| f == "-") && std::io::stdin().is_terminal() && !args.list && !args.test {
        if display_level() >= 1 {
            eprintln!("refusing to read from a console");
        }
        return 1;
    }

    if args.stdout && std::io::stdout().is_terminal() && !args.list {
        if display_level() >= 1 {
            eprintln!("refusing to write to console without -c");
        }
        return 1;
    }

    if args.stdout && display_level() == 2 {
        set_display_level(1);
    }

    let expanded = match expand_inputs(
        &args.inputs,
        args.recursive,
        args.mode,
        algo,
        args.suffix.as_deref(),
    ) {
        Ok(list) => list,
        Err(e) => {
            if display_level() >= 1 {
                eprintln!("{e}");
            }
            return 1;
        }
    };

    if expanded.len() > 1 && display_level() == 2 {
        set_display_level(1);
    }

    let run_opts = RunOptions {
        mode: args.mode,
        stdout: args.stdout,
        force: args.force,
        keep: args.keep,
        list: args.list,
        test: args.test,
        quiet: args.quiet,
        verbose: args.verbose,
        restore_name: args.restore_name,
        algorithm: if args.mode == Mode::Compress {
            Some(algo)
        } else {
            None
        },
        level,
        suffix: args.suffix.clone(),
        output: args.output.clone(),
    };

    // Exit-code precedence: a fatal error on any operand dominates
    // "didn't shrink", which dominates success.
    let mut worst = Outcome::Success;
    for input in &expanded {
        let outcome = process_operand(input, &run_opts);
        worst = match (worst, outcome) {
            (Outcome::Failed, _) | (_, Outcome::Failed) => Outcome::Failed,
            (Outcome::NotShrunk, _) | (_, Outcome::NotShrunk) => Outcome::NotShrunk,
            _ => Outcome::Success,
        };
    }

    match worst {
        Outcome::Success => 0,
        Outcome::NotShrunk => 2,
        Outcome::Failed => 1,
    }
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_else(|| "compress".to_string());
    let alias = detect_alias(&argv0);

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut args = match parse_args_from(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{argv0}: {e}");
            std::process::exit(1);
        }
    };

    if let Some(mode) = alias.mode_override {
        args.mode = mode;
    }
    if alias.force_stdout {
        args.stdout = true;
    }

    let exit_code = run(args, &argv0);
    std::process::exit(exit_code);
}
