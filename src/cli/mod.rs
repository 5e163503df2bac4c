//! Command-line layer: argument parsing, alias detection, and help/usage
//! text. `constants` holds shared globals/macros, `args` does parsing,
//! `init` does binary-name alias detection, `help` holds usage text.

pub mod arg_utils;
pub mod args;
pub mod constants;
pub mod help;
pub mod init;
