//! Binary-name alias detection for this binary's three historical names:
//! `compress` (default), `uncompress` (implies `-d`), and `zcat` (implies
//! `-d -c`).

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::args::Mode;
use crate::cli::constants::{set_zcat_alias, UNCOMPRESS_NAME, ZCAT_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasInit {
    pub mode_override: Option<Mode>,
    pub force_stdout: bool,
}

pub fn detect_alias(argv0: &str) -> AliasInit {
    let exe_name = last_name_from_path(argv0);

    if exe_name_match(exe_name, ZCAT_NAME) {
        set_zcat_alias(true);
        return AliasInit {
            mode_override: Some(Mode::Decompress),
            force_stdout: true,
        };
    }

    if exe_name_match(exe_name, UNCOMPRESS_NAME) {
        return AliasInit {
            mode_override: Some(Mode::Decompress),
            force_stdout: false,
        };
    }

    AliasInit {
        mode_override: None,
        force_stdout: false,
    }
}
