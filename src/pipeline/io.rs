//! Source/destination opening. The historical `-`/stdio sentinel is kept,
//! but real paths go through raw `nix::fcntl::open` calls so `O_NOFOLLOW`
//! and `O_CREAT | O_EXCL` can be expressed directly.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use crate::cli::constants::display_level;
use crate::util::is_directory;

pub const STDIN_MARK: &str = "-";
pub const STDOUT_MARK: &str = "-";

/// Opens `path` for reading. `"-"` means stdin. Rejects directories and,
/// on Unix, symlinks (`O_NOFOLLOW`) and anything not a regular file.
pub fn open_src(path: &str) -> io::Result<Box<dyn Read>> {
    if path == STDIN_MARK {
        if display_level() >= 4 {
            eprintln!("Using stdin for input");
        }
        return Ok(Box::new(io::stdin()));
    }

    if is_directory(Path::new(path)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path}: is a directory -- ignored"),
        ));
    }

    #[cfg(unix)]
    {
        use nix::fcntl::{open, OFlag};
        use nix::sys::stat::Mode;
        use std::os::unix::io::FromRawFd;

        let fd = open(path, OFlag::O_RDONLY | OFlag::O_NOFOLLOW, Mode::empty())
            .map_err(io::Error::from)?;
        // SAFETY: `fd` was just returned by a successful `open`, is owned by
        // this call, and is not used anywhere else.
        let f = unsafe { File::from_raw_fd(fd) };
        if !f.metadata()?.file_type().is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{path}: not a regular file"),
            ));
        }
        Ok(Box::new(BufReader::new(f)))
    }
    #[cfg(not(unix))]
    {
        let f = File::open(path)?;
        Ok(Box::new(BufReader::new(f)))
    }
}

/// A destination handle opened by [`open_dst`]. Restore-name decompression
/// needs the real filename before the destination can be opened; this crate
/// resolves that by decompressing into memory first and opening the
/// destination only once the name is known, rather than threading an opener
/// closure through the codec layer — see DESIGN.md.
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens `path` for writing with create+excl semantics. `"-"` means stdout.
/// On collision: unlinks and reopens when `force`; otherwise prompts
/// interactively at display level > 1, or fails silently at or below it.
pub fn open_dst(path: &str, force: bool) -> io::Result<DstFile> {
    if path == STDOUT_MARK {
        return Ok(DstFile {
            inner: Box::new(io::stdout()),
            is_stdout: true,
        });
    }

    if Path::new(path).exists() {
        if force {
            std::fs::remove_file(path)?;
        } else if display_level() <= 1 {
            eprintln!("{path} already exists; not overwritten");
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{path}: already exists; not overwritten"),
            ));
        } else {
            eprint!("{path} already exists; do you want to overwrite (y/N) ? ");
            io::stderr().flush().ok();
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            let first = line.trim_start().chars().next().unwrap_or('\0');
            if first != 'y' && first != 'Y' {
                eprintln!("    not overwritten");
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{path}: not overwritten"),
                ));
            }
            std::fs::remove_file(path)?;
        }
    }

    #[cfg(unix)]
    {
        use nix::fcntl::{open, OFlag};
        use nix::sys::stat::Mode;
        use std::os::unix::io::FromRawFd;

        let fd = open(
            path,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_EXCL | OFlag::O_NOFOLLOW,
            Mode::from_bits_truncate(0o666),
        )
        .map_err(io::Error::from)?;
        // SAFETY: as above, `fd` is freshly owned and not aliased.
        let f = unsafe { File::from_raw_fd(fd) };
        Ok(DstFile {
            inner: Box::new(f),
            is_stdout: false,
        })
    }
    #[cfg(not(unix))]
    {
        let f = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(DstFile {
            inner: Box::new(f),
            is_stdout: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_src_nonexistent_errors() {
        assert!(open_src("/nonexistent/path/that/cannot/exist.Z").is_err());
    }

    #[test]
    fn open_src_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_src(dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn open_dst_creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.Z");
        let dst = open_dst(path.to_str().unwrap(), false).unwrap();
        assert!(!dst.is_stdout);
    }

    #[test]
    fn open_dst_force_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.Z");
        std::fs::write(&path, b"old").unwrap();
        let dst = open_dst(path.to_str().unwrap(), true).unwrap();
        assert!(!dst.is_stdout);
    }
}
