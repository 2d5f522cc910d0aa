//! Output helpers shared by the history commands

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable disabling the pager
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// `Write` adapter over the minus pager
///
/// Text pushed through it is buffered by the pager and shown by
/// `minus::page_all` once the command has finished writing.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Page long output only for an interactive stdout, unless `NO_PAGER` is set
pub fn should_page() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal()
}
