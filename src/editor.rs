//! External editor launching.
//!
//! The configured editor command is split on whitespace so values like
//! `"code --wait"` work; the target path is appended as the final argument.
//! The call blocks until the editor exits. The caller is responsible for
//! suspending the terminal UI around it.

use std::io;
use std::path::Path;
use std::process::Command;

pub fn launch(editor: &str, path: &Path) -> io::Result<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "editor command is empty",
        ));
    };
    let status = Command::new(program).args(parts).arg(path).status()?;
    if !status.success() {
        return Err(io::Error::other(format!("editor exited with {status}")));
    }
    Ok(())
}
