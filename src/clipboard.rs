//! System clipboard access for CopyFilePath.

use arboard::Clipboard;

/// Place `text` on the system clipboard.
pub fn copy_text(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_owned())
}
