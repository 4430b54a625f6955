//! Filesystem path helpers for the knowledge-base data directory.

use crate::types::{Domain, Stack};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Subdirectory of the data dir holding one JSON file per domain.
pub const DOMAINS_DIR: &str = "domains";
/// Subdirectory of the data dir holding one JSON file per stack.
pub const STACKS_DIR: &str = "stacks";

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// `<data_dir>/domains/<domain>.json`
pub fn domain_file(data_dir: &Path, domain: Domain) -> PathBuf {
    data_dir
        .join(DOMAINS_DIR)
        .join(format!("{}.json", domain.as_str()))
}

/// `<data_dir>/stacks/<stack>.json`
pub fn stack_file(data_dir: &Path, stack: Stack) -> PathBuf {
    data_dir
        .join(STACKS_DIR)
        .join(format!("{}.json", stack.as_str()))
}
