//! Output files: naming, directory preparation and JSON persistence.
//!
//! Each page is written to `<name>.part` first and renamed into place, so a
//! crash mid-write never leaves a truncated `page_<n>.json` behind.

mod json;

pub use json::{load_json, save_json};

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// File name for a page: `{prefix}_page_{n}.json`, or `page_{n}.json` when
/// the prefix is absent or empty.
///
/// # Examples
///
/// - `generate_filename(Some("data"), 7)` → `"data_page_7.json"`
/// - `generate_filename(None, 1)` → `"page_1.json"`
pub fn generate_filename(prefix: Option<&str>, page: u32) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{}_page_{}.json", p, page),
        _ => format!("page_{}.json", page),
    }
}

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn prepare_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `page_1.json` → `page_1.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
