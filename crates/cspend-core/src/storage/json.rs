//! UTF-8 JSON save/load.

use serde_json::Value;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::temp_path;

/// Write `value` as compact UTF-8 JSON to `path`. Non-ASCII text is written
/// as-is, not `\u` escaped. Goes through a `.part` file and a rename.
pub fn save_json(value: &Value, path: &Path) -> io::Result<()> {
    let tmp = temp_path(path);
    let result = write_file(value, &tmp).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn write_file(value: &Value, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer(&mut w, value)?;
    w.flush()?;
    w.into_inner().map_err(|e| e.into_error())?.sync_all()
}

/// Read a JSON document previously written with [`save_json`].
pub fn load_json(path: &Path) -> io::Result<Value> {
    let data = std::fs::read(path)?;
    serde_json::from_slice(&data).map_err(io::Error::from)
}
