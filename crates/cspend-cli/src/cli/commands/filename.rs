//! `cspend filename <page>`.

use cspend_core::storage;

pub fn run_filename(prefix: Option<&str>, page: u32) {
    println!("{}", storage::generate_filename(prefix, page));
}
