// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use libsidebar::{Loader, SIDEBAR_FILE_NAME, SidebarIndex};
use tempfile::TempDir;

/// Root of the rustdoc fixture tree checked in next to the tests.
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Raw bytes of a fixture module, e.g. `futures_util::io`.
pub fn fixture_bytes(module: &str) -> Vec<u8> {
    fs::read(Loader::new().sidebar_path(&fixtures_root(), module)).unwrap()
}

/// Load a fixture module through the loader, as a rendering layer would.
pub fn load_fixture(module: &str) -> SidebarIndex {
    let root = fixtures_root();
    let loader = Loader::new();
    loader.load_file(&root, &loader.sidebar_path(&root, module)).unwrap()
}

/// Names listed under `category`, in order.
pub fn names<'a>(index: &'a SidebarIndex, category: &str) -> Vec<&'a str> {
    index
        .entries_for(category)
        .iter()
        .map(|entry| entry.name())
        .collect()
}

/// Build a documentation tree in a temporary directory from `(module, contents)` pairs.
pub fn doc_tree(modules: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (module, contents) in modules {
        let mut dir = temp_dir.path().to_path_buf();
        dir.extend(module.split("::"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SIDEBAR_FILE_NAME), contents).unwrap();
    }
    temp_dir
}
