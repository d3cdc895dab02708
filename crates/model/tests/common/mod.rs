use std::path::{Path, PathBuf};

/// Directory holding the netlist fixtures.
///
/// `TESTDATA_DIR` overrides the bundled `testdata/` directory so larger
/// benchmark sets can be pointed at without copying them in.
pub fn testdata_dir() -> PathBuf {
    std::env::var_os("TESTDATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata"))
}

/// Path of a fixture, looked up in [`testdata_dir`] first and the bundled
/// directory second.
pub fn fixture(name: &str) -> PathBuf {
    let path = testdata_dir().join(name);
    if path.exists() {
        return path;
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}
