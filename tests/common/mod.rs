#![allow(dead_code)]


/// Read a file of the repository under test as a string
pub fn read_to_string(dir: &std::path::Path, relative: &str) -> String {
    std::fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}
