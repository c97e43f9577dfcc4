//! Shared fixtures for core integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Two-item catalog in the on-disk JSON layout.
pub const CATALOG_JSON: &str = r#"[
  {
    "id": "v1",
    "title": "Coastal Cliffs",
    "description": "Waves against basalt",
    "category": "nature",
    "stream": "https://cdn.example.com/v1.mp4",
    "poster": "https://cdn.example.com/v1.jpg",
    "price": 4.99
  },
  {
    "id": "v2",
    "title": "Night Market",
    "category": "city",
    "stream": "https://cdn.example.com/v2.mp4",
    "poster": "https://cdn.example.com/v2.jpg",
    "price": 0
  }
]"#;

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
