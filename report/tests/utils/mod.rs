use std::{fs, path::PathBuf};

use log::info;

pub fn resource_path(file: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/resources");
    path.push(file);
    path
}

pub fn read_resource(file: &str) -> String {
    let path = resource_path(file);
    info!("reading test resource: {}", path.display());
    fs::read_to_string(path).expect("test resource should be readable")
}
