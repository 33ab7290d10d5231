#![allow(dead_code)]

pub mod command;
pub mod file;

/// Header of `diff.csv` for the `left` and `right` directories
pub const REPORT_HEADER: &str = "File Name,Checksum left,Checksum right\n";

pub fn sha1_hex(content: &str) -> String {
    dircmp::artifacts::checksums::checksum::Checksum::of_bytes(content.as_bytes()).to_string()
}
