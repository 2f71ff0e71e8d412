//! Shared loader for the JSON request vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

pub fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}
