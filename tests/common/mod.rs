#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

/// Non-empty lines of a fixture file.
pub fn fixture_lines(name: &str) -> Vec<String> {
    fs::read_to_string(fixture_path(name))
        .unwrap()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}

pub const BOD: &str = "$GPBOD,234.9,T,228.8,M,RUSKI,*1D";
pub const VDM_PART1: &str =
    "!AIVDM,2,1,3,B,55P5TL01VIaAL@7WKO@mBplU@<PDhh000000001S;AJ::4A80?4i@E53,0*3E";
pub const VDM_PART2: &str = "!AIVDM,2,2,3,B,1@0000000000000,2*55";
pub const VDM_SINGLE: &str = "!AIVDM,1,1,,A,13u?etPv2;0n:dDPwUM1U1Cb069D,0*24";
