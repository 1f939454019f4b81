#![allow(dead_code)]

use std::process::{Command, Output};

pub trait CommandExt {
    fn run_and_check(&mut self) -> String;
    fn run_and_fail(&mut self, code: i32) -> String;
}

impl CommandExt for Command {
    fn run_and_check(&mut self) -> String {
        let output = self.output().unwrap();

        assert!(
            output.status.success(),
            "Error running {}:\n{}",
            self.get_program().to_string_lossy(),
            String::from_utf8_lossy(if output.stderr.is_empty() {
                &output.stdout
            } else {
                &output.stderr
            })
        );

        String::from_utf8(output.stdout).unwrap()
    }

    fn run_and_fail(&mut self, code: i32) -> String {
        let Output { status, stderr, .. } = self.output().unwrap();

        assert_eq!(
            status.code(),
            Some(code),
            "Unexpected exit status from {}:\n{}",
            self.get_program().to_string_lossy(),
            String::from_utf8_lossy(&stderr)
        );

        String::from_utf8(stderr).unwrap()
    }
}

pub fn idgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_unicode-idgen"))
}

/// Reads back every `#define NAME {...}` in a generated header.
pub fn parse_header(header: &str) -> Vec<(String, Vec<u32>)> {
    let mut tables = Vec::new();
    let mut lines = header.lines();

    while let Some(line) = lines.next() {
        let Some(define) = line.strip_prefix("#define ") else {
            continue;
        };

        let name = define.trim_end_matches(" \\").to_string();
        let body = lines.next().unwrap().trim();
        let body = body.strip_prefix('{').unwrap().strip_suffix('}').unwrap();

        let values = body
            .split(", ")
            .filter(|value| !value.is_empty())
            .map(|value| u32::from_str_radix(value.strip_prefix("0x").unwrap(), 16).unwrap())
            .collect();

        tables.push((name, values));
    }

    tables
}

pub fn table<'a>(tables: &'a [(String, Vec<u32>)], name: &str) -> &'a [u32] {
    &tables
        .iter()
        .find(|(table, _)| table == name)
        .unwrap_or_else(|| panic!("no table named {name}"))
        .1
}
