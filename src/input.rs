// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Parsing of the plain text formats passed between the binaries.

use logger::*;
use thiserror::Error;

use std::io::{BufRead, Read};
use std::str::FromStr;

/// lines preceding the values in `radix-sort` output: the strategy banner and
/// the execution time
pub const SKIPPED_LINES: usize = 2;

/// upper bound on the up-front allocation for a declared input count
const MAX_PREALLOCATION: usize = 1 << 24;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input ended before line {line}")]
    MissingLine { line: usize },
    #[error("line {line} has no values")]
    NoValues { line: usize },
    #[error("line {line}: '{token}' is not an integer")]
    InvalidToken { line: usize, token: String },
    #[error("input is empty, expected a value count")]
    MissingCount,
    #[error("value {index}: '{token}' is not an unsigned integer")]
    InvalidValue { index: usize, token: String },
    #[error("expected {expected} values but input ended after {found}")]
    Truncated { expected: usize, found: usize },
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads three lines, ignores the first two and parses the whitespace
/// separated integers on the third.
pub fn read_plot_data<R: BufRead>(reader: R) -> Result<Vec<i64>, InputError> {
    let mut lines = reader.lines();

    for line in 1..=SKIPPED_LINES {
        let skipped = lines.next().ok_or(InputError::MissingLine { line })??;
        trace!("skipping line {}: {}", line, skipped);
    }

    let line = SKIPPED_LINES + 1;
    let text = lines.next().ok_or(InputError::MissingLine { line })??;
    let values = text
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| InputError::InvalidToken {
                line,
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<i64>, InputError>>()?;

    if values.is_empty() {
        return Err(InputError::NoValues { line });
    }
    Ok(values)
}

/// One label per value, its decimal representation.
pub fn labels<T: ToString>(data: &[T]) -> Vec<String> {
    data.iter().map(|v| v.to_string()).collect()
}

/// Reads a count followed by that many unsigned integers, separated by any
/// whitespace. Tokens after the last value are ignored.
pub fn read_sort_input<R: Read>(mut reader: R) -> Result<Vec<u64>, InputError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let mut tokens = content.split_whitespace();

    let count: usize = parse_token(tokens.next().ok_or(InputError::MissingCount)?, 0)?;

    let mut values = Vec::with_capacity(count.min(MAX_PREALLOCATION));
    for index in 0..count {
        let token = tokens.next().ok_or(InputError::Truncated {
            expected: count,
            found: index,
        })?;
        values.push(parse_token(token, index + 1)?);
    }

    if tokens.next().is_some() {
        debug!("ignoring input after {} values", count);
    }
    Ok(values)
}

fn parse_token<T: FromStr>(token: &str, index: usize) -> Result<T, InputError> {
    token.parse().map_err(|_| InputError::InvalidValue {
        index,
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_line_becomes_data_and_labels() {
        let data = read_plot_data("x\ny\n1 2 3\n".as_bytes()).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(labels(&data), vec!["1", "2", "3"]);
    }

    #[test]
    fn extra_whitespace_and_missing_newline() {
        let data = read_plot_data("a\nb\n  -4   5 \t6".as_bytes()).unwrap();
        assert_eq!(data, vec![-4, 5, 6]);
    }

    #[test]
    fn lines_after_the_third_are_ignored() {
        let data = read_plot_data("a\nb\n7\nnot a number\n".as_bytes()).unwrap();
        assert_eq!(data, vec![7]);
    }

    #[test]
    fn missing_lines() {
        assert!(matches!(
            read_plot_data("".as_bytes()),
            Err(InputError::MissingLine { line: 1 })
        ));
        assert!(matches!(
            read_plot_data("a\nb\n".as_bytes()),
            Err(InputError::MissingLine { line: 3 })
        ));
    }

    #[test]
    fn bad_token() {
        match read_plot_data("a\nb\n1 two 3\n".as_bytes()) {
            Err(InputError::InvalidToken { line, token }) => {
                assert_eq!(line, 3);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn empty_third_line() {
        assert!(matches!(
            read_plot_data("a\nb\n   \n".as_bytes()),
            Err(InputError::NoValues { line: 3 })
        ));
    }

    #[test]
    fn sort_input() {
        let values = read_sort_input("4 9 3\n7 1 ".as_bytes()).unwrap();
        assert_eq!(values, vec![9, 3, 7, 1]);

        let values = read_sort_input("2 5 6 8".as_bytes()).unwrap();
        assert_eq!(values, vec![5, 6]);

        let values = read_sort_input("0".as_bytes()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn malformed_sort_input() {
        assert!(matches!(
            read_sort_input("  ".as_bytes()),
            Err(InputError::MissingCount)
        ));
        assert!(matches!(
            read_sort_input("3 1 2".as_bytes()),
            Err(InputError::Truncated {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            read_sort_input("2 1 -2".as_bytes()),
            Err(InputError::InvalidValue { index: 2, .. })
        ));
        assert!(matches!(
            read_sort_input("many 1".as_bytes()),
            Err(InputError::InvalidValue { index: 0, .. })
        ));
    }
}
