//! Parsers for the plain-text output of `rc`.

use std::{collections::HashSet, path::PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    history::Location,
    ide::IdePosition,
    indexer::{CandidateKind, CompletionCandidate, IndexedLocation},
};

/// `PATH:LINE:COLUMN:` followed by an optional context string. Line and
/// column are 1-based.
static LOCATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<path>.+?):(?P<line>\d+):(?P<column>\d+):?(?:\s+(?P<context>.*?))?\s*$")
        .expect("location regex is valid")
});

/// Parse one location per line, skipping status lines such as `Not indexed`.
/// Repeated locations are reported once, in first-seen order.
pub fn parse_locations(output: &str) -> Vec<IndexedLocation> {
    let mut seen = HashSet::new();
    let mut locations = Vec::new();

    for line in output.lines() {
        let Some(parsed) = parse_location_line(line) else {
            continue;
        };
        if seen.insert(parsed.location.clone()) {
            locations.push(parsed);
        }
    }

    locations
}

fn parse_location_line(line: &str) -> Option<IndexedLocation> {
    let captures = LOCATION_LINE.captures(line.trim_start())?;
    let line_number = captures.name("line")?.as_str().parse::<u32>().ok()?;
    let column = captures.name("column")?.as_str().parse::<u32>().ok()?;
    let position = IdePosition::from_one_based(line_number, column)?;
    let path = PathBuf::from(captures.name("path")?.as_str());
    let context = captures.name("context").map(|m| m.as_str().to_string()).filter(|c| !c.is_empty());

    Some(IndexedLocation {
        location: Location::new(path, position),
        context,
    })
}

/// Parse `--code-complete-at` output.
///
/// Each line is `NAME SIGNATURE... KIND`, e.g.
/// `method1 void method1() CXXMethod`. The result keeps the order rc chose
/// and is cut at `limit` candidates.
pub fn parse_completions(
    output: &str,
    limit: usize,
) -> Vec<CompletionCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for line in output.lines() {
        if candidates.len() >= limit {
            break;
        }
        let Some(candidate) = parse_completion_line(line) else {
            continue;
        };
        if seen.insert((candidate.name.clone(), candidate.signature.clone())) {
            candidates.push(candidate);
        }
    }

    candidates
}

fn parse_completion_line(line: &str) -> Option<CompletionCandidate> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (name, rest) = tokens.split_first()?;

    let candidate = match rest.split_last() {
        None => CompletionCandidate {
            name: (*name).to_string(),
            signature: String::new(),
            kind: CandidateKind::Other(String::new()),
        },
        Some((kind, signature)) => CompletionCandidate {
            name: (*name).to_string(),
            signature: signature.join(" "),
            kind: CandidateKind::from_cursor_kind(kind),
        },
    };
    Some(candidate)
}

#[cfg(test)]
#[path = "../../tests/src/rtags/output_tests.rs"]
mod tests;
