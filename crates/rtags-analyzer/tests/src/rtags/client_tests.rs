use std::path::PathBuf;

use super::*;
use crate::{history::Location, ide::IdePosition};

fn query() -> SymbolQuery {
    SymbolQuery::new(Location::new("/src/foo.cxx", IdePosition::new(19, 20)))
}

#[test]
fn query_args_use_one_based_location() {
    let args = query_args(&[], &["--absolute-path", "--follow-location"], &query());
    assert_eq!(args, vec!["--absolute-path", "--follow-location", "/src/foo.cxx:20:21"]);
}

#[test]
fn query_args_put_extra_args_first_and_mark_unsaved_text() {
    let extra = vec!["--socket-file".to_string(), "/tmp/rdm.socket".to_string()];
    let query = query().with_unsaved_text(Some("int x;\n".to_string()));
    let args = query_args(&extra, &["--references"], &query);
    assert_eq!(
        args,
        vec!["--socket-file", "/tmp/rdm.socket", "--references", "/src/foo.cxx:20:21", "--unsaved-file=/src/foo.cxx:7",]
    );
}

#[test]
fn unsaved_file_length_counts_bytes() {
    let query = query().with_unsaved_text(Some("é".to_string()));
    let args = query_args(&[], &["--code-complete-at"], &query);
    assert_eq!(args.last().map(String::as_str), Some("--unsaved-file=/src/foo.cxx:2"));
}

#[test]
fn reindex_args_with_and_without_file() {
    assert_eq!(reindex_args(&[], None), vec!["--reindex"]);
    let file = PathBuf::from("/src/foo.cxx");
    assert_eq!(reindex_args(&[], Some(&file)), vec!["--reindex", "/src/foo.cxx"]);
}

#[tokio::test]
async fn missing_executable_is_reported() {
    let indexer = RcIndexer::new(RtagsSettings {
        command: "/nonexistent/rtags/bin/rc".to_string(),
        ..RtagsSettings::default()
    });
    let error = indexer.resolve_symbol(&query()).await.unwrap_err();
    assert_eq!(error, IndexerError::CommandNotFound("/nonexistent/rtags/bin/rc".to_string()));
}
