use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, GotoDefinitionResponse, Location as LspLocation, Position, Range, Url,
};

use crate::{
    history::Location,
    ide::navigation::{IdePosition, NavigationTarget},
    indexer::{CandidateKind, CompletionCandidate},
};

pub fn lsp_position_to_ide(position: Position) -> IdePosition {
    IdePosition::new(position.line, position.character)
}

pub fn ide_position_to_lsp(position: IdePosition) -> Position {
    Position::new(position.line, position.character)
}

/// Snapshot the cursor of an LSP request. Non-`file://` URIs have no path
/// rtags could know about, so they yield `None`.
pub fn location_from_lsp(
    uri: &Url,
    position: Position,
) -> Option<Location> {
    let path = uri.to_file_path().ok()?;
    Some(Location::new(path, lsp_position_to_ide(position)))
}

pub fn location_to_lsp(location: &Location) -> Option<LspLocation> {
    let uri = Url::from_file_path(location.file_path()).ok()?;
    let position = ide_position_to_lsp(location.position());
    Some(LspLocation {
        uri,
        range: Range::new(position, position),
    })
}

pub fn navigation_target_to_lsp(target: NavigationTarget) -> Option<GotoDefinitionResponse> {
    match target {
        NavigationTarget::Single(location) => location_to_lsp(&location).map(GotoDefinitionResponse::Scalar),
        NavigationTarget::Multiple(locations) => {
            let lsp_locations: Vec<LspLocation> = locations.iter().filter_map(location_to_lsp).collect();
            if lsp_locations.is_empty() {
                None
            } else if lsp_locations.len() == 1 {
                lsp_locations.into_iter().next().map(GotoDefinitionResponse::Scalar)
            } else {
                Some(GotoDefinitionResponse::Array(lsp_locations))
            }
        },
    }
}

pub fn candidate_kind_to_lsp(kind: &CandidateKind) -> CompletionItemKind {
    match kind {
        CandidateKind::Method | CandidateKind::Destructor => CompletionItemKind::METHOD,
        CandidateKind::Constructor => CompletionItemKind::CONSTRUCTOR,
        CandidateKind::Function => CompletionItemKind::FUNCTION,
        CandidateKind::Field => CompletionItemKind::FIELD,
        CandidateKind::Variable | CandidateKind::Parameter => CompletionItemKind::VARIABLE,
        CandidateKind::Class | CandidateKind::Typedef => CompletionItemKind::CLASS,
        CandidateKind::Struct | CandidateKind::Union => CompletionItemKind::STRUCT,
        CandidateKind::Enum => CompletionItemKind::ENUM,
        CandidateKind::EnumConstant => CompletionItemKind::ENUM_MEMBER,
        CandidateKind::Namespace => CompletionItemKind::MODULE,
        CandidateKind::Macro => CompletionItemKind::CONSTANT,
        CandidateKind::Keyword => CompletionItemKind::KEYWORD,
        CandidateKind::Other(_) => CompletionItemKind::TEXT,
    }
}

/// `rank` is the candidate's position in the indexer's answer; it becomes
/// the sort key so editors keep rtags' ordering.
pub fn candidate_to_completion_item(
    rank: usize,
    candidate: CompletionCandidate,
) -> CompletionItem {
    let detail = (!candidate.signature.is_empty()).then_some(candidate.signature);
    CompletionItem {
        label: candidate.name.clone(),
        kind: Some(candidate_kind_to_lsp(&candidate.kind)),
        detail,
        sort_text: Some(format!("{rank:05}")),
        insert_text: Some(candidate.name),
        ..Default::default()
    }
}

#[cfg(test)]
#[path = "../../tests/src/ide/lsp_tests.rs"]
mod tests;
