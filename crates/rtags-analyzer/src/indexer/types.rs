use crate::history::Location;

/// Cursor position an indexer call is about, plus the editor's text for
/// that document when it has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolQuery {
    pub location: Location,
    pub unsaved_text: Option<String>,
}

impl SymbolQuery {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            unsaved_text: None,
        }
    }

    pub fn with_unsaved_text(
        mut self,
        text: Option<String>,
    ) -> Self {
        self.unsaved_text = text;
        self
    }
}

/// A location reported by the indexer, with the source line it printed
/// next to it when available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLocation {
    pub location: Location,
    pub context: Option<String>,
}

impl IndexedLocation {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            context: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub name: String,
    pub signature: String,
    pub kind: CandidateKind,
}

/// Symbol kind of a completion candidate, named after libclang cursor kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Method,
    Constructor,
    Destructor,
    Function,
    Field,
    Variable,
    Parameter,
    Class,
    Struct,
    Union,
    Enum,
    EnumConstant,
    Namespace,
    Typedef,
    Macro,
    Keyword,
    Other(String),
}

impl CandidateKind {
    pub fn from_cursor_kind(kind: &str) -> Self {
        match kind {
            "CXXMethod" | "ObjCInstanceMethodDecl" | "ObjCClassMethodDecl" => Self::Method,
            "CXXConstructor" => Self::Constructor,
            "CXXDestructor" => Self::Destructor,
            "FunctionDecl" | "FunctionTemplate" | "CXXConversion" => Self::Function,
            "FieldDecl" | "ObjCIvarDecl" | "ObjCPropertyDecl" => Self::Field,
            "VarDecl" => Self::Variable,
            "ParmDecl" => Self::Parameter,
            "ClassDecl" | "ClassTemplate" | "ClassTemplatePartialSpecialization" => Self::Class,
            "StructDecl" => Self::Struct,
            "UnionDecl" => Self::Union,
            "EnumDecl" => Self::Enum,
            "EnumConstantDecl" => Self::EnumConstant,
            "Namespace" | "NamespaceAlias" => Self::Namespace,
            "TypedefDecl" | "TypeAliasDecl" | "TypeAliasTemplateDecl" => Self::Typedef,
            "MacroDefinition" => Self::Macro,
            "NotImplemented" => Self::Keyword,
            other => Self::Other(other.to_string()),
        }
    }
}
