use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const BUILTIN_CATALOG_TOML: &str = include_str!("../assets/suggestions.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Optimization,
    Bug,
    Improvement,
    Documentation,
}

impl SuggestionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Optimization => "optimization",
            Self::Bug => "bug",
            Self::Improvement => "improvement",
            Self::Documentation => "documentation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Which canned set a file gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileProfile {
    JavaScript,
    TypeScript,
    Stylesheet,
    Index,
    General,
}

impl FileProfile {
    pub const ALL: [FileProfile; 5] = [
        Self::JavaScript,
        Self::TypeScript,
        Self::Stylesheet,
        Self::Index,
        Self::General,
    ];

    /// Script extensions win over style extensions, which win over an `index` name.
    pub fn for_file(path: &str) -> Self {
        let base = path.rsplit('/').next().unwrap_or(path).to_ascii_lowercase();
        let extension = base.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match extension {
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "css" | "scss" | "sass" | "less" => Self::Stylesheet,
            _ if base.contains("index") => Self::Index,
            _ => Self::General,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    javascript: Vec<Suggestion>,
    typescript: Vec<Suggestion>,
    stylesheet: Vec<Suggestion>,
    index: Vec<Suggestion>,
    general: Vec<Suggestion>,
}

#[derive(Debug, Clone)]
pub struct SuggestionCatalog {
    sets: HashMap<FileProfile, Vec<Suggestion>>,
}

impl SuggestionCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG_TOML)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        let sets = HashMap::from([
            (FileProfile::JavaScript, file.javascript),
            (FileProfile::TypeScript, file.typescript),
            (FileProfile::Stylesheet, file.stylesheet),
            (FileProfile::Index, file.index),
            (FileProfile::General, file.general),
        ]);
        for profile in FileProfile::ALL {
            if sets.get(&profile).is_none_or(Vec::is_empty) {
                return Err(CatalogError::EmptySet(profile));
            }
        }
        Ok(Self { sets })
    }

    pub fn for_profile(&self, profile: FileProfile) -> &[Suggestion] {
        self.sets.get(&profile).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn for_file(&self, path: &str) -> Vec<Suggestion> {
        self.for_profile(FileProfile::for_file(path)).to_vec()
    }
}

const ANSWER_ID_PREFIX: &str = "answer-";

impl Suggestion {
    /// Replies produced by `answer_for`, as opposed to catalog entries.
    pub fn is_answer(&self) -> bool {
        self.id.starts_with(ANSWER_ID_PREFIX)
    }
}

/// Templated reply to a free-text question. `sequence` keeps ids unique.
pub fn answer_for(query: &str, sequence: u64) -> Suggestion {
    let query = query.trim();
    Suggestion {
        id: format!("{ANSWER_ID_PREFIX}{sequence}"),
        kind: SuggestionKind::Improvement,
        text: format!("Re: {query}"),
        details: Some(format!(
            "Here is one way to approach \"{query}\": start from the smallest change that \
             makes the behavior observable, then extract it into a helper once it works."
        )),
        code: Some(format!(
            "// {query}\nfunction nextStep() {{\n  // sketch the change here\n}}"
        )),
    }
}
