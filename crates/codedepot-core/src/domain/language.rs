//! Language inference from file names
//!
//! The language tag is derived, never stored remotely. It is looked up from
//! the file-name extension through a fixed table; anything the table does not
//! know maps to [`Language::Text`].

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::newtypes::FileName;

/// Editor language tag for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    C,
    Html,
    Css,
    Json,
    Markdown,
    Text,
}

/// Extension (lowercase) to language table
const EXTENSION_TABLE: &[(&str, Language)] = &[
    ("js", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("jsx", Language::JavaScript),
    ("tsx", Language::TypeScript),
    ("py", Language::Python),
    ("java", Language::Java),
    ("cpp", Language::Cpp),
    ("c", Language::C),
    ("html", Language::Html),
    ("css", Language::Css),
    ("json", Language::Json),
    ("md", Language::Markdown),
    ("txt", Language::Text),
];

impl Language {
    /// Look up the language for an extension (case-insensitive)
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, language)| *language)
            .unwrap_or(Language::Text)
    }

    /// Infer the language of a raw file name; total over all strings
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Language::Text,
        }
    }

    /// Infer the language of a validated [`FileName`]
    #[must_use]
    pub fn for_file(name: &FileName) -> Self {
        name.extension()
            .map(Self::from_extension)
            .unwrap_or(Language::Text)
    }

    /// Tag string as used by editors (`"javascript"`, `"markdown"`, ...)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Markdown => "markdown",
            Language::Text => "text",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Text
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
