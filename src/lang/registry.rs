//! Built-in language frontends and their metadata.

use std::sync::Arc;

use crate::lang::common::LanguageFrontend;

/// Metadata describing one of the built-in language frontends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Canonical short key (matches CLI/config usage, e.g. "java").
    pub key: &'static str,
    /// Human-friendly display name.
    pub name: &'static str,
    /// Default accepted file name suffixes (with leading dots).
    pub suffixes: &'static [&'static str],
    /// Suffix of the generated view file, for languages that report on views.
    pub view_suffix: Option<&'static str>,
}

const REGISTERED_LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        key: "java",
        name: "Java",
        suffixes: &[".java", ".JAVA"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "python3",
        name: "Python 3",
        suffixes: &[".py"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "cpp",
        name: "C/C++",
        suffixes: &[".cpp", ".CPP", ".cxx", ".CXX", ".c++", ".C++", ".c", ".C", ".cc", ".CC", ".h", ".H", ".hpp", ".HPP", ".hh", ".HH"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "rust",
        name: "Rust",
        suffixes: &[".rs"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "go",
        name: "Go",
        suffixes: &[".go"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "kotlin",
        name: "Kotlin",
        suffixes: &[".kt"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "text",
        name: "Plain text",
        suffixes: &[".txt", ".asc", ".TXT", ".ASC"],
        view_suffix: None,
    },
    LanguageInfo {
        key: "scxml",
        name: "SCXML",
        suffixes: &[".scxml", ".xml"],
        view_suffix: Some(".view"),
    },
    LanguageInfo {
        key: "emf",
        name: "EMF metamodel",
        suffixes: &[".ecore"],
        view_suffix: Some(".emfatic"),
    },
];

/// [`LanguageFrontend`] implementation for the static registry entries.
impl LanguageFrontend for LanguageInfo {
    fn display_name(&self) -> &str {
        self.name
    }

    fn uses_alternate_view_files(&self) -> bool {
        self.view_suffix.is_some()
    }

    fn view_file_suffix(&self) -> &str {
        self.view_suffix.unwrap_or("")
    }
}

/// Return the languages that are compiled into this build.
pub fn registered_languages() -> &'static [LanguageInfo] {
    REGISTERED_LANGUAGES
}

/// Canonical keys of all registered languages.
pub fn language_keys() -> Vec<&'static str> {
    REGISTERED_LANGUAGES.iter().map(|info| info.key).collect()
}

/// Look up registry metadata by key or alias.
pub fn language_info(language: &str) -> Option<&'static LanguageInfo> {
    let key = normalize_language_key(language)?;
    REGISTERED_LANGUAGES.iter().find(|info| info.key == key)
}

/// Create a shared frontend handle for a language key or alias.
pub fn frontend_for(language: &str) -> Option<Arc<dyn LanguageFrontend>> {
    language_info(language).map(|info| Arc::new(*info) as Arc<dyn LanguageFrontend>)
}

/// Normalizes a language identifier to its canonical key.
fn normalize_language_key(language: &str) -> Option<&'static str> {
    match language.to_ascii_lowercase().as_str() {
        "java" | "javac" => Some("java"),
        "python3" | "python" | "py" => Some("python3"),
        "cpp" | "c" | "c++" | "cplusplus" => Some("cpp"),
        "rust" | "rs" => Some("rust"),
        "go" | "golang" => Some("go"),
        "kotlin" | "kt" => Some("kotlin"),
        "text" | "txt" => Some("text"),
        other => REGISTERED_LANGUAGES
            .iter()
            .find(|info| info.key == other)
            .map(|info| info.key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_canonical_entries() {
        assert_eq!(language_info("Python").map(|i| i.key), Some("python3"));
        assert_eq!(language_info("c++").map(|i| i.key), Some("cpp"));
        assert_eq!(language_info("scxml").map(|i| i.key), Some("scxml"));
        assert!(language_info("cobol").is_none());
    }

    #[test]
    fn test_view_file_convention() {
        let scxml = frontend_for("scxml").unwrap();
        assert!(scxml.uses_alternate_view_files());
        assert_eq!(scxml.view_file_suffix(), ".view");

        let java = frontend_for("java").unwrap();
        assert!(!java.uses_alternate_view_files());
        assert_eq!(java.view_file_suffix(), "");
        assert_eq!(java.display_name(), "Java");
    }

    #[test]
    fn test_keys_are_unique() {
        let keys = language_keys();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }
}
