//! URL Resolution
//!
//! Maps a page label and language name onto the address the harness should
//! open. Both lookups are table-driven and case-insensitive.

use std::collections::HashMap;

use log::warn;

use crate::config::PlannerConfig;

/// Resolves page labels and language names into target URLs.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base_url: String,
    default_language: String,
    default_path: String,
    pages: HashMap<String, String>,
    languages: HashMap<String, String>,
}

impl UrlResolver {
    /// Builds a resolver from the configured tables.
    pub fn new(config: &PlannerConfig) -> Self {
        let lowered = |table: &std::collections::BTreeMap<String, String>| {
            table
                .iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
                .collect::<HashMap<_, _>>()
        };

        Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            default_language: config.default_language.trim().to_lowercase(),
            default_path: config.default_path.trim().to_string(),
            pages: lowered(&config.pages),
            languages: lowered(&config.languages),
        }
    }

    /// Returns the language code for a language name.
    ///
    /// Unknown names fall back to the default language.
    pub fn language_code(&self, language: &str) -> String {
        match self.languages.get(&language.trim().to_lowercase()) {
            Some(code) => code.to_lowercase(),
            None => {
                if !language.trim().is_empty() {
                    warn!(
                        "Unknown language '{}', using '{}'",
                        language, self.default_language
                    );
                }
                self.default_language.clone()
            }
        }
    }

    /// Returns the path for a page label, or the default path.
    pub fn page_path(&self, page: &str) -> &str {
        match self.pages.get(&page.trim().to_lowercase()) {
            Some(path) => path,
            None => {
                warn!("Unknown page '{}', using '{}'", page, self.default_path);
                &self.default_path
            }
        }
    }

    /// Whether a language code needs no `lang` parameter.
    pub fn is_default_language(&self, code: &str) -> bool {
        code.eq_ignore_ascii_case(&self.default_language)
    }

    /// Builds the absolute URL for a page in a language code.
    ///
    /// A `lang` query parameter is appended unless the code is the default
    /// language; `&` is used when the path already carries a query string.
    pub fn resolve(&self, page: &str, language_code: &str) -> String {
        let path = self.page_path(page);
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        if !self.is_default_language(language_code) {
            let separator = if url.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str("lang=");
            url.push_str(language_code);
        }

        url
    }
}
