//! Lookup cache
//!
//! Holds the shop's default language and language list once fetched. Values
//! are single-assignment: the first successful fetch wins and is kept for the
//! life of the cache.

use once_cell::sync::OnceCell;

use super::lookups::LookupOption;

#[derive(Debug, Default)]
pub struct LookupCache {
    default_language: OnceCell<String>,
    languages: OnceCell<Vec<LookupOption>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_language(&self) -> Option<&str> {
        self.default_language.get().map(String::as_str)
    }

    /// Store the default language unless one is already cached; returns
    /// whichever value the cache ends up holding
    pub fn set_default_language(&self, language_id: String) -> &str {
        let _ = self.default_language.set(language_id);
        self.default_language.get().map(String::as_str).unwrap_or_default()
    }

    pub fn languages(&self) -> Option<&[LookupOption]> {
        self.languages.get().map(Vec::as_slice)
    }

    pub fn set_languages(&self, languages: Vec<LookupOption>) -> &[LookupOption] {
        let _ = self.languages.set(languages);
        self.languages.get().map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let cache = LookupCache::new();
        assert_eq!(cache.default_language(), None);

        assert_eq!(cache.set_default_language("1".to_string()), "1");
        assert_eq!(cache.set_default_language("2".to_string()), "1");
        assert_eq!(cache.default_language(), Some("1"));
    }

    #[test]
    fn test_languages_kept_after_first_fetch() {
        let cache = LookupCache::new();
        cache.set_languages(vec![LookupOption::new("English", "1")]);

        let kept = cache.set_languages(vec![LookupOption::new("Deutsch", "3")]);
        assert_eq!(kept, &[LookupOption::new("English", "1")]);
    }
}
