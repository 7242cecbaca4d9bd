//! Session-scoped cache of the supported language lists.
//!
//! The catalog is fetched at most once per login session: a successful
//! result is written under the `languages` key of the session store and read
//! back on later panel activations. A failure of either half is returned
//! without caching anything, so the next call fetches both halves again.

use crate::api::LanguageSource;
use crate::error::CatalogError;
use crate::model::{AUTO, Language, LanguageCatalog, LanguageKind};
use crate::storage::KeyValueStore;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const CATALOG_KEY: &str = "languages";
const AUTO_DISPLAY_NAME: &str = "Detect language";

#[derive(Clone, Debug)]
pub struct CatalogCache<S> {
    store: S,
}

impl<S: KeyValueStore> CatalogCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn cached(&self) -> Option<LanguageCatalog> {
        match self.store.get::<LanguageCatalog>(CATALOG_KEY) {
            Ok(found) => found,
            Err(err) => {
                warn!("Ignoring unreadable cached catalog: {err}");
                None
            }
        }
    }

    pub async fn get_catalog<L: LanguageSource>(
        &self,
        source: &L,
    ) -> Result<LanguageCatalog, CatalogError> {
        if let Some(catalog) = self.cached() {
            debug!(
                source = catalog.source.len(),
                target = catalog.target.len(),
                "Using session-cached language catalog"
            );
            return Ok(catalog);
        }

        let (source_langs, target_langs) = tokio::join!(
            source.languages(LanguageKind::Source),
            source.languages(LanguageKind::Target)
        );
        let source_langs = source_langs.map_err(|err| CatalogError::Fetch {
            kind: LanguageKind::Source,
            source: err,
        })?;
        let target_langs = target_langs.map_err(|err| CatalogError::Fetch {
            kind: LanguageKind::Target,
            source: err,
        })?;

        let catalog = build_catalog(source_langs, target_langs);
        if let Err(err) = self.store.put(CATALOG_KEY, &catalog) {
            warn!("Failed to cache language catalog for this session: {err}");
        }
        info!(
            source = catalog.source.len(),
            target = catalog.target.len(),
            "Fetched language catalog"
        );
        Ok(catalog)
    }
}

/// Ensure `auto` exists only on the source side and put both lists in display order.
pub fn build_catalog(mut source: Vec<Language>, mut target: Vec<Language>) -> LanguageCatalog {
    if !source.iter().any(Language::is_auto) {
        source.push(Language::new(AUTO, AUTO_DISPLAY_NAME));
    }
    target.retain(|lang| !lang.is_auto());
    sort_languages(&mut source);
    sort_languages(&mut target);
    LanguageCatalog { source, target }
}

/// Sort by display name ignoring case and diacritics, with `auto` pinned first.
pub fn sort_languages(languages: &mut [Language]) {
    languages.sort_by_cached_key(|lang| (!lang.is_auto(), collation_key(&lang.display_name)));
}

fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use crate::storage::FileStore;
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    #[derive(Clone, Default)]
    struct FakeSource {
        fail_target: bool,
        calls: Arc<AtomicUsize>,
    }

    impl LanguageSource for FakeSource {
        fn languages(
            &self,
            kind: LanguageKind,
        ) -> impl Future<Output = Result<Vec<Language>, TranslateError>> + Send {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            let fail = self.fail_target && kind == LanguageKind::Target;
            async move {
                if fail {
                    return Err(TranslateError::Status(503));
                }
                Ok(match kind {
                    LanguageKind::Source => vec![
                        Language::new("es", "Spanish"),
                        Language::new("auto", "Detect"),
                        Language::new("de", "German"),
                    ],
                    LanguageKind::Target => vec![
                        Language::new("es", "Spanish"),
                        Language::new("de", "German"),
                    ],
                })
            }
        }
    }

    fn codes(languages: &[Language]) -> Vec<&str> {
        languages.iter().map(|l| l.code.as_str()).collect()
    }

    #[test]
    fn sorting_pins_auto_and_ignores_case_and_accents() {
        let mut langs = vec![
            Language::new("zu", "zulu"),
            Language::new("ee", "Éwé"),
            Language::new("auto", "Detect"),
            Language::new("en", "english"),
            Language::new("da", "Danish"),
        ];
        sort_languages(&mut langs);
        assert_eq!(codes(&langs), vec!["auto", "da", "en", "ee", "zu"]);
    }

    #[test]
    fn catalog_adds_auto_to_source_only() {
        let catalog = build_catalog(
            vec![Language::new("en", "English")],
            vec![Language::new("auto", "Detect"), Language::new("en", "English")],
        );
        assert_eq!(codes(&catalog.source), vec!["auto", "en"]);
        assert_eq!(codes(&catalog.target), vec!["en"]);
    }

    #[tokio::test]
    async fn partial_failure_is_not_cached_and_retry_refetches_both() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::new(FileStore::json(dir.path()));
        let failing = FakeSource {
            fail_target: true,
            ..FakeSource::default()
        };

        let err = cache.get_catalog(&failing).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Fetch {
                kind: LanguageKind::Target,
                ..
            }
        ));
        assert_eq!(cache.cached(), None);

        let healthy = FakeSource::default();
        let catalog = cache.get_catalog(&healthy).await.unwrap();
        assert_eq!(healthy.calls.load(AtomicOrdering::SeqCst), 2);
        assert_eq!(codes(&catalog.source), vec!["auto", "de", "es"]);
        assert_eq!(cache.cached(), Some(catalog));
    }

    #[tokio::test]
    async fn cached_catalog_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogCache::new(FileStore::json(dir.path()));
        let source = FakeSource::default();
        let first = cache.get_catalog(&source).await.unwrap();

        // A reopened panel builds a fresh cache over the same session store.
        let reopened = CatalogCache::new(FileStore::json(dir.path()));
        let second = reopened.get_catalog(&source).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls.load(AtomicOrdering::SeqCst), 2);
    }
}
