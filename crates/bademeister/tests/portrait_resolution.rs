use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bademeister::portraits::{
    Locale, PageSummary, PortraitCache, PortraitResolver, PortraitSource, PortraitSourceError,
    Thumbnail,
};
use bademeister::store::{KeyValueStore, MemoryStore, StoreError};

#[derive(Clone)]
enum Reply {
    Image(&'static str),
    UrlOnly(&'static str),
    Disambiguation,
    NoThumbnail,
    Status(u16),
    Transport,
}

/// Portrait source answering from a script keyed by `(locale, title)`;
/// anything unscripted gets a 404.
#[derive(Default)]
struct ScriptedSource {
    replies: HashMap<(&'static str, String), Reply>,
    calls: Mutex<Vec<(&'static str, String)>>,
}

impl ScriptedSource {
    fn reply(mut self, locale: &'static str, title: &str, reply: Reply) -> Self {
        self.replies.insert((locale, title.to_string()), reply);
        self
    }

    fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().expect("calls mutex").clone()
    }
}

#[async_trait]
impl PortraitSource for ScriptedSource {
    async fn summary(
        &self,
        locale: Locale,
        title: &str,
    ) -> Result<PageSummary, PortraitSourceError> {
        self.calls
            .lock()
            .expect("calls mutex")
            .push((locale.code(), title.to_string()));

        let thumbnail = |source: Option<&str>, url: Option<&str>| PageSummary {
            page_type: Some("standard".to_string()),
            thumbnail: Some(Thumbnail {
                source: source.map(str::to_string),
                url: url.map(str::to_string),
            }),
        };

        match self.replies.get(&(locale.code(), title.to_string())) {
            Some(Reply::Image(url)) => Ok(thumbnail(Some(*url), None)),
            Some(Reply::UrlOnly(url)) => Ok(thumbnail(Some(""), Some(*url))),
            Some(Reply::Disambiguation) => Ok(PageSummary {
                page_type: Some("disambiguation".to_string()),
                thumbnail: Some(Thumbnail {
                    source: Some("https://x/ambiguous.jpg".to_string()),
                    url: None,
                }),
            }),
            Some(Reply::NoThumbnail) => Ok(PageSummary::default()),
            Some(Reply::Status(code)) => Err(PortraitSourceError::Status(*code)),
            Some(Reply::Transport) => Err(PortraitSourceError::Transport("reset".to_string())),
            None => Err(PortraitSourceError::Status(404)),
        }
    }
}

fn resolver(source: &Arc<ScriptedSource>, store: &MemoryStore) -> PortraitResolver {
    let cache = PortraitCache::new(Arc::new(store.clone()), "tb");
    PortraitResolver::new(source.clone(), cache)
}

#[tokio::test]
async fn footballer_candidate_resolves_and_is_cached() {
    let source = Arc::new(ScriptedSource::default().reply(
        "en",
        "Erling Haaland (footballer)",
        Reply::Image("https://x/img.jpg"),
    ));
    let store = MemoryStore::new();

    let url = resolver(&source, &store).resolve("Erling Haaland").await;

    assert_eq!(url.as_deref(), Some("https://x/img.jpg"));
    assert_eq!(source.calls().len(), 1);
    assert_eq!(
        store.get("tb_img_erling haaland").expect("get").as_deref(),
        Some("https://x/img.jpg")
    );
}

#[tokio::test]
async fn total_miss_caches_negative_sentinel() {
    let source = Arc::new(ScriptedSource::default());
    let store = MemoryStore::new();

    let url = resolver(&source, &store).resolve("Jonas Mustermann").await;

    assert_eq!(url, None);
    assert_eq!(
        source.calls(),
        vec![
            ("en", "Jonas Mustermann (footballer)".to_string()),
            ("en", "Jonas Mustermann".to_string()),
            ("en", "Jonas Mustermann (soccer)".to_string()),
            ("en", "Jonas Mustermann (football player)".to_string()),
            ("de", "Jonas Mustermann (Fußballspieler)".to_string()),
            ("de", "Jonas Mustermann".to_string()),
        ]
    );
    let entries = store.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["tb_img_jonas mustermann"], "null");
}

#[tokio::test]
async fn second_resolution_is_served_from_cache() {
    let source = Arc::new(ScriptedSource::default());
    let store = MemoryStore::new();
    let resolver = resolver(&source, &store);

    let first = resolver.resolve("Jonas Mustermann").await;
    let sweep = source.calls().len();
    let second = resolver.resolve("Jonas Mustermann").await;

    assert_eq!(first, second);
    assert_eq!(source.calls().len(), sweep);
}

#[tokio::test]
async fn empty_names_touch_nothing() {
    let source = Arc::new(ScriptedSource::default());
    let store = MemoryStore::new();
    let resolver = resolver(&source, &store);

    assert_eq!(resolver.resolve("").await, None);
    assert_eq!(resolver.resolve("   ").await, None);
    assert!(source.calls().is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn disambiguation_is_skipped_for_next_candidate() {
    let source = Arc::new(
        ScriptedSource::default()
            .reply("en", "Kai Havertz (footballer)", Reply::Disambiguation)
            .reply("en", "Kai Havertz", Reply::Image("https://x/kai.jpg")),
    );
    let store = MemoryStore::new();

    let url = resolver(&source, &store).resolve("Kai Havertz").await;

    assert_eq!(url.as_deref(), Some("https://x/kai.jpg"));
    assert_eq!(source.calls().len(), 2);
    assert_eq!(store.snapshot()["tb_img_kai havertz"], "https://x/kai.jpg");
}

#[tokio::test]
async fn cache_key_ignores_case() {
    let source = Arc::new(ScriptedSource::default().reply(
        "en",
        "Erling Haaland (footballer)",
        Reply::Image("https://x/img.jpg"),
    ));
    let store = MemoryStore::new();
    let resolver = resolver(&source, &store);

    let upper = resolver.resolve("Erling Haaland").await;
    let lower = resolver.resolve("erling haaland").await;

    assert_eq!(upper, lower);
    assert_eq!(source.calls().len(), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn footballer_title_beats_bare_name() {
    let source = Arc::new(
        ScriptedSource::default()
            .reply("en", "Thomas Müller (footballer)", Reply::Image("https://x/football.jpg"))
            .reply("en", "Thomas Müller", Reply::Image("https://x/bare.jpg")),
    );
    let store = MemoryStore::new();

    let url = resolver(&source, &store).resolve("Thomas Müller").await;

    assert_eq!(url.as_deref(), Some("https://x/football.jpg"));
}

#[tokio::test]
async fn errors_and_empty_pages_fall_through_to_german_edition() {
    let source = Arc::new(
        ScriptedSource::default()
            .reply("en", "Jonas Hector (footballer)", Reply::Transport)
            .reply("en", "Jonas Hector", Reply::NoThumbnail)
            .reply("en", "Jonas Hector (soccer)", Reply::Status(500))
            .reply("de", "Jonas Hector (Fußballspieler)", Reply::UrlOnly("https://x/de.jpg")),
    );
    let store = MemoryStore::new();

    let url = resolver(&source, &store).resolve("Jonas Hector").await;

    assert_eq!(url.as_deref(), Some("https://x/de.jpg"));
    let calls = source.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls.last().map(|(locale, _)| *locale), Some("de"));
}

#[tokio::test]
async fn negative_result_sticks_until_forgotten() {
    let store = MemoryStore::new();
    let empty = Arc::new(ScriptedSource::default());
    assert_eq!(resolver(&empty, &store).resolve("Florian Wirtz").await, None);

    let now_known = Arc::new(ScriptedSource::default().reply(
        "en",
        "Florian Wirtz (footballer)",
        Reply::Image("https://x/wirtz.jpg"),
    ));
    let resolver = resolver(&now_known, &store);
    assert_eq!(resolver.resolve("Florian Wirtz").await, None);
    assert!(now_known.calls().is_empty());

    resolver.forget("FLORIAN WIRTZ").expect("forget");
    assert_eq!(
        resolver.resolve("Florian Wirtz").await.as_deref(),
        Some("https://x/wirtz.jpg")
    );
}

/// Store whose every operation fails.
struct BrokenStore;

fn disk_gone() -> StoreError {
    StoreError::Io {
        path: "/gone/store.json".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
    }
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(disk_gone())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(disk_gone())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(disk_gone())
    }
}

#[tokio::test]
async fn store_failures_do_not_fail_resolution() {
    let source = Arc::new(ScriptedSource::default().reply(
        "en",
        "Erling Haaland (footballer)",
        Reply::Image("https://x/img.jpg"),
    ));
    let resolver = PortraitResolver::new(
        source.clone(),
        PortraitCache::new(Arc::new(BrokenStore), "tb"),
    );

    assert_eq!(
        resolver.resolve("Erling Haaland").await.as_deref(),
        Some("https://x/img.jpg")
    );
}
