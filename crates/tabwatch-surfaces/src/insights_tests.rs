use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use tabwatch_protocols::{AnalysisStatus, CollaboratorError, StockResearcher, SurfaceMessage};
use tabwatch_research::ResearchCache;
use tabwatch_storage::{MemoryStateStore, StateStore};

use super::InsightsSurface;

struct FakeResearcher {
    answer: Result<String, String>,
    calls: AtomicUsize,
}

impl FakeResearcher {
    fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockResearcher for FakeResearcher {
    async fn research_url(&self, _url: &str) -> Result<String, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(answer) => Ok(answer.clone()),
            Err(message) => Err(CollaboratorError::Network(message.clone())),
        }
    }
}

async fn surface_with(
    researcher: Arc<FakeResearcher>,
    store: Arc<dyn StateStore>,
) -> InsightsSurface {
    let cache = ResearchCache::load(store).await;
    InsightsSurface::new(researcher, cache)
}

async fn analyze(surface: &mut InsightsSurface, url: &str) {
    surface
        .handle_message(SurfaceMessage::AnalyzeUrl {
            url: url.to_string(),
        })
        .await;
}

#[tokio::test]
async fn research_success_renders_and_caches() {
    let researcher = FakeResearcher::answering("Stock Ticker Symbol: NVDA\nExchange: NASDAQ");
    let store = Arc::new(MemoryStateStore::new());
    let mut surface = surface_with(Arc::clone(&researcher), store).await;

    analyze(&mut surface, "https://www.nvidia.com/").await;

    assert_eq!(surface.view().status, AnalysisStatus::Complete);
    assert_eq!(surface.view().message, "Analysis complete");
    assert_eq!(surface.view().current_url, "https://www.nvidia.com/");
    assert!(surface.view().results.as_deref().unwrap().contains("NVDA"));
    assert!(surface.cache().contains("https://www.nvidia.com/"));
    assert_eq!(researcher.calls(), 1);
}

#[tokio::test]
async fn same_url_is_never_rerun() {
    let researcher = FakeResearcher::answering("Stock Ticker Symbol: NVDA");
    let store = Arc::new(MemoryStateStore::new());
    let mut surface = surface_with(Arc::clone(&researcher), store).await;

    analyze(&mut surface, "https://www.nvidia.com/").await;
    analyze(&mut surface, "https://www.nvidia.com/").await;
    analyze(&mut surface, "https://www.nvidia.com/").await;

    assert_eq!(researcher.calls(), 1);
}

#[tokio::test]
async fn returning_to_a_url_hits_the_cache() {
    let researcher = FakeResearcher::answering("Stock Ticker Symbol: NVDA");
    let store = Arc::new(MemoryStateStore::new());
    let mut surface = surface_with(Arc::clone(&researcher), store).await;

    analyze(&mut surface, "https://a.example/").await;
    analyze(&mut surface, "https://b.example/").await;
    analyze(&mut surface, "https://a.example/").await;

    // Two distinct URLs researched; the return visit was served cached.
    assert_eq!(researcher.calls(), 2);
    assert_eq!(surface.view().message, "Analysis complete (from cache)");
}

#[tokio::test]
async fn cache_persists_across_surface_restarts() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());

    let researcher = FakeResearcher::answering("Stock Ticker Symbol: NVDA");
    let mut surface = surface_with(Arc::clone(&researcher), Arc::clone(&store)).await;
    analyze(&mut surface, "https://www.nvidia.com/").await;
    assert_eq!(researcher.calls(), 1);
    let first_render = surface.view().results.clone().unwrap();

    // New surface, same persisted store: no remote call, same rendering.
    let researcher = FakeResearcher::answering("unused");
    let mut surface = surface_with(Arc::clone(&researcher), store).await;
    analyze(&mut surface, "https://www.nvidia.com/").await;

    assert_eq!(researcher.calls(), 0);
    assert_eq!(surface.view().message, "Analysis complete (from cache)");
    assert_eq!(surface.view().results.as_deref(), Some(first_render.as_str()));
}

#[tokio::test]
async fn failure_falls_back_to_mock_and_caches_it() {
    let researcher = FakeResearcher::failing("connection refused");
    let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
    let mut surface = surface_with(Arc::clone(&researcher), Arc::clone(&store)).await;

    analyze(&mut surface, "https://www.nvidia.com/news").await;

    assert_eq!(surface.view().status, AnalysisStatus::Complete);
    assert_eq!(surface.view().message, "Analysis complete (mock data)");
    assert!(surface.view().results.as_deref().unwrap().contains("NVDA"));

    // The mock answer shadows the server even once it comes back.
    let researcher = FakeResearcher::answering("Fresh server answer");
    let mut surface = surface_with(Arc::clone(&researcher), store).await;
    analyze(&mut surface, "https://www.nvidia.com/news").await;
    assert_eq!(researcher.calls(), 0);
    assert_eq!(surface.view().message, "Analysis complete (from cache)");
}

#[tokio::test]
async fn invalid_urls_are_rejected_without_research() {
    let researcher = FakeResearcher::answering("unused");
    let store = Arc::new(MemoryStateStore::new());
    let mut surface = surface_with(Arc::clone(&researcher), store).await;

    for url in ["", "unknown", "Waiting for URL..."] {
        analyze(&mut surface, url).await;
        assert_eq!(surface.view().status, AnalysisStatus::Error);
        assert_eq!(surface.view().message, "No valid URL to analyze");
    }
    assert_eq!(researcher.calls(), 0);

    // A valid URL afterwards still works.
    analyze(&mut surface, "https://example.com/").await;
    assert_eq!(surface.view().status, AnalysisStatus::Complete);
    assert_eq!(researcher.calls(), 1);
}

#[tokio::test]
async fn content_updates_drive_research_too() {
    let researcher = FakeResearcher::answering("Stock Ticker Symbol: MSFT");
    let store = Arc::new(MemoryStateStore::new());
    let mut surface = surface_with(Arc::clone(&researcher), store).await;

    let data = tabwatch_protocols::LatestContent {
        url: "https://www.microsoft.com/".to_string(),
        ..Default::default()
    };
    surface
        .handle_message(SurfaceMessage::UpdateContent { data })
        .await;

    assert_eq!(surface.view().current_url, "https://www.microsoft.com/");
    assert_eq!(researcher.calls(), 1);
    assert!(surface.view().results.as_deref().unwrap().contains("MSFT"));
}
