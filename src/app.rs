//! Wiring: host, store, collaborators, coordinator, and surface tasks.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tabwatch_coordinator::{
    Coordinator, CoordinatorError, CoordinatorHandle, SurfaceKind, SurfaceSpawner,
};
use tabwatch_host::{BrowserHost, PageDocument, SimulatedHost};
use tabwatch_protocols::{ScreenshotAnalyzer, StockResearcher, SurfaceMessage, TabId};
use tabwatch_research::{RemoteCollaborators, ResearchCache};
use tabwatch_storage::{FileStateStore, MemoryStateStore, StateStore};
use tabwatch_surfaces::{AnalysisSurface, InsightsSurface, MonitorSurface};

use crate::config::AppConfig;

/// Spawns the real surface tasks for the listening window's tabs.
///
/// The coordinator handle is wired in after the coordinator is built but
/// before it runs, so every spawn sees it.
struct SurfaceLauncher {
    handle: OnceLock<CoordinatorHandle>,
    researcher: Arc<dyn StockResearcher>,
    store: Arc<dyn StateStore>,
    buffer: usize,
}

#[async_trait]
impl SurfaceSpawner for SurfaceLauncher {
    async fn spawn_surface(&self, kind: SurfaceKind, tab: TabId) -> mpsc::Sender<SurfaceMessage> {
        let (tx, rx) = mpsc::channel(self.buffer.max(1));
        let Some(handle) = self.handle.get().cloned() else {
            warn!("Surface spawn for {} before wiring completed", tab);
            return tx;
        };

        match kind {
            SurfaceKind::Monitor => {
                tokio::spawn(MonitorSurface::new().run(handle, rx));
            }
            SurfaceKind::Analysis => {
                tokio::spawn(AnalysisSurface::new().run(rx));
            }
            SurfaceKind::Insights => {
                let researcher = Arc::clone(&self.researcher);
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    let cache = ResearchCache::load(store).await;
                    InsightsSurface::new(researcher, cache).run(handle, rx).await;
                });
            }
        }
        debug!("Spawned {:?} surface for {}", kind, tab);
        tx
    }
}

/// A running tabwatch instance.
pub struct App {
    host: Arc<SimulatedHost>,
    handle: CoordinatorHandle,
    coordinator: JoinHandle<Result<(), CoordinatorError>>,
}

impl App {
    /// Build all components and start the coordinator task.
    pub async fn start(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn StateStore> = match &config.state_file {
            Some(path) => {
                info!("Persisting state to {}", path.display());
                Arc::new(FileStateStore::open(path).await?)
            }
            None => Arc::new(MemoryStateStore::new()),
        };

        let collaborators = Arc::new(RemoteCollaborators::new(&config.research)?);
        let host = Arc::new(SimulatedHost::new());

        let launcher = Arc::new(SurfaceLauncher {
            handle: OnceLock::new(),
            researcher: Arc::clone(&collaborators) as Arc<dyn StockResearcher>,
            store: Arc::clone(&store),
            buffer: config.coordinator.surface_buffer,
        });

        let (coordinator, handle) = Coordinator::new(
            Arc::clone(&host) as Arc<dyn BrowserHost>,
            store,
            Arc::clone(&collaborators) as Arc<dyn ScreenshotAnalyzer>,
            Arc::clone(&launcher) as Arc<dyn SurfaceSpawner>,
            config.coordinator.clone(),
        );
        let _ = launcher.handle.set(handle.clone());

        let coordinator = tokio::spawn(coordinator.run());

        Ok(Self {
            host,
            handle,
            coordinator,
        })
    }

    pub fn handle(&self) -> &CoordinatorHandle {
        &self.handle
    }

    /// Script a short browsing session against the simulated host and
    /// report what the coordinator observed.
    pub async fn run_demo(&self) -> anyhow::Result<()> {
        use std::time::Duration;
        use tokio::time::sleep;

        self.host
            .install_page(
                "https://www.nvidia.com/",
                PageDocument::new(
                    "NVIDIA Corporation",
                    "NVIDIA designs GPUs for gaming, professional visualization, \
                     datacenter, and automotive markets.",
                )
                .with_main_heading("World leader in AI computing"),
            )
            .await;
        self.host
            .install_page(
                "https://www.apple.com/",
                PageDocument::new("Apple", "Discover the innovative world of Apple.")
                    .with_meta_description("Apple official site"),
            )
            .await;

        let window = self.host.create_window().await?;
        let tab = self.host.create_tab(window, "https://www.nvidia.com/").await?;
        sleep(Duration::from_millis(200)).await;

        if self.handle.force_refresh().await? {
            info!("Refreshed content for the active tab");
        }
        let latest = self.handle.latest_content().await?;
        info!(url = %latest.url, title = %latest.title, "Observed page");

        self.host.navigate(tab, "https://www.apple.com/").await?;
        sleep(Duration::from_millis(200)).await;

        self.handle.generate_insights().await?;
        sleep(Duration::from_millis(200)).await;

        let latest = self.handle.latest_content().await?;
        info!(url = %latest.url, title = %latest.title, "Demo finished");
        Ok(())
    }

    /// Stop the coordinator and wait for it to finish.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.handle.shutdown().await?;
        self.coordinator.await??;
        Ok(())
    }
}
