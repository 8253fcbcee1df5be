//! Client loader: mounts on a rendered page shell, loads the calculator
//! module and swaps the placeholder for the calculator surface.
//!
//! States: `loading -> ready | not-found`. Only a fresh request goes back to
//! `loading`. Every request bumps a generation counter; a load that settles
//! after a newer request was made is discarded. The placeholder is removed
//! on the first terminal state and never again.

use crate::i18n::Locale;
use crate::locator::{locate, locate_within, CalculatorModule, LocatorError, ModuleSource};
use crate::metrics::ResolutionMetrics;
use crate::render::surface;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// The page element reserving space for the calculator.
pub trait PlaceholderSlot: Send + Sync {
    /// Remove the placeholder identified by `anchor`.
    fn remove_placeholder(&self, anchor: &str);
}

/// Loader state.
#[derive(Debug, Clone)]
pub enum LoaderState {
    Loading,
    Ready(CalculatorModule),
    NotFound,
}

impl LoaderState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoaderState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LoaderState::Loading => "loading",
            LoaderState::Ready(_) => "ready",
            LoaderState::NotFound => "not-found",
        }
    }
}

#[derive(Debug)]
struct LoaderInner {
    generation: u64,
    request: Option<(String, Locale)>,
    state: LoaderState,
    placeholder_removed: bool,
}

/// Loads one calculator into one page.
pub struct ClientLoader {
    source: Arc<dyn ModuleSource>,
    slot: Arc<dyn PlaceholderSlot>,
    anchor: String,
    timeout: Option<Duration>,
    inner: Mutex<LoaderInner>,
}

impl ClientLoader {
    pub fn new(
        source: Arc<dyn ModuleSource>,
        slot: Arc<dyn PlaceholderSlot>,
        anchor: impl Into<String>,
    ) -> Self {
        Self {
            source,
            slot,
            anchor: anchor.into(),
            timeout: None,
            inner: Mutex::new(LoaderInner {
                generation: 0,
                request: None,
                state: LoaderState::Loading,
                placeholder_removed: false,
            }),
        }
    }

    /// Treat loads that do not settle within `timeout` as failed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Request calculator `id` for `locale` and wait for the load to settle.
    ///
    /// Returns the state after settling. If another request was made while
    /// this one was in flight, that request's state is what is returned.
    pub async fn load(&self, id: &str, locale: Locale) -> LoaderState {
        let generation = self.begin(id, locale);
        let outcome = self.fetch(id).await;
        self.settle(generation, id, outcome);
        self.state()
    }

    pub fn state(&self) -> LoaderState {
        self.lock().state.clone()
    }

    /// The calculator id and locale of the most recent request.
    pub fn request(&self) -> Option<(String, Locale)> {
        self.lock().request.clone()
    }

    /// Body to show in place of the placeholder; nothing while loading.
    pub fn render(&self) -> Option<String> {
        let (state, locale) = {
            let inner = self.lock();
            let locale = inner
                .request
                .as_ref()
                .map(|(_, locale)| *locale)
                .unwrap_or_default();
            (inner.state.clone(), locale)
        };

        match state {
            LoaderState::Loading => None,
            LoaderState::Ready(module) => Some(surface::render_calculator(&module, locale)),
            LoaderState::NotFound => Some(surface::render_not_available(locale)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, id: &str, locale: Locale) -> u64 {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.request = Some((id.to_string(), locale));
        inner.state = LoaderState::Loading;
        debug!(
            "Loading calculator '{}' ({}), generation {}",
            id, locale, inner.generation
        );
        inner.generation
    }

    async fn fetch(&self, id: &str) -> Result<CalculatorModule, LocatorError> {
        match self.timeout {
            Some(limit) => locate_within(self.source.as_ref(), id, limit).await,
            None => locate(self.source.as_ref(), id).await,
        }
    }

    /// Apply a load outcome unless a newer request superseded it.
    fn settle(
        &self,
        generation: u64,
        id: &str,
        outcome: Result<CalculatorModule, LocatorError>,
    ) -> bool {
        let metrics = ResolutionMetrics::global();
        let remove_placeholder = {
            let mut inner = self.lock();
            if inner.generation != generation {
                debug!(
                    "Discarding stale load of '{}' (generation {}, current {})",
                    id, generation, inner.generation
                );
                metrics.record_stale_load();
                return false;
            }

            inner.state = match outcome {
                Ok(module) => {
                    metrics.record_module_ready();
                    LoaderState::Ready(module)
                }
                Err(e) => {
                    warn!("Calculator '{}' is unavailable: {}", id, e);
                    metrics.record_module_unavailable();
                    LoaderState::NotFound
                }
            };
            !std::mem::replace(&mut inner.placeholder_removed, true)
        };

        if remove_placeholder {
            self.slot.remove_placeholder(&self.anchor);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ModuleExports;
    use crate::locator::{LoadError, StaticModuleSource};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const ANCHOR: &str = "calculator-placeholder-bmi";

    #[derive(Default)]
    struct CountingSlot {
        removals: AtomicUsize,
        anchors: Mutex<Vec<String>>,
    }

    impl CountingSlot {
        fn removals(&self) -> usize {
            self.removals.load(Ordering::SeqCst)
        }
    }

    impl PlaceholderSlot for CountingSlot {
        fn remove_placeholder(&self, anchor: &str) {
            self.removals.fetch_add(1, Ordering::SeqCst);
            self.anchors.lock().unwrap().push(anchor.to_string());
        }
    }

    /// Static modules, but loads of gated ids wait for a notification.
    #[derive(Default)]
    struct GatedSource {
        gates: HashMap<String, Arc<Notify>>,
    }

    impl GatedSource {
        fn gate(mut self, id: &str, notify: Arc<Notify>) -> Self {
            self.gates.insert(id.to_string(), notify);
            self
        }
    }

    #[async_trait]
    impl ModuleSource for GatedSource {
        async fn load(&self, id: &str) -> Result<ModuleExports, LoadError> {
            if let Some(gate) = self.gates.get(id) {
                gate.notified().await;
            }
            StaticModuleSource.load(id).await
        }
    }

    /// A source whose loads never settle.
    struct HangingSource;

    #[async_trait]
    impl ModuleSource for HangingSource {
        async fn load(&self, _id: &str) -> Result<ModuleExports, LoadError> {
            std::future::pending().await
        }
    }

    fn loader(source: impl ModuleSource + 'static) -> (ClientLoader, Arc<CountingSlot>) {
        let slot = Arc::new(CountingSlot::default());
        let loader = ClientLoader::new(Arc::new(source), slot.clone(), ANCHOR);
        (loader, slot)
    }

    fn ready_id(state: &LoaderState) -> Option<String> {
        match state {
            LoaderState::Ready(module) => Some(module.config().id.clone()),
            _ => None,
        }
    }

    // ==================== State Transition Tests ====================

    #[test]
    fn test_initial_state_is_loading_and_renders_nothing() {
        let (loader, slot) = loader(StaticModuleSource);
        assert!(matches!(loader.state(), LoaderState::Loading));
        assert!(loader.render().is_none());
        assert!(loader.request().is_none());
        assert_eq!(slot.removals(), 0);
    }

    #[tokio::test]
    async fn test_load_reaches_ready() {
        let (loader, slot) = loader(StaticModuleSource);
        let state = loader.load("bmi", Locale::SPANISH).await;

        assert_eq!(ready_id(&state).as_deref(), Some("bmi"));
        assert_eq!(state.name(), "ready");
        assert_eq!(slot.removals(), 1);
        assert_eq!(slot.anchors.lock().unwrap().as_slice(), [ANCHOR]);

        let body = loader.render().unwrap();
        assert!(body.contains(r#"data-calculator="bmi""#));
        assert!(body.contains(r#"action="/api/es/calculators/bmi/compute""#));
    }

    #[tokio::test]
    async fn test_failed_import_is_not_found_and_removes_placeholder_once() {
        let (loader, slot) = loader(StaticModuleSource);

        let state = loader.load("mortgage", Locale::ENGLISH).await;
        assert!(matches!(state, LoaderState::NotFound));
        assert!(state.is_terminal());
        assert_eq!(slot.removals(), 1);

        // Re-entering a terminal state never removes the placeholder again
        loader.load("mortgage", Locale::ENGLISH).await;
        loader.load("bmi", Locale::ENGLISH).await;
        assert_eq!(slot.removals(), 1);
    }

    #[tokio::test]
    async fn test_not_found_renders_not_available_block() {
        let (loader, _slot) = loader(StaticModuleSource);
        loader.load("mortgage", Locale::FRENCH).await;

        let body = loader.render().unwrap();
        assert!(body.contains(r#"<a href="/fr">"#));
        assert!(body.contains("Bientôt disponible"));
    }

    #[tokio::test]
    async fn test_timeout_is_not_found() {
        let slot = Arc::new(CountingSlot::default());
        let loader = ClientLoader::new(Arc::new(HangingSource), slot.clone(), ANCHOR)
            .with_timeout(Duration::from_millis(20));

        let state = loader.load("bmi", Locale::ENGLISH).await;
        assert!(matches!(state, LoaderState::NotFound));
        assert_eq!(slot.removals(), 1);
    }

    // ==================== Cancellation Tests ====================

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let gate = Arc::new(Notify::new());
        let (loader, slot) = loader(GatedSource::default().gate("bmi", gate.clone()));

        // A (bmi) is requested first and settles last
        let (a, b, ()) = futures::join!(
            loader.load("bmi", Locale::ENGLISH),
            loader.load("tip", Locale::ENGLISH),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert_eq!(ready_id(&b).as_deref(), Some("tip"));
        assert_eq!(ready_id(&a).as_deref(), Some("tip"));
        assert_eq!(ready_id(&loader.state()).as_deref(), Some("tip"));
        assert_eq!(loader.request().map(|(id, _)| id).as_deref(), Some("tip"));
        assert_eq!(slot.removals(), 1);
    }

    #[tokio::test]
    async fn test_stale_success_does_not_override_newer_failure() {
        let gate = Arc::new(Notify::new());
        let (loader, slot) = loader(GatedSource::default().gate("bmi", gate.clone()));

        futures::join!(
            loader.load("bmi", Locale::ENGLISH),
            loader.load("mortgage", Locale::ENGLISH),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert!(matches!(loader.state(), LoaderState::NotFound));
        assert_eq!(slot.removals(), 1);
    }

    #[tokio::test]
    async fn test_fresh_request_returns_to_loading() {
        let gate = Arc::new(Notify::new());
        let (loader, _slot) = loader(GatedSource::default().gate("bmi", gate.clone()));

        loader.load("tip", Locale::ENGLISH).await;
        assert!(loader.state().is_terminal());

        let observe = async {
            tokio::task::yield_now().await;
            let during = loader.state();
            gate.notify_one();
            during
        };
        let (after, during) = futures::join!(loader.load("bmi", Locale::ENGLISH), observe);

        assert!(matches!(during, LoaderState::Loading));
        assert_eq!(ready_id(&after).as_deref(), Some("bmi"));
    }
}
