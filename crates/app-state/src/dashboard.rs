//! Dashboard data store
//!
//! Owns the dashboard's load lifecycle: fetch analytics and merchant info
//! together, publish the result, and let the user retry after a failure.
//!
//! # Guarantees
//!
//! - Only one fetch runs at a time; a load requested while one is pending
//!   returns [`LoadOutcome::AlreadyLoading`].
//! - After [`DashboardStore::unmount`], no fetch result changes the state.

use merchant_client::{fetch_dashboard, DashboardBundle, MerchantApi};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Load state of the dashboard
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Data is available
    Loaded(Arc<DashboardBundle>),
    /// The last fetch failed
    Failed {
        /// Error description
        message: String,
        /// The merchant does not exist
        not_found: bool,
    },
}

impl LoadState {
    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Whether the last fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }

    /// Loaded data, if any
    pub fn bundle(&self) -> Option<&Arc<DashboardBundle>> {
        match self {
            LoadState::Loaded(bundle) => Some(bundle),
            _ => None,
        }
    }
}

/// What a call to [`DashboardStore::load`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetch ran and its result was published
    Completed,
    /// Another fetch was pending; nothing was started
    AlreadyLoading,
    /// The store was unmounted; the result (if any) was dropped
    Discarded,
}

/// Clears the in-flight flag when a load finishes or is aborted
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Dashboard load state for one merchant
pub struct DashboardStore {
    api: Arc<dyn MerchantApi>,
    merchant_id: String,
    state_tx: watch::Sender<LoadState>,
    in_flight: AtomicBool,
    generation: AtomicU64,
    unmounted: AtomicBool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardStore {
    /// Create an idle store
    pub fn new(api: Arc<dyn MerchantApi>, merchant_id: impl Into<String>) -> Arc<Self> {
        let (state_tx, _) = watch::channel(LoadState::Idle);
        Arc::new(Self {
            api,
            merchant_id: merchant_id.into(),
            state_tx,
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            unmounted: AtomicBool::new(false),
            task: Mutex::new(None),
        })
    }

    /// Merchant this store loads
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Snapshot of the current state
    pub fn state(&self) -> LoadState {
        self.state_tx.borrow().clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Whether [`unmount`](Self::unmount) has been called
    pub fn is_unmounted(&self) -> bool {
        self.unmounted.load(Ordering::SeqCst)
    }

    /// Fetch and publish the dashboard data
    pub async fn load(&self) -> LoadOutcome {
        if self.is_unmounted() {
            return LoadOutcome::Discarded;
        }
        if !self.try_begin() {
            return LoadOutcome::AlreadyLoading;
        }
        self.run_load(InFlightGuard(&self.in_flight)).await
    }

    /// Re-run the fetch from scratch
    pub async fn retry(&self) -> LoadOutcome {
        tracing::info!(merchant = %self.merchant_id, "Retrying dashboard load");
        self.load().await
    }

    /// Start a load in the background
    ///
    /// Returns `false` without spawning when a load is pending or the store is
    /// unmounted. Must be called from within a tokio runtime.
    pub fn spawn_load(self: &Arc<Self>) -> bool {
        if self.is_unmounted() || !self.try_begin() {
            return false;
        }

        let store = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let guard = InFlightGuard(&store.in_flight);
            store.run_load(guard).await;
        });
        *self.task.lock() = Some(handle);
        true
    }

    /// Tear the store down
    ///
    /// Aborts a background load and discards any result still in flight.
    pub fn unmount(&self) {
        if self.unmounted.swap(true, Ordering::SeqCst) {
            return;
        }

        // Bump under the state lock so a finishing load cannot interleave
        self.state_tx.send_if_modified(|_| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            false
        });

        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
        self.in_flight.store(false, Ordering::SeqCst);
        tracing::debug!(merchant = %self.merchant_id, "Dashboard store unmounted");
    }

    fn try_begin(&self) -> bool {
        let acquired = self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if !acquired {
            tracing::debug!(merchant = %self.merchant_id, "Load already pending");
        }
        acquired
    }

    async fn run_load(&self, _guard: InFlightGuard<'_>) -> LoadOutcome {
        let generation = self.generation.load(Ordering::SeqCst);
        if !self.publish(generation, LoadState::Loading) {
            return LoadOutcome::Discarded;
        }

        tracing::info!(merchant = %self.merchant_id, "Loading dashboard");
        let next = match fetch_dashboard(self.api.as_ref(), &self.merchant_id).await {
            Ok(bundle) => LoadState::Loaded(Arc::new(bundle)),
            Err(e) => {
                tracing::warn!(merchant = %self.merchant_id, "Dashboard load failed: {}", e);
                LoadState::Failed {
                    message: e.to_string(),
                    not_found: e.is_not_found(),
                }
            }
        };

        if self.publish(generation, next) {
            LoadOutcome::Completed
        } else {
            tracing::debug!(merchant = %self.merchant_id, "Discarding result after unmount");
            LoadOutcome::Discarded
        }
    }

    fn publish(&self, generation: u64, next: LoadState) -> bool {
        self.state_tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }
}

impl Drop for DashboardStore {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

impl fmt::Debug for DashboardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardStore")
            .field("merchant_id", &self.merchant_id)
            .field("state", &*self.state_tx.borrow())
            .field("in_flight", &self.is_loading())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use merchant_client::sample::sample_analytics;
    use merchant_client::{
        AnalyticsResponse, Error, MerchantInfo, MerchantInfoResponse, SampleMerchantService,
        SampleServiceConfig,
    };
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Counts calls and fails until told otherwise
    struct FlakyApi {
        analytics_calls: AtomicUsize,
        failing: AtomicBool,
        delay: Duration,
    }

    impl FlakyApi {
        fn new(failing: bool, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                analytics_calls: AtomicUsize::new(0),
                failing: AtomicBool::new(failing),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.analytics_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MerchantApi for FlakyApi {
        async fn get_merchant_analytics(
            &self,
            merchant_id: &str,
        ) -> merchant_client::Result<AnalyticsResponse> {
            self.analytics_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Api { status: 503, message: "Service unavailable".to_string() });
            }
            Ok(AnalyticsResponse {
                success: true,
                merchant_id: merchant_id.to_string(),
                data: sample_analytics(),
            })
        }

        async fn get_merchant_info(
            &self,
            merchant_id: &str,
        ) -> merchant_client::Result<MerchantInfoResponse> {
            Ok(MerchantInfoResponse {
                success: true,
                data: MerchantInfo {
                    id: merchant_id.to_string(),
                    name: "Flaky Shop".to_string(),
                    phone: "+45 87 65 43 21".to_string(),
                    email: "shop@example.dk".to_string(),
                },
            })
        }
    }

    fn sample_store(merchant_id: &str) -> Arc<DashboardStore> {
        let api = SampleMerchantService::with_config(SampleServiceConfig::default());
        DashboardStore::new(Arc::new(api), merchant_id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_success() {
        let store = sample_store("talent-garden");
        assert!(matches!(store.state(), LoadState::Idle));

        assert_eq!(store.load().await, LoadOutcome::Completed);

        let state = store.state();
        let bundle = state.bundle().unwrap();
        assert_eq!(bundle.merchant.name, "Talent Garden");
        assert_eq!(bundle.analytics.stats.today.customers, 47);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_merchant_fails_not_found() {
        let store = sample_store("acme");
        assert_eq!(store.load().await, LoadOutcome::Completed);

        match store.state() {
            LoadState::Failed { message, not_found } => {
                assert!(not_found);
                assert!(message.contains("acme"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_is_published() {
        let store = sample_store("talent-garden");
        let mut rx = store.subscribe();

        assert!(store.spawn_load());
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().bundle().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failure() {
        let api = FlakyApi::new(true, Duration::from_millis(100));
        let store = DashboardStore::new(api.clone(), "flaky");

        store.load().await;
        match store.state() {
            LoadState::Failed { not_found, .. } => assert!(!not_found),
            other => panic!("Expected Failed, got {:?}", other),
        }

        api.failing.store(false, Ordering::SeqCst);
        assert_eq!(store.retry().await, LoadOutcome::Completed);
        assert_eq!(store.state().bundle().unwrap().merchant.name, "Flaky Shop");
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_while_pending_does_not_refetch() {
        let api = FlakyApi::new(false, Duration::from_millis(500));
        let store = DashboardStore::new(api.clone(), "flaky");

        assert!(store.spawn_load());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.is_loading());

        assert_eq!(store.retry().await, LoadOutcome::AlreadyLoading);
        assert!(!store.spawn_load());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(api.calls(), 1);
        assert!(store.state().bundle().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_aborts_background_load() {
        let api = FlakyApi::new(false, Duration::from_millis(500));
        let store = DashboardStore::new(api.clone(), "flaky");

        store.spawn_load();
        tokio::time::sleep(Duration::from_millis(100)).await;
        store.unmount();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert!(store.state().is_loading());
        assert!(!store.is_loading());
        assert!(!store.spawn_load());
        assert_eq!(store.load().await, LoadOutcome::Discarded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_after_unmount_is_discarded() {
        let api = FlakyApi::new(false, Duration::from_millis(500));
        let store = DashboardStore::new(api, "flaky");

        let pending = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.load().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        store.unmount();

        assert_eq!(pending.await.unwrap(), LoadOutcome::Discarded);
        assert!(store.state().is_loading());
    }
}
