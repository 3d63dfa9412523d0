//! Location-driven proximity search.
//!
//! The controller owns the search state behind a short-lived `std` mutex
//! (never held across an `.await`). Every query funnels through a single
//! admission step that enforces at-most-one-in-flight, the movement
//! debounce and the empty-selection short circuit.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use super::location::{AuthorizationState, LocationEvent, LocationReceiver};
use super::provider::{Candidate, PlacesError, PlacesProvider};
use crate::config::SearchConfig;
use crate::config::settings::{KEY_DEBUG_MODE, KEY_SELECTED_CATEGORIES, SettingsStore};
use crate::errors::AppResult;
use crate::models::{CategorySet, GeoPoint, PlaceCandidate, PoiCategory};

const UNKNOWN_ADDRESS: &str = "Unknown";

/// How a search request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Provider answered; `results` entries were kept.
    Completed { results: usize },
    /// No categories selected: results cleared, provider not called.
    Cleared,
    /// Provider failed: results cleared, error recorded.
    Failed(PlacesError),
    /// Another search was in flight. The request was dropped.
    Busy,
    /// Position moved less than the threshold since the last query.
    Debounced { moved_meters: f64 },
    /// Nothing to search from yet.
    NoReferencePoint,
    /// `refresh` gave up waiting for the in-flight search.
    TimedOut,
}

/// Filtering counters, recorded only in debug mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchDiagnostics {
    pub center: Option<GeoPoint>,
    pub returned: usize,
    pub unnamed: usize,
    pub beyond_radius: usize,
    pub truncated: usize,
    pub kept: usize,
}

/// Observable controller state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub is_searching: bool,
    pub last_queried_location: Option<GeoPoint>,
    pub current_location: Option<GeoPoint>,
    pub debug_center: Option<GeoPoint>,
    pub results: Vec<PlaceCandidate>,
    pub last_error: Option<PlacesError>,
    pub authorization: AuthorizationState,
    pub selected_categories: CategorySet,
    pub debug_mode: bool,
    pub diagnostics: Option<SearchDiagnostics>,
}

struct Inner {
    provider: Arc<dyn PlacesProvider>,
    config: SearchConfig,
    available: CategorySet,
    state: Mutex<SearchState>,
    settings: Mutex<Box<dyn SettingsStore>>,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_settings(&self) -> MutexGuard<'_, Box<dyn SettingsStore>> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight flag however the search ends, cancellation included.
struct SearchGuard {
    inner: Arc<Inner>,
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        self.inner.lock_state().is_searching = false;
    }
}

/// Admitted search: the guard plus a snapshot of what to ask for.
struct Admission {
    guard: SearchGuard,
    center: GeoPoint,
    categories: CategorySet,
    debug_mode: bool,
}

#[derive(Clone)]
pub struct ProximitySearchController {
    inner: Arc<Inner>,
}

impl ProximitySearchController {
    /// Build a controller. The provider capability is read once here; saved
    /// selections are narrowed to what it supports.
    pub fn new(
        provider: Arc<dyn PlacesProvider>,
        config: SearchConfig,
        settings: Box<dyn SettingsStore>,
    ) -> Self {
        let available = provider.supported_categories();
        let selected_categories = saved_selection(settings.as_ref(), &available);
        let debug_mode = settings.get_bool(KEY_DEBUG_MODE);

        debug!(
            available = available.len(),
            selected = selected_categories.len(),
            debug_mode,
            "search controller ready"
        );

        let state = SearchState {
            selected_categories,
            debug_mode,
            ..SearchState::default()
        };

        Self {
            inner: Arc::new(Inner {
                provider,
                config,
                available,
                state: Mutex::new(state),
                settings: Mutex::new(settings),
            }),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    pub fn available_categories(&self) -> &CategorySet {
        &self.inner.available
    }

    pub fn snapshot(&self) -> SearchState {
        self.inner.lock_state().clone()
    }

    pub fn results(&self) -> Vec<PlaceCandidate> {
        self.inner.lock_state().results.clone()
    }

    pub fn is_searching(&self) -> bool {
        self.inner.lock_state().is_searching
    }

    pub fn selected_categories(&self) -> CategorySet {
        self.inner.lock_state().selected_categories.clone()
    }

    /// Debug center when debug mode is on and one is set, otherwise the
    /// latest known position, otherwise the last queried point.
    pub fn reference_point(&self) -> Option<GeoPoint> {
        let state = self.inner.lock_state();
        if state.debug_mode
            && let Some(center) = state.debug_center
        {
            return Some(center);
        }
        state.current_location.or(state.last_queried_location)
    }

    /// Debounced entry point for position updates.
    pub async fn on_location_update(&self, point: GeoPoint) -> SearchOutcome {
        self.inner.lock_state().current_location = Some(point);
        match self.admit(point, true) {
            Ok(admission) => self.execute(admission).await,
            Err(outcome) => outcome,
        }
    }

    /// Explicit search around `point`. Ignores the debounce but not the
    /// in-flight guard.
    pub async fn search(&self, point: GeoPoint) -> SearchOutcome {
        match self.admit(point, false) {
            Ok(admission) => self.execute(admission).await,
            Err(outcome) => outcome,
        }
    }

    /// Persist a new selection and search again from the reference point.
    /// Categories the provider does not support are dropped.
    pub async fn set_selected_categories(
        &self,
        categories: CategorySet,
    ) -> AppResult<SearchOutcome> {
        let selection: CategorySet = categories
            .intersection(&self.inner.available)
            .copied()
            .collect();
        let keys: Vec<String> = selection.iter().map(|c| c.key().to_string()).collect();
        self.inner
            .lock_settings()
            .set_strings(KEY_SELECTED_CATEGORIES, &keys)?;

        self.inner.lock_state().selected_categories = selection;
        Ok(self.search_from_reference().await)
    }

    /// Flip one category on or off.
    pub async fn toggle_category(&self, category: PoiCategory) -> AppResult<SearchOutcome> {
        let mut selection = self.selected_categories();
        if !selection.remove(&category) {
            selection.insert(category);
        }
        self.set_selected_categories(selection).await
    }

    pub async fn set_debug_mode(&self, enabled: bool) -> AppResult<SearchOutcome> {
        self.inner
            .lock_settings()
            .set_bool(KEY_DEBUG_MODE, enabled)?;
        {
            let mut state = self.inner.lock_state();
            state.debug_mode = enabled;
            if !enabled {
                state.diagnostics = None;
            }
        }
        Ok(self.search_from_reference().await)
    }

    /// Map center used as the search origin in debug mode. Does not search.
    pub fn set_debug_center(&self, center: Option<GeoPoint>) {
        self.inner.lock_state().debug_center = center;
    }

    pub fn set_authorization(&self, authorization: AuthorizationState) {
        if !authorization.allows_updates() {
            info!(?authorization, "location updates unavailable");
        }
        self.inner.lock_state().authorization = authorization;
    }

    /// Manual refresh. Waits for an in-flight search to settle (bounded by
    /// the configured timeout), otherwise searches from the reference point.
    pub async fn refresh(&self) -> SearchOutcome {
        if !self.is_searching() {
            return self.search_from_reference().await;
        }

        let timeout = self.inner.config.refresh_timeout();
        let poll = self.inner.config.refresh_poll();
        if !self.wait_idle(timeout, poll).await {
            warn!(?timeout, "refresh timed out waiting for the running search");
            return SearchOutcome::TimedOut;
        }

        let state = self.inner.lock_state();
        match &state.last_error {
            Some(err) => SearchOutcome::Failed(err.clone()),
            None => SearchOutcome::Completed {
                results: state.results.len(),
            },
        }
    }

    /// Consume location events until the sender side closes. Position
    /// updates run concurrently and rely on admission to drop overlaps.
    /// Returns the number of positions handled.
    pub async fn listen(&self, mut events: LocationReceiver) -> usize {
        let mut tasks = JoinSet::new();
        let mut positions = 0;

        while let Some(event) = events.recv().await {
            match event {
                LocationEvent::Position(point) => {
                    positions += 1;
                    let controller = self.clone();
                    tasks.spawn(async move { controller.on_location_update(point).await });
                }
                LocationEvent::Authorization(state) => self.set_authorization(state),
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "location task failed");
            }
        }
        positions
    }

    async fn search_from_reference(&self) -> SearchOutcome {
        match self.reference_point() {
            Some(point) => self.search(point).await,
            None => SearchOutcome::NoReferencePoint,
        }
    }

    async fn wait_idle(&self, timeout: Duration, poll: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_searching() {
            if Instant::now() >= deadline {
                return false;
            }
            sleep(poll).await;
        }
        true
    }

    fn admit(&self, center: GeoPoint, debounce: bool) -> Result<Admission, SearchOutcome> {
        let mut state = self.inner.lock_state();

        if state.is_searching {
            debug!(%center, "search already running, request dropped");
            return Err(SearchOutcome::Busy);
        }

        if debounce && let Some(last) = state.last_queried_location {
            let moved = center.distance_to(&last);
            if moved < self.inner.config.movement_threshold_meters {
                debug!(moved, "movement below threshold");
                return Err(SearchOutcome::Debounced {
                    moved_meters: moved,
                });
            }
        }

        state.last_queried_location = Some(center);

        if state.selected_categories.is_empty() {
            state.results.clear();
            state.last_error = None;
            state.diagnostics = None;
            return Err(SearchOutcome::Cleared);
        }

        state.is_searching = true;
        Ok(Admission {
            guard: SearchGuard {
                inner: Arc::clone(&self.inner),
            },
            center,
            categories: state.selected_categories.clone(),
            debug_mode: state.debug_mode,
        })
    }

    async fn execute(&self, admission: Admission) -> SearchOutcome {
        let Admission {
            guard,
            center,
            categories,
            debug_mode,
        } = admission;
        let config = &self.inner.config;

        debug!(%center, categories = categories.len(), "querying places provider");
        let response = self
            .inner
            .provider
            .search(center, config.radius_meters, &categories)
            .await;

        let outcome = {
            let mut state = self.inner.lock_state();
            match response {
                Ok(candidates) => {
                    let (results, mut diagnostics) = rank_candidates(
                        center,
                        candidates,
                        config.radius_meters,
                        config.max_results,
                    );
                    diagnostics.center = Some(center);
                    if debug_mode {
                        info!(?diagnostics, "search diagnostics");
                    }
                    let count = results.len();
                    state.results = results;
                    state.last_error = None;
                    state.diagnostics = debug_mode.then_some(diagnostics);
                    SearchOutcome::Completed { results: count }
                }
                Err(err) => {
                    warn!(error = %err, "places search failed");
                    state.results.clear();
                    state.last_error = Some(err.clone());
                    state.diagnostics = None;
                    SearchOutcome::Failed(err)
                }
            }
        };

        drop(guard);
        outcome
    }
}

/// Drop unnamed and out-of-radius candidates, sort nearest first and cap.
pub fn rank_candidates(
    center: GeoPoint,
    candidates: Vec<Candidate>,
    radius_meters: f64,
    max_results: Option<usize>,
) -> (Vec<PlaceCandidate>, SearchDiagnostics) {
    let mut diagnostics = SearchDiagnostics {
        returned: candidates.len(),
        ..SearchDiagnostics::default()
    };

    let mut ranked: Vec<PlaceCandidate> = candidates
        .into_iter()
        .filter_map(|c| {
            if c.name.trim().is_empty() {
                diagnostics.unnamed += 1;
                return None;
            }
            let distance = center.distance_to(&c.location);
            if distance > radius_meters {
                diagnostics.beyond_radius += 1;
                return None;
            }
            Some(PlaceCandidate {
                name: c.name,
                address: c
                    .address
                    .filter(|a| !a.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
                location: c.location,
                category: c.category,
                distance_meters: distance,
            })
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

    if let Some(max) = max_results
        && ranked.len() > max
    {
        diagnostics.truncated = ranked.len() - max;
        ranked.truncate(max);
    }
    diagnostics.kept = ranked.len();

    (ranked, diagnostics)
}

/// Persisted category selection narrowed to `available`; defaults when never saved.
pub fn saved_selection(settings: &dyn SettingsStore, available: &CategorySet) -> CategorySet {
    let Some(saved) = settings.get_strings(KEY_SELECTED_CATEGORIES) else {
        return PoiCategory::defaults()
            .intersection(available)
            .copied()
            .collect();
    };

    saved
        .iter()
        .filter_map(|key| match key.parse::<PoiCategory>() {
            Ok(category) => Some(category),
            Err(_) => {
                warn!(key = %key, "ignoring unknown saved category");
                None
            }
        })
        .filter(|c| available.contains(c))
        .collect()
}
