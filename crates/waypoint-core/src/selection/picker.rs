use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use super::{endpoint::Endpoint, errors::SelectionError, health::STALE_BLOCK_THRESHOLD};

/// How long a fastest-mode winner stays cached before re-selection.
pub const FASTEST_CACHE_TTL: Duration = Duration::from_secs(5);

/// Endpoint selection algorithm. Fixed per [`Picker`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Score by height freshness and latency; cache the winner briefly.
    #[default]
    Fastest,
    /// Rotate through the currently eligible endpoints.
    RoundRobin,
    /// First usable endpoint in caller-declared priority order.
    Failover,
}

impl Algorithm {
    /// Parses a configuration string. Empty or unrecognized values fall
    /// back to [`Algorithm::Fastest`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "round-robin" => Self::RoundRobin,
            "failover" => Self::Failover,
            _ => Self::Fastest,
        }
    }

    /// Returns the configuration string for this algorithm.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::RoundRobin => "round-robin",
            Self::Failover => "failover",
        }
    }
}

type BenchmarkHook = Box<dyn Fn() + Send + Sync>;

/// Mutable selection state, scoped to one picker.
#[derive(Default)]
struct PickerState {
    /// Round-robin position, advanced by one on every call.
    cursor: usize,
    /// Fastest-mode cached winner.
    cached_url: Option<String>,
    /// When the cached winner expires.
    cache_expiry: Option<Instant>,
}

/// Stateful endpoint selector.
///
/// A picker is constructed once per selection context (typically once per
/// chain) and reused across calls so its fastest-mode cache and
/// round-robin cursor remain meaningful; a fresh picker has no memory.
/// All state is guarded by one exclusive lock held for the entire
/// [`pick`](Self::pick) call, including the optional benchmark hook, so
/// hooks must stay fast: a slow hook serializes every concurrent pick on
/// the same picker.
///
/// The round-robin cursor indexes the eligible list recomputed from each
/// call's input. If endpoint health changes between calls the cursor's
/// effective target can shift; the exact "no repeat until every endpoint
/// has been served" guarantee only holds while the eligible set is stable.
pub struct Picker {
    algorithm: Algorithm,
    cache_ttl: Duration,
    on_benchmark: Option<BenchmarkHook>,
    state: Mutex<PickerState>,
}

impl Picker {
    /// Creates a picker with the given algorithm and no memory.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            cache_ttl: FASTEST_CACHE_TTL,
            on_benchmark: None,
            state: Mutex::new(PickerState::default()),
        }
    }

    /// Installs a side-effect hook invoked before fastest-mode scoring
    /// whenever the cache cannot answer. Callers use it to trigger a
    /// benchmarking pass for the next call. Runs under the picker lock.
    #[must_use]
    pub fn with_benchmark_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_benchmark = Some(Box::new(hook));
        self
    }

    /// Overrides the fastest-mode cache TTL.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Returns this picker's algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Selects one endpoint URL from the supplied snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NoHealthyEndpoint`] when the list is empty
    /// or no endpoint survives filtering.
    pub fn pick(&self, endpoints: &[Endpoint]) -> Result<String, SelectionError> {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        match self.algorithm {
            Algorithm::Fastest => self.pick_fastest(&mut state, endpoints),
            Algorithm::RoundRobin => Self::pick_round_robin(&mut state, endpoints),
            Algorithm::Failover => Self::pick_failover(endpoints),
        }
    }

    /// Endpoints worth considering for fastest and round-robin selection.
    ///
    /// With no probe data at all, everything is a candidate. Once at least
    /// one endpoint has been checked, checked-and-unhealthy endpoints are
    /// excluded while unchecked ones stay in as hopeful candidates.
    fn eligible(endpoints: &[Endpoint]) -> Vec<&Endpoint> {
        let any_checked = endpoints.iter().any(|e| e.checked);
        endpoints
            .iter()
            .filter(|e| !any_checked || !e.checked || e.healthy)
            .collect()
    }

    fn pick_fastest(
        &self,
        state: &mut PickerState,
        endpoints: &[Endpoint],
    ) -> Result<String, SelectionError> {
        if let (Some(url), Some(expiry)) = (&state.cached_url, state.cache_expiry) {
            if Instant::now() < expiry && endpoints.iter().any(|e| &e.url == url) {
                tracing::trace!(url = %url, "returning cached fastest endpoint");
                return Ok(url.clone());
            }
        }

        if let Some(hook) = &self.on_benchmark {
            hook();
        }

        // Reference tip over all inputs, eligible or not.
        let best_height = endpoints.iter().map(|e| e.block_height).max().unwrap_or(0);

        let mut winner: Option<(f64, &Endpoint)> = None;
        for endpoint in Self::eligible(endpoints) {
            let blocks_behind = best_height.saturating_sub(endpoint.block_height);
            if blocks_behind > STALE_BLOCK_THRESHOLD {
                tracing::trace!(
                    url = %endpoint.url,
                    blocks_behind = blocks_behind,
                    "skipping stale endpoint"
                );
                continue;
            }

            let freshness = if best_height > 0 { 10.0 - blocks_behind as f64 } else { 0.0 };
            let latency_ms = endpoint.latency.as_millis() as f64;
            let speed = if latency_ms > 0.0 { 1000.0 / latency_ms } else { 0.0 };
            let score = freshness + speed;

            // Strict comparison: ties keep the earliest-seen candidate.
            match winner {
                Some((best_score, _)) if score <= best_score => {}
                _ => winner = Some((score, endpoint)),
            }
        }

        let Some((score, endpoint)) = winner else {
            return Err(SelectionError::NoHealthyEndpoint);
        };

        tracing::debug!(
            url = %endpoint.url,
            score = score,
            best_height = best_height,
            "selected fastest endpoint"
        );

        state.cached_url = Some(endpoint.url.clone());
        state.cache_expiry = Some(Instant::now() + self.cache_ttl);
        Ok(endpoint.url.clone())
    }

    fn pick_round_robin(
        state: &mut PickerState,
        endpoints: &[Endpoint],
    ) -> Result<String, SelectionError> {
        let candidates = Self::eligible(endpoints);
        if candidates.is_empty() {
            return Err(SelectionError::NoHealthyEndpoint);
        }

        let index = state.cursor % candidates.len();
        state.cursor = state.cursor.wrapping_add(1);

        tracing::trace!(
            index = index,
            candidates = candidates.len(),
            url = %candidates[index].url,
            "round-robin selection"
        );

        Ok(candidates[index].url.clone())
    }

    fn pick_failover(endpoints: &[Endpoint]) -> Result<String, SelectionError> {
        endpoints
            .iter()
            .find(|e| !(e.checked && !e.healthy))
            .map(|e| {
                tracing::trace!(url = %e.url, "failover selection");
                e.url.clone()
            })
            .ok_or(SelectionError::NoHealthyEndpoint)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    fn endpoint(url: &str, latency_ms: u64, height: u64, healthy: bool) -> Endpoint {
        Endpoint {
            url: url.to_string(),
            latency: Duration::from_millis(latency_ms),
            block_height: height,
            healthy,
            checked: true,
        }
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(Algorithm::parse("fastest"), Algorithm::Fastest);
        assert_eq!(Algorithm::parse("round-robin"), Algorithm::RoundRobin);
        assert_eq!(Algorithm::parse("failover"), Algorithm::Failover);

        // Empty and unrecognized values default to fastest.
        assert_eq!(Algorithm::parse(""), Algorithm::Fastest);
        assert_eq!(Algorithm::parse("quantum"), Algorithm::Fastest);
    }

    #[test]
    fn test_algorithm_round_trips_through_strings() {
        for algorithm in [Algorithm::Fastest, Algorithm::RoundRobin, Algorithm::Failover] {
            assert_eq!(Algorithm::parse(algorithm.as_str()), algorithm);
        }
    }

    #[test]
    fn test_fastest_prefers_lowest_latency_at_equal_height() {
        let picker = Picker::new(Algorithm::Fastest);
        let endpoints = vec![
            endpoint("https://a", 200, 100, true),
            endpoint("https://b", 30, 100, true),
            endpoint("https://c", 80, 100, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://b");
    }

    #[test]
    fn test_fastest_rejects_stale_endpoint_despite_lower_latency() {
        let picker = Picker::new(Algorithm::Fastest);
        // 990 is 10 behind 1000, past the threshold of 3.
        let endpoints = vec![
            endpoint("https://fresh", 50, 1000, true),
            endpoint("https://stale", 10, 990, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://fresh");
    }

    #[test]
    fn test_fastest_keeps_endpoint_exactly_at_threshold() {
        let picker = Picker::new(Algorithm::Fastest);
        let endpoints = vec![
            endpoint("https://tip", 500, 1000, true),
            endpoint("https://behind3", 10, 997, true),
        ];

        // 3 behind is still fresh; much lower latency wins.
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://behind3");
    }

    #[test]
    fn test_fastest_tie_keeps_earliest_candidate() {
        let picker = Picker::new(Algorithm::Fastest);
        let endpoints = vec![
            endpoint("https://first", 50, 100, true),
            endpoint("https://second", 50, 100, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://first");
    }

    #[test]
    fn test_fastest_caches_winner_within_ttl() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hook_hits = Arc::clone(&hits);
        let picker = Picker::new(Algorithm::Fastest)
            .with_benchmark_hook(move || {
                hook_hits.fetch_add(1, Ordering::SeqCst);
            });

        let endpoints = vec![
            endpoint("https://a", 100, 50, true),
            endpoint("https://b", 20, 50, true),
        ];

        for _ in 0..5 {
            assert_eq!(picker.pick(&endpoints).unwrap(), "https://b");
        }

        // Only the first pick missed the cache.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fastest_cache_ignored_when_url_left_the_set() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hook_hits = Arc::clone(&hits);
        let picker = Picker::new(Algorithm::Fastest)
            .with_benchmark_hook(move || {
                hook_hits.fetch_add(1, Ordering::SeqCst);
            });

        let first = vec![endpoint("https://a", 20, 50, true)];
        assert_eq!(picker.pick(&first).unwrap(), "https://a");

        // The cached winner is gone; selection must run again.
        let second = vec![endpoint("https://b", 40, 50, true)];
        assert_eq!(picker.pick(&second).unwrap(), "https://b");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fastest_cache_expires() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hook_hits = Arc::clone(&hits);
        let picker = Picker::new(Algorithm::Fastest)
            .with_cache_ttl(Duration::ZERO)
            .with_benchmark_hook(move || {
                hook_hits.fetch_add(1, Ordering::SeqCst);
            });

        let endpoints = vec![endpoint("https://a", 20, 50, true)];
        picker.pick(&endpoints).unwrap();
        picker.pick(&endpoints).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fastest_all_unchecked_is_optimistic() {
        let picker = Picker::new(Algorithm::Fastest);
        let endpoints = vec![
            Endpoint::unchecked("https://a"),
            Endpoint::unchecked("https://b"),
        ];

        // No probe data: everything eligible, first zero-score candidate wins.
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://a");
    }

    #[test]
    fn test_round_robin_cycles_in_input_order() {
        let picker = Picker::new(Algorithm::RoundRobin);
        let endpoints = vec![
            endpoint("https://a", 10, 100, true),
            endpoint("https://b", 10, 100, true),
            endpoint("https://c", 10, 100, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://a");
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://b");
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://c");
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://a");
    }

    #[test]
    fn test_round_robin_skips_checked_unhealthy() {
        let picker = Picker::new(Algorithm::RoundRobin);
        let endpoints = vec![
            endpoint("https://dead", 10, 100, false),
            endpoint("https://a", 10, 100, true),
            endpoint("https://b", 10, 100, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://a");
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://b");
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://a");
    }

    #[test]
    fn test_round_robin_keeps_unchecked_candidates() {
        let picker = Picker::new(Algorithm::RoundRobin);
        let endpoints = vec![
            endpoint("https://checked", 10, 100, true),
            Endpoint::unchecked("https://hopeful"),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://checked");
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://hopeful");
    }

    #[test]
    fn test_failover_returns_first_usable_in_declared_order() {
        let picker = Picker::new(Algorithm::Failover);
        let endpoints = vec![
            endpoint("https://primary", 10, 100, false),
            endpoint("https://secondary", 10, 100, true),
            endpoint("https://tertiary", 10, 100, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://secondary");
        // No state: same answer every time.
        assert_eq!(picker.pick(&endpoints).unwrap(), "https://secondary");
    }

    #[test]
    fn test_failover_treats_unchecked_as_usable_by_position() {
        let picker = Picker::new(Algorithm::Failover);
        let endpoints = vec![
            endpoint("https://dead", 10, 100, false),
            Endpoint::unchecked("https://unknown"),
            endpoint("https://alive", 10, 100, true),
        ];

        assert_eq!(picker.pick(&endpoints).unwrap(), "https://unknown");
    }

    #[test]
    fn test_empty_list_fails_for_every_algorithm() {
        for algorithm in [Algorithm::Fastest, Algorithm::RoundRobin, Algorithm::Failover] {
            let picker = Picker::new(algorithm);
            assert_eq!(picker.pick(&[]), Err(SelectionError::NoHealthyEndpoint));
        }
    }

    #[test]
    fn test_all_unhealthy_fails_for_every_algorithm() {
        let endpoints = vec![
            endpoint("https://a", 10, 100, false),
            endpoint("https://b", 10, 100, false),
        ];

        for algorithm in [Algorithm::Fastest, Algorithm::RoundRobin, Algorithm::Failover] {
            let picker = Picker::new(algorithm);
            assert_eq!(picker.pick(&endpoints), Err(SelectionError::NoHealthyEndpoint));
        }
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        fn arb_endpoint(index: usize) -> impl Strategy<Value = Endpoint> {
            (1u64..1000, 0u64..2000, any::<bool>(), any::<bool>()).prop_map(
                move |(latency_ms, height, healthy, checked)| Endpoint {
                    url: format!("https://rpc-{index}.example.com"),
                    latency: Duration::from_millis(latency_ms),
                    block_height: height,
                    healthy,
                    checked,
                },
            )
        }

        fn arb_endpoints() -> impl Strategy<Value = Vec<Endpoint>> {
            (1usize..8).prop_flat_map(|len| {
                (0..len).map(arb_endpoint).collect::<Vec<_>>()
            })
        }

        proptest! {
            #[test]
            fn fastest_never_selects_past_the_staleness_threshold(
                endpoints in arb_endpoints()
            ) {
                let picker = Picker::new(Algorithm::Fastest);
                let best_height =
                    endpoints.iter().map(|e| e.block_height).max().unwrap_or(0);

                if let Ok(url) = picker.pick(&endpoints) {
                    let chosen = endpoints
                        .iter()
                        .find(|e| e.url == url)
                        .expect("picked url must come from the input set");

                    prop_assert!(
                        best_height.saturating_sub(chosen.block_height)
                            <= STALE_BLOCK_THRESHOLD,
                        "picked {} at height {} with best height {}",
                        chosen.url,
                        chosen.block_height,
                        best_height
                    );
                }
            }

            #[test]
            fn pick_result_always_comes_from_input(
                endpoints in arb_endpoints(),
                algorithm in prop::sample::select(vec![
                    Algorithm::Fastest,
                    Algorithm::RoundRobin,
                    Algorithm::Failover,
                ])
            ) {
                let picker = Picker::new(algorithm);
                if let Ok(url) = picker.pick(&endpoints) {
                    prop_assert!(endpoints.iter().any(|e| e.url == url));
                }
            }
        }
    }
}
