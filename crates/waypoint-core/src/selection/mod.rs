//! Endpoint health evaluation, benchmarking, and selection.
//!
//! This module decides, for one chain, which of several redundant RPC URLs
//! to use. The pieces compose bottom-up:
//!
//! - [`check_endpoint`] probes a single URL with a bounded sub-timeout and
//!   classifies it as healthy or not (reachability plus height freshness).
//! - [`benchmark_endpoints`] runs one concurrent probe per candidate URL
//!   and collects results in input order.
//! - [`Picker`] holds per-chain selection state (round-robin cursor,
//!   fastest-mode cache) and returns one winner per call.
//! - [`select_best`] is the stateless one-shot: benchmark, then pick.
//!
//! # Selection Algorithms
//!
//! | Algorithm     | Strategy                                              |
//! |---------------|-------------------------------------------------------|
//! | `fastest`     | Score by freshness and latency, cache winner for 5 s  |
//! | `round-robin` | Rotate through currently eligible endpoints           |
//! | `failover`    | First usable endpoint in caller-declared order        |
//!
//! Endpoints that were never probed are treated optimistically: they stay
//! candidates rather than liabilities, so a configuration with no probe
//! data yet never filters everything out.

pub mod benchmark;
pub mod endpoint;
pub mod errors;
pub mod health;
pub mod picker;
pub mod select;

pub use benchmark::{benchmark_endpoints, results_to_endpoints};
pub use endpoint::{BenchmarkResult, Endpoint};
pub use errors::SelectionError;
pub use health::{check_endpoint, STALE_BLOCK_THRESHOLD};
pub use picker::{Algorithm, Picker, FASTEST_CACHE_TTL};
pub use select::select_best;
