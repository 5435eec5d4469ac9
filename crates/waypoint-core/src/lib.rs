//! # Waypoint Core
//!
//! Core library for Waypoint, the resilience layer of a multi-chain wallet.
//! For every outbound read it decides which of several redundant upstream
//! endpoints to use, and tolerates partial or total unavailability of any
//! one of them without failing the caller's request.
//!
//! This crate provides the foundational components for:
//!
//! - **[`rpc`]**: The chain-probe contract and a JSON-RPC HTTP probe that
//!   measures endpoint latency and observed chain height.
//!
//! - **[`selection`]**: Health evaluation, concurrent benchmarking, and the
//!   stateful [`Picker`](selection::Picker) that selects one endpoint per
//!   call using a fastest, round-robin, or failover algorithm.
//!
//! - **[`history`]**: The [`HistoryProvider`](history::HistoryProvider)
//!   capability trait and the [`FallbackRegistry`](history::FallbackRegistry)
//!   that tries transaction-history sources in priority order until one
//!   produces usable data.
//!
//! - **[`config`]**: Layered configuration loading with per-chain endpoint
//!   lists and algorithm choice.
//!
//! ## Selection Flow
//!
//! ```text
//! Caller (per chain)
//!       |
//!       v
//! +--------------+     +---------------------+
//! | select_best  | --> | benchmark_endpoints |  one concurrent probe per URL,
//! +--------------+     +----------+----------+  join-all barrier
//!       |                         |
//!       |                         v
//!       |              +---------------------+
//!       +------------> |       Picker        |  eligibility filter, then
//!                      | fastest/round-robin |  score / cursor / position
//!                      |      /failover      |
//!                      +---------------------+
//! ```
//!
//! ## History Fallback Flow
//!
//! ```text
//! FallbackRegistry::fetch_history
//!       |
//!       v
//! provider 1 --error--> warning, continue
//! provider 2 --empty--> warning, continue
//! provider 3 --data---> HistoryResult { transactions, source, warnings }
//! ```
//!
//! Providers are tried sequentially, never in parallel: they are ordered by
//! cost and quality, and racing them would spend paid-tier quota on sources
//! a cheaper one would have satisfied.

pub mod config;
pub mod history;
pub mod rpc;
pub mod selection;
