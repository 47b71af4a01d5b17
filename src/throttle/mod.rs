// ABOUTME: Throttle module for pacing outbound calls.
// ABOUTME: Contains the minimum-spacing rate governor and its wrapped-call handle.

mod governor;

pub use governor::{Guarded, RateGovernor, Spacing};
