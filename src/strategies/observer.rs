//! Search Observer

/// Observer trait for watching an exhaustive search as it runs.
///
/// The search calls `on_candidate` for every count vector it evaluates, in
/// enumeration order, and `on_improvement` whenever a feasible candidate beats
/// the best seen so far. Counts are in catalog order.
///
/// When no observer is provided the search uses [`NoopObserver`] and the calls
/// are optimised away via monomorphization.
pub trait SearchObserver {
    /// Called for every evaluated combination.
    ///
    /// # Parameters
    ///
    /// - `counts`: Cards per denomination, in catalog order
    /// - `total_value`: Effective value of the combination in minor units
    /// - `feasible`: Whether the combination satisfies the search objective
    fn on_candidate(&mut self, _counts: &[u32], _total_value: i64, _feasible: bool) {}

    /// Called when a combination becomes the new best.
    ///
    /// # Parameters
    ///
    /// - `counts`: Cards per denomination, in catalog order
    /// - `total_value`: Effective value of the combination in minor units
    fn on_improvement(&mut self, _counts: &[u32], _total_value: i64) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}
