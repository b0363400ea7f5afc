//! Solve observer trait for progress reporting and instrumentation.

use crate::blocks::ServiceBlock;
use crate::night::NightRoute;

/// Callbacks invoked by [`GreedySolver`][crate::GreedySolver] as blocks are
/// placed.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress { placed: usize }
///
/// impl SolveObserver for Progress {
///     fn on_block_placed(&mut self, _block: &ServiceBlock, _night: usize, _pos: usize) {
///         self.placed += 1;
///         if self.placed % 100 == 0 {
///             println!("{} blocks placed", self.placed);
///         }
///     }
/// }
/// ```
pub trait SolveObserver {
    /// `block` was inserted into existing night `night` (0-based) at
    /// `position`.
    fn on_block_placed(&mut self, _block: &ServiceBlock, _night: usize, _position: usize) {}

    /// A new night `night` (0-based) was opened holding only `block`.
    fn on_night_opened(&mut self, _night: usize, _block: &ServiceBlock) {}

    /// Called once with the final nights of a successful solve.
    fn on_solve_end(&mut self, _nights: &[NightRoute]) {}
}

/// A [`SolveObserver`] that does nothing.
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}
