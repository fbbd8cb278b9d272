/*!
 * Core pipeline state and batching machinery.
 *
 * This module contains the per-run data model and the batched execution
 * engine shared by the fetch, translate and review stages:
 *
 * - `state`: DocFile records and the per-run mutable context
 * - `batch`: fixed-size concurrent batches with inter-batch pacing
 */

// Re-export main types for easier usage
pub use self::batch::{BatchPacing, BatchRunner};
pub use self::state::{DocFile, RunState};

// Submodules
pub mod batch;
pub mod state;
