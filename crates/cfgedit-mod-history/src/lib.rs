/// Undo/redo history for the editor buffer.
///
/// Provides an `UndoManager` that records edit operations, merges edits made
/// in quick succession into a single undo step, and keeps the history bounded
/// to a configurable depth.
pub mod config;
pub mod manager;
pub mod operation;

pub use config::HistoryConfig;
pub use manager::UndoManager;
pub use operation::{EditGroup, EditOperation};
