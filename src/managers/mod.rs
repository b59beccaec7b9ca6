// Smartmark state managers
// Managers handle stateful operations: the per-view reconciled bookmark list
// and the mounted session driving it.

pub mod list_reconciler;
pub mod view_session;
