//! The list engine shared by every admin page: pagination state, filter
//! state, debounced search, the fetch orchestrator and the action
//! dispatcher.

pub mod debounce;
pub mod dispatch;
pub mod filters;
pub mod pager;
pub mod toast;
pub mod view;

pub use debounce::Debouncer;
pub use dispatch::{AdminAction, Dispatcher};
pub use filters::{FilterState, ListQuery, ALL};
pub use pager::Pager;
pub use toast::{MemoryNotifier, Notifier, TracingNotifier};
pub use view::{ListView, PageCount, PageFetcher, PageStats};
