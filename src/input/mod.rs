pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{ClickEvent, EventKind, MapEvent};
pub use handler::{listeners, Action, EventCallback, EventManager};
