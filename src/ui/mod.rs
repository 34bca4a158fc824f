pub mod cursor;
pub mod popup;

pub use cursor::Cursor;
pub use popup::{Popup, PopupManager};
