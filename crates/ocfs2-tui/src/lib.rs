//! Terminal widgets shared by the ocfs2-format dialogs.

pub mod input;
pub mod widgets;

pub use input::InputField;
pub use widgets::{centered_rect, Choice, Spinner};
