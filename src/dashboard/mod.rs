pub mod state;
pub mod timer;

pub use state::{Action, Dashboard, SavedArticle, Slot};
pub use timer::{RefreshTimer, StopHandle};
