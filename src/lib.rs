pub mod api;
pub mod config;
pub mod error;
pub mod lambda;
pub mod logging;
pub mod menu;
pub mod source;
pub mod store;
pub mod sync;

pub use config::Config;
pub use error::{MenuError, Result};
pub use menu::{Dish, MenuParser, NoiseFilter, ParsedMenu};
pub use store::{DuplicatePolicy, MenuItem, MenuStore};
pub use sync::{AppState, SyncReport};
