pub mod chat;
pub mod config;
pub mod error;
pub mod explore;
pub mod navigation;
pub mod registry;
pub mod search;
pub mod state;
pub mod surface;
pub mod theme;
pub mod wizard;

// Re-export main types for convenience
pub use chat::{ChatController, ChatPhase, PendingReply, ReplyScheduler, SessionId};
pub use config::{Config, MemoryStore, PreferenceStore, THEME_KEY};
pub use error::{Result, ZaiError};
pub use explore::{ExploreController, ExploreLayout, ExplorePanel};
pub use navigation::Navigator;
pub use registry::{PageEntry, HOME_PAGE, PAGES};
pub use search::{SearchController, SearchKey};
pub use state::{ChatMessage, ChatRole};
pub use surface::{RecordingSurface, ScrollTarget, Surface};
pub use theme::{ThemeController, ThemePreference};
pub use wizard::{StepState, Wizard};
