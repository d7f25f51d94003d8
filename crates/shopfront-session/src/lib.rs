pub mod auth;
pub mod error;
pub mod storage;
pub mod theme_store;

pub use auth::{AuthProvider, MockAuthProvider, Session, UserProfile};
pub use error::{AuthError, SessionError};
pub use storage::{FileStore, LocalStore, MemoryStore, AUTH_TOKEN_KEY, THEME_KEY, USER_DATA_KEY};
pub use theme_store::{ThemeRemote, ThemeStore};
