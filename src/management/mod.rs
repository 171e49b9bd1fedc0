mod credentials;
mod file_store;
mod store;

pub use credentials::ACCESS_TOKEN_KEY;
pub use credentials::CredentialManager;
pub use credentials::PROFILE_KEY;
pub use credentials::REFRESH_TOKEN_KEY;
pub use file_store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
