pub mod config_service;
pub mod local_store;
pub mod paths;
pub mod session_storage;

pub use config_service::ConfigService;
pub use local_store::LocalStore;
pub use session_storage::FileSessionStorage;
