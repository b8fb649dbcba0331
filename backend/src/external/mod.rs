//! External API integrations

pub mod firebase;
pub mod google_auth;
pub mod model_files;
pub mod translate;

pub use firebase::FirebaseClient;
pub use google_auth::{GoogleAuth, ServiceAccountKey};
pub use translate::TranslateClient;
