mod crypto;
mod db;
mod extractor;

pub use crypto::{hash_password, verify_password};
pub use extractor::{AuthUser, MaybeAuthUser};
