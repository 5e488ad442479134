// Plumeria authentication library
// Provides password hashing/verification, the per-request caller
// identity and the credential login flow.

pub mod context;
pub mod login;
pub mod password;

pub use context::AuthContext;
pub use login::login;
pub use password::{hash_password, verify_password};
