// Password hashing and verification

use bcrypt::{hash, verify, DEFAULT_COST};
use plumeria_commons::{ApiError, ApiResult};
use sha2::{Digest, Sha256};

/// Bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Collapses a password of any length to a fixed-size hex digest.
///
/// bcrypt silently truncates its input at 72 bytes; hashing the SHA-256
/// digest instead keeps verification exact for arbitrarily long
/// passwords while the stored hash stays a bounded bcrypt string.
fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Hash a password with bcrypt.
///
/// Runs on the blocking thread pool to keep the async runtime free.
/// The returned hash string includes the salt.
pub async fn hash_password(password: &str) -> ApiResult<String> {
    let digest = digest_password(password);

    tokio::task::spawn_blocking(move || {
        hash(&digest, BCRYPT_COST).map_err(|e| ApiError::internal(format!("bcrypt error: {}", e)))
    })
    .await
    .map_err(|e| ApiError::internal(format!("task join error: {}", e)))?
}

/// Verify a password against a stored hash.
///
/// Runs on the blocking thread pool to keep the async runtime free.
pub async fn verify_password(password: &str, hashed: &str) -> ApiResult<bool> {
    let digest = digest_password(password);
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(&digest, &hashed)
            .map_err(|e| ApiError::internal(format!("bcrypt error: {}", e)))
    })
    .await
    .map_err(|e| ApiError::internal(format!("task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_round_trip() {
        let hashed = hash_password("sekai").await.unwrap();
        assert!(verify_password("sekai", &hashed).await.unwrap());
        assert!(!verify_password("sekai!", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_very_long_passwords_verify_exactly() {
        let long = "s".repeat(10_000);
        let hashed = hash_password(&long).await.unwrap();

        // Bounded output regardless of input length.
        assert!(hashed.len() < 100);

        assert!(verify_password(&long, &hashed).await.unwrap());

        // A single differing character fails, even past bcrypt's own
        // 72-byte input horizon.
        let mut off_by_one = long.clone();
        off_by_one.push('!');
        assert!(!verify_password(&off_by_one, &hashed).await.unwrap());
        let mut flipped = long.clone();
        flipped.replace_range(9_000..9_001, "x");
        assert!(!verify_password(&flipped, &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password("sekai").await.unwrap();
        let second = hash_password("sekai").await.unwrap();
        assert_ne!(first, second);
        assert!(verify_password("sekai", &first).await.unwrap());
        assert!(verify_password("sekai", &second).await.unwrap());
    }
}
