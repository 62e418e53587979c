use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

const HASH_STACK_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to generate password salt")]
    Salt,
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("failed to spawn hashing thread")]
    Spawn(#[from] std::io::Error),
    #[error("hashing thread panicked")]
    Panicked,
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

fn on_hash_thread<T, F>(f: F) -> Result<T, PasswordError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    std::thread::Builder::new()
        .stack_size(HASH_STACK_SIZE)
        .spawn(f)?
        .join()
        .map_err(|_| PasswordError::Panicked)
}

fn hash_blocking(password: String) -> Result<String, PasswordError> {
    let mut salt = [0u8; 16];
    SystemRandom::new().fill(&mut salt).map_err(|_| PasswordError::Salt)?;
    on_hash_thread(move || {
        let salt = SaltString::encode_b64(&salt).map_err(|error| PasswordError::Hash(error.to_string()))?;
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| PasswordError::Hash(error.to_string()))
    })?
}

fn verify_blocking(password: String, hash: String) -> Result<bool, PasswordError> {
    on_hash_thread(move || {
        PasswordHash::new(&hash)
            .is_ok_and(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    })
}

pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_blocking(password)).await?
}

/// `false` for a wrong password as well as for a stored hash that can't be parsed.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_blocking(password, hash)).await?
}
