//! Password hashing for data sets.
//!
//! Rewrites `users.json` so that no plaintext password remains. Records that
//! already carry a `passwordHash` are left alone; a record with both keeps
//! its hash and loses the plaintext.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;

use sunglasses_storefront::services::AuthError;
use sunglasses_storefront::services::auth::hash_password;
use sunglasses_storefront::store::USERS_FILE;
use sunglasses_storefront::store::records::UserRecord;

/// Errors that can occur while rewriting passwords.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// `users.json` could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `users.json` is not a valid user table.
    #[error("Invalid users file: {0}")]
    Json(#[from] serde_json::Error),

    /// Hashing failed.
    #[error("Failed to hash password: {0}")]
    Hash(#[from] AuthError),
}

/// Hash every plaintext password in `<dir>/users.json`.
///
/// # Errors
///
/// Returns `PasswordError` if the file cannot be read, parsed, hashed or
/// written back. The file is untouched on error.
pub async fn hash_passwords(dir: &Path) -> Result<usize, PasswordError> {
    let path = dir.join(USERS_FILE);
    let io_error = |source| PasswordError::Io {
        path: path.clone(),
        source,
    };

    let raw = tokio::fs::read_to_string(&path).await.map_err(io_error)?;
    let mut records: Vec<UserRecord> = serde_json::from_str(&raw)?;

    let hashed = hash_records(&mut records)?;
    if hashed == 0 {
        tracing::info!("No plaintext passwords in {}", path.display());
        return Ok(0);
    }

    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');
    replace_file(&path, json).await?;

    tracing::info!("Hashed {} passwords in {}", hashed, path.display());
    Ok(hashed)
}

/// Write `contents` beside `path`, then rename it into place.
///
/// A failed write leaves `path` as it was.
async fn replace_file(path: &Path, contents: String) -> Result<(), PasswordError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(source) = tokio::fs::write(&tmp, contents).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(PasswordError::Io { path: tmp, source });
    }

    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(PasswordError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Replace plaintext passwords with Argon2 hashes. Returns how many records
/// changed.
fn hash_records(records: &mut [UserRecord]) -> Result<usize, AuthError> {
    let mut hashed = 0;
    for record in records {
        let Some(password) = record.login.password.take() else {
            continue;
        };
        if record.login.password_hash.is_none() {
            record.login.password_hash = Some(hash_password(&SecretString::from(password))?);
        }
        hashed += 1;
    }
    Ok(hashed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    const EXISTING_HASH: &str =
        "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";

    fn record(login: serde_json::Value) -> UserRecord {
        serde_json::from_value(json!({
            "name": { "title": "mr", "first": "salvador", "last": "jordan" },
            "email": "salvador.jordan@example.com",
            "login": login,
        }))
        .unwrap()
    }

    #[test]
    fn test_hash_records_replaces_plaintext() {
        let mut records = vec![record(json!({ "username": "lazywolf342", "password": "tucker" }))];

        assert_eq!(hash_records(&mut records).unwrap(), 1);

        let login = &records[0].login;
        assert!(login.password.is_none());
        assert!(login.password_hash.as_deref().unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_records_keeps_existing_hash() {
        let mut records = vec![
            record(json!({ "username": "lazywolf342", "passwordHash": EXISTING_HASH })),
            record(json!({
                "username": "whitekoala649",
                "password": "spider",
                "passwordHash": EXISTING_HASH,
            })),
        ];

        assert_eq!(hash_records(&mut records).unwrap(), 1);
        for record in &records {
            assert!(record.login.password.is_none());
            assert_eq!(record.login.password_hash.as_deref(), Some(EXISTING_HASH));
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sg-cli-{name}-{}", std::process::id()))
    }

    fn users_json() -> serde_json::Value {
        json!([{
            "gender": "female",
            "name": { "title": "mrs", "first": "susanna", "last": "richards" },
            "email": "susanna.richards@example.com",
            "login": { "username": "yellowleopard753", "password": "jonjon" },
            "accessToken": "kjKQZ2QHG1eFCfmT",
            "cart": []
        }])
    }

    #[tokio::test]
    async fn test_hash_passwords_rewrites_file() {
        let dir = scratch_dir("hash");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join(USERS_FILE), users_json().to_string())
            .await
            .unwrap();

        assert_eq!(hash_passwords(&dir).await.unwrap(), 1);
        assert_eq!(hash_passwords(&dir).await.unwrap(), 0);

        let rewritten: serde_json::Value =
            serde_json::from_str(&tokio::fs::read_to_string(dir.join(USERS_FILE)).await.unwrap())
                .unwrap();
        let user = &rewritten[0];
        assert_eq!(user["gender"], "female");
        assert_eq!(user["accessToken"], "kjKQZ2QHG1eFCfmT");
        assert!(user["login"].get("password").is_none());
        assert!(user["login"]["passwordHash"].is_string());
        assert!(!dir.join(format!("{USERS_FILE}.tmp")).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_write_keeps_original_file() {
        let dir = scratch_dir("hash-fail");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let original = users_json().to_string();
        tokio::fs::write(dir.join(USERS_FILE), &original).await.unwrap();
        // A directory where the temp file should go makes the write fail
        tokio::fs::create_dir_all(dir.join(format!("{USERS_FILE}.tmp")))
            .await
            .unwrap();

        let err = hash_passwords(&dir).await.unwrap_err();
        assert!(matches!(err, PasswordError::Io { .. }));
        assert_eq!(
            tokio::fs::read_to_string(dir.join(USERS_FILE)).await.unwrap(),
            original
        );

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
