//! Password hashing. A credential is a random salt plus the SHA-256
//! digest of salt || password, both base64-encoded for storage.

use anyhow::{bail, Result};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct HashedPw {
    pub salt: String,
    pub digest: String,
}

pub fn hash_new(password: &str) -> HashedPw {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = digest_password(&salt, password);

    HashedPw {
        salt: general_purpose::STANDARD_NO_PAD.encode(salt),
        digest: general_purpose::STANDARD_NO_PAD.encode(digest),
    }
}

/// Check a plaintext password against a stored credential. A malformed
/// credential is an `Err`, never a panic.
pub fn check(password: &str, truth: &HashedPw) -> Result<()> {
    let Ok(salt) = general_purpose::STANDARD_NO_PAD.decode(&truth.salt) else {
        bail!("malformed salt");
    };
    let Ok(truth_digest) =
        general_purpose::STANDARD_NO_PAD.decode(&truth.digest)
    else {
        bail!("malformed digest");
    };
    let candidate = digest_password(&salt, password);

    if constant_time_eq(&candidate, &truth_digest) {
        Ok(())
    } else {
        bail!("wrong password")
    }
}

fn digest_password(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());

    hasher.finalize().to_vec()
}

// Accumulate differences instead of short-circuiting so that comparison
// time does not depend on where the digests diverge.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }

    diff == 0
}
