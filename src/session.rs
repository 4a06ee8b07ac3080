use super::{crypto, models::User};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// HMAC-secured session string, signed by the configured session secret.
///
/// Note: since this guy is stored in a browser cookie, it's important to
/// ensure it does not get too large.
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub created_at: i64,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            created_at: Utc::now().timestamp(),
        }
    }
}

pub fn serialize_session(session: &Session, secret: &str) -> String {
    let json_bytes = serde_json::to_string(&session)
        .expect("session can be JSON serialized");
    let b64 = general_purpose::STANDARD_NO_PAD.encode(json_bytes);
    let raw_digest = crypto::get_digest(secret, b64.as_bytes());
    let digest = general_purpose::STANDARD_NO_PAD.encode(raw_digest);

    format!("{}:{}", b64, digest)
}

pub fn deserialize_session(
    cookie: &str,
    secret: &str,
) -> Result<Session, &'static str> {
    let parts: Vec<&str> = cookie.split(':').collect();
    if parts.len() != 2 {
        return Err("Invalid session");
    }
    let b64_json: &[u8] = parts[0].as_bytes();
    let digest: Vec<u8> = match general_purpose::STANDARD_NO_PAD
        .decode(parts[1])
    {
        Ok(v) => v,
        Err(_) => {
            return Err("Cannot base64 decode the digest");
        }
    };

    if crypto::is_valid(secret, b64_json, &digest) {
        let json_string = match general_purpose::STANDARD_NO_PAD
            .decode(b64_json)
        {
            Ok(v) => v,
            Err(_) => {
                return Err("Cannot base64 decode session string");
            }
        };

        match serde_json::from_slice(&json_string) {
            Ok(v) => Ok(v),
            Err(_) => Err("Cannot deserialize session JSON"),
        }
    } else {
        Err("Failed to validate session signature")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_session() -> Session {
        Session::new(User {
            id: 1,
            username: "Jack".to_string(),
            email: "jack@jack.com".to_string(),
        })
    }

    #[test]
    fn test_session_round_trip() {
        let serialized = serialize_session(&get_session(), "foo");
        let result =
            deserialize_session(&serialized, "foo").expect("result");
        assert_eq!(result.user.id, 1);
        assert_eq!(result.user.username, "Jack");
    }

    #[test]
    fn test_tampered_session_is_rejected() {
        let serialized = serialize_session(&get_session(), "foo");
        // flip a character inside the payload half
        let mut tampered: Vec<char> = serialized.chars().collect();
        tampered[1] = if tampered[1] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        assert!(deserialize_session(&tampered, "foo").is_err());
    }

    #[test]
    fn test_session_signed_with_other_secret_is_rejected() {
        let serialized = serialize_session(&get_session(), "foo");
        assert!(deserialize_session(&serialized, "bar").is_err());
    }

    #[test]
    fn test_garbage_cookie_is_rejected() {
        assert!(deserialize_session("not a session", "foo").is_err());
        assert!(deserialize_session("a:b:c", "foo").is_err());
        assert!(deserialize_session("", "foo").is_err());
    }
}
