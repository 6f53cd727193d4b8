//! Best-effort read of the session token's `role` claim.
//!
//! The payload segment is decoded without verifying the signature; the
//! result steers menu visibility only. Authorization stays with the
//! backend, which re-checks the token on every request.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use shared::domain::StaffRole;

#[derive(Debug, Deserialize)]
struct TokenClaims {
    role: StaffRole,
}

/// Returns `None` for anything that is not a well-formed compact JWS with a
/// recognizable `role` claim; callers fall back to the default menu.
pub fn decode_role_claim(token: &str) -> Option<StaffRole> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim()).ok()?;
    serde_json::from_slice::<TokenClaims>(&bytes)
        .ok()
        .map(|claims| claims.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.unverified-signature")
    }

    #[test]
    fn reads_role_claim_from_payload_segment() {
        let token = token_with_payload(r#"{"sub":"u1","role":"designer","iat":1700000000}"#);
        assert_eq!(decode_role_claim(&token), Some(StaffRole::Designer));
    }

    #[test]
    fn reads_all_known_roles() {
        for (claim, role) in [
            ("user", StaffRole::User),
            ("designer", StaffRole::Designer),
            ("printer", StaffRole::Printer),
            ("shipping", StaffRole::Shipping),
        ] {
            let token = token_with_payload(&format!(r#"{{"role":"{claim}"}}"#));
            assert_eq!(decode_role_claim(&token), Some(role));
        }
    }

    #[test]
    fn malformed_tokens_yield_none() {
        assert_eq!(decode_role_claim(""), None);
        assert_eq!(decode_role_claim("not-a-jwt"), None);
        assert_eq!(decode_role_claim("a.!!!.c"), None);
        let token = token_with_payload("this is not json");
        assert_eq!(decode_role_claim(&token), None);
    }

    #[test]
    fn unknown_role_values_yield_none() {
        let token = token_with_payload(r#"{"role":"superuser"}"#);
        assert_eq!(decode_role_claim(&token), None);
    }

    #[test]
    fn missing_role_claim_yields_none() {
        let token = token_with_payload(r#"{"sub":"u1"}"#);
        assert_eq!(decode_role_claim(&token), None);
    }
}
