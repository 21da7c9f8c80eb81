use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::DoctorId;

/// Claims carried by the bearer token issued at signup/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Doctor id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(
    doctor_id: DoctorId,
    email: &str,
    secret: &str,
    ttl_days: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: doctor_id.as_uuid().to_string(),
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(ttl_days)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}
