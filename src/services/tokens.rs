use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

// Token payload: just the user id, no expiry. Tokens stay valid until the
// signing secret changes.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            id: user_id.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    // Returns the user id carried by a valid token, None otherwise.
    pub fn verify(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no exp claim
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.id)
            .ok()
    }
}
