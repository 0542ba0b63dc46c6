use std::sync::Arc;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::AppState;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            jwt_ttl_secs: 3600,
            port: 5000,
        }
    }

    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config()))
    }
}

pub struct TestUser {
    pub email: String,
    pub role: Option<String>,
}

impl TestUser {
    pub fn member(email: &str) -> Self {
        Self { email: email.to_string(), role: None }
    }

    pub fn admin(email: &str) -> Self {
        Self { email: email.to_string(), role: Some("admin".to_string()) }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(email: &str, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(1));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": email,
            "email": email,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(email: &str, secret: &str) -> String {
        Self::create_test_token(email, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(email: &str) -> String {
        Self::create_test_token(email, "wrong-secret", Some(1))
    }
}

/// Row payloads shaped like the store's tables.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn user_record(user: &TestUser) -> Value {
        json!({
            "id": "6f1c2a44-9a3e-4d0e-9a55-7d8a0b0c1e01",
            "name": "Test User",
            "email": user.email,
            "role": user.role
        })
    }

    pub fn role_row(user: &TestUser) -> Value {
        json!({ "role": user.role })
    }

    pub fn appointment_option(name: &str, slots: &[&str]) -> Value {
        json!({
            "id": "0b7e4a1c-5d43-4c8f-8f7a-2f1c9d6e3a10",
            "name": name,
            "price": 120.0,
            "slots": slots
        })
    }

    pub fn booking_row(email: &str, treatment: &str, date: &str, slot: &str) -> Value {
        json!({
            "id": "3c9d2b18-7e6f-4a5b-8c1d-0e2f3a4b5c6d",
            "email": email,
            "treatment": treatment,
            "appointment_date": date,
            "slot": slot,
            "patient": "Test Patient",
            "phone": null,
            "price": null,
            "details": {}
        })
    }

    pub fn doctor_row(name: &str, email: &str, specialty: &str) -> Value {
        json!({
            "id": "9a8b7c6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d",
            "name": name,
            "email": email,
            "specialty": specialty,
            "image": null
        })
    }
}
