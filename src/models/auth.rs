use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(
        serialize_with = "crate::models::user::serialize_secret_string",
        deserialize_with = "crate::models::user::deserialize_secret_string"
    )]
    pub password: SecretString,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
