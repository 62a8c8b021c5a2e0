use serde::Deserialize;

/// Omitted fields stay unchanged.
#[derive(Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// New plaintext password, hashed before storage
    #[serde(default)]
    pub password: Option<String>,
}
