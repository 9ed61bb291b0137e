/// Account credentials injected into every request envelope. Opaque to the
/// rest of the client beyond request construction.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: String,
    pub password: String,
    pub account_number: String,
    pub meter_number: String,
}

impl Credentials {
    pub fn new(
        key: impl Into<String>,
        password: impl Into<String>,
        account_number: impl Into<String>,
        meter_number: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            password: password.into(),
            account_number: account_number.into(),
            meter_number: meter_number.into(),
        }
    }
}
