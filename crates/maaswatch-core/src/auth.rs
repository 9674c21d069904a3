use crate::error::{Result, WatchError};

/// MAAS API credentials, parsed from the `consumer_key:token:secret` string
/// that `maas apikey` prints.
#[derive(Debug, Clone)]
pub struct Credentials {
    consumer_key: String,
    token: String,
    secret: String,
}

impl Credentials {
    /// Parse a colon-delimited three-part API key.
    ///
    /// Anything other than exactly three parts is rejected before any
    /// request is attempted.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            [consumer_key, token, secret] => Ok(Self {
                consumer_key: (*consumer_key).to_string(),
                token: (*token).to_string(),
                secret: (*secret).to_string(),
            }),
            _ => Err(WatchError::InvalidApiKey(format!(
                "expected 3 colon-separated parts, got {}",
                parts.len()
            ))),
        }
    }

    /// Build the OAuth 1.0 PLAINTEXT `Authorization` header value.
    ///
    /// MAAS accepts PLAINTEXT signatures, so the signature is the literal
    /// `&secret` with no cryptographic work. A fresh UUIDv4 nonce and the
    /// current unix timestamp are generated on every call.
    pub fn authorization_header(&self) -> String {
        let nonce = uuid::Uuid::new_v4();
        let timestamp = chrono::Utc::now().timestamp();
        format!(
            "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
             oauth_consumer_key=\"{}\", oauth_token=\"{}\", oauth_signature=\"&{}\", \
             oauth_nonce=\"{}\", oauth_timestamp=\"{}\"",
            self.consumer_key, self.token, self.secret, nonce, timestamp
        )
    }
}
