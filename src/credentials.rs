use base64::{engine::general_purpose::STANDARD, Engine};

/// Encoded login pair sent with every request as the `username` and
/// `password` headers.
///
/// The service expects the username upper-cased before encoding (logins are
/// case-insensitive, but the wire format is upper-case). Base64 here is
/// obfuscation, not security: treat the encoded values as equivalent in
/// sensitivity to the plaintext credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Encode a raw username/password pair into header values
    pub fn new(username: &str, password: &str) -> Self {
        Credentials {
            username: STANDARD.encode(username.to_uppercase()),
            password: STANDARD.encode(password),
        }
    }

    /// Encoded username header value
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Encoded password header value
    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_uppercased_before_encoding() {
        let creds = Credentials::new("ivanov", "secret");
        assert_eq!(creds.username(), STANDARD.encode("IVANOV"));
        assert_eq!(creds, Credentials::new("IvAnOv", "secret"));
    }

    #[test]
    fn test_password_encoded_as_is() {
        let creds = Credentials::new("user", "PaSsWoRd");
        assert_eq!(creds.password(), STANDARD.encode("PaSsWoRd"));
        assert_ne!(creds.password(), STANDARD.encode("password"));
    }

    #[test]
    fn test_encoding_is_reversible() {
        let creds = Credentials::new("user", "тайна");
        let decoded = STANDARD.decode(creds.password()).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "тайна");
    }
}
