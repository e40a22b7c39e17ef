//! Content template
//!
//! Plaintext shape: `|Nri<zone>/<code>000]<timestamp>`. With a key the whole
//! filled template is encrypted before framing.

use crate::cipher::{encrypt_content, CipherKey};
use crate::constants::zone_for;

/// Content string ready for the envelope line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    text: String,
    encrypted: bool,
}

impl Content {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text is ciphertext; the envelope gains a `*` marker when it is
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }
}

/// Fill the plaintext template for `code` at `timestamp`
pub fn render_template(code: &str, timestamp: &str) -> String {
    format!("|Nri{}/{}000]{}", zone_for(code), code, timestamp)
}

/// Build the content for one message, encrypting it when a key is present
pub fn build_content(code: &str, timestamp: &str, key: Option<&CipherKey>) -> Content {
    let plaintext = render_template(code, timestamp);
    match key {
        Some(key) => Content {
            text: encrypt_content(key, &plaintext),
            encrypted: true,
        },
        None => Content {
            text: plaintext,
            encrypted: false,
        },
    }
}
