//! AES-128-CBC content encryption
//!
//! The receiver under test expects the DC-09 "accepted behavior": a fixed
//! all-zero IV and plaintext left-padded with ASCII `'0'`. The pad count is
//! `16 - len % 16`, so already-aligned content still gains a full block. Both
//! rules must stay exactly as they are for the receiver to decrypt frames.

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use std::fmt;

use crate::constants::{BLOCK_SIZE, KEY_LENGTH, PAD_CHAR};
use crate::error::{ProtocolError, ProtocolResult};

const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// 128-bit cipher key
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey([u8; KEY_LENGTH]);

impl CipherKey {
    /// Build a key from its text form, which must encode to exactly 16 bytes
    pub fn new(key: &str) -> ProtocolResult<Self> {
        Self::from_bytes(key.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> ProtocolResult<Self> {
        let key: [u8; KEY_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| ProtocolError::InvalidKeyLength {
                    expected: KEY_LENGTH,
                    got: bytes.len(),
                })?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

// Never print key material.
impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CipherKey(<redacted>)")
    }
}

/// Left-pad plaintext with `'0'` up to the next block boundary
pub fn pad_plaintext(plaintext: &str) -> Vec<u8> {
    let pad = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(pad + plaintext.len());
    padded.resize(pad, PAD_CHAR);
    padded.extend_from_slice(plaintext.as_bytes());
    padded
}

/// Encrypt content and return it as uppercase hex
pub fn encrypt_content(key: &CipherKey, plaintext: &str) -> String {
    // The '0' pad already fills the last block
    let padded = pad_plaintext(plaintext);
    let ciphertext = Aes128CbcEnc::new(key.as_bytes().into(), &ZERO_IV.into())
        .encrypt_padded_vec_mut::<NoPadding>(&padded);
    hex::encode_upper(ciphertext)
}

/// Decrypt hex ciphertext back to the padded plaintext
///
/// The pad is not self-describing; callers strip it using the content's own
/// delimiters or a known length.
pub fn decrypt_content(key: &CipherKey, ciphertext_hex: &str) -> ProtocolResult<String> {
    let ciphertext = hex::decode(ciphertext_hex)
        .map_err(|e| ProtocolError::ciphertext(format!("not hex: {e}")))?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(ProtocolError::ciphertext(format!(
            "{} bytes is not a whole number of blocks",
            ciphertext.len()
        )));
    }

    let plaintext = Aes128CbcDec::new(key.as_bytes().into(), &ZERO_IV.into())
        .decrypt_padded_vec_mut::<NoPadding>(&ciphertext)
        .map_err(|e| ProtocolError::ciphertext(format!("unpad failed: {e}")))?;

    String::from_utf8(plaintext).map_err(|e| ProtocolError::ciphertext(format!("not UTF-8: {e}")))
}
