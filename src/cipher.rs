use aes::{
	cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit},
	Aes128,
};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde::Deserialize;

const KEY_BYTES: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("cipher {0} must be exactly {KEY_BYTES} bytes, got {1}")]
	InvalidLength(&'static str, usize),
}

pub trait Cipher: Sync {
	fn encrypt(&self, plaintext: &str) -> String;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	key: String,
	iv: String,
}

/// AES-128-CBC with PKCS#7 padding, emitted as base64.
#[derive(Clone)]
pub struct AesCipher {
	key: [u8; KEY_BYTES],
	iv: [u8; KEY_BYTES],
}

impl AesCipher {
	pub fn new(config: &Config) -> Result<Self, Error> {
		Ok(Self {
			key: key_bytes("key", &config.key)?,
			iv: key_bytes("iv", &config.iv)?,
		})
	}
}

fn key_bytes(name: &'static str, text: &str) -> Result<[u8; KEY_BYTES], Error> {
	text.as_bytes()
		.try_into()
		.map_err(|_| Error::InvalidLength(name, text.len()))
}

impl Cipher for AesCipher {
	fn encrypt(&self, plaintext: &str) -> String {
		let cipher = Aes128CbcEnc::new(&self.key.into(), &self.iv.into());
		let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
		BASE64_STANDARD.encode(ciphertext)
	}
}
