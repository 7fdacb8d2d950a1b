//! AES-256-GCM string encryption
//!
//! 输出格式: `base64(密文)$@base64(nonce)$@base64(认证标签)`

use crate::error::AppError;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose, Engine as _};

/// 各段之间的分隔符
pub const SEGMENT_SEPARATOR: &str = "$@";

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// 基于固定 32 字节密钥的对称加密器
pub struct SecretCipher {
    cipher: Aes256Gcm,
}

impl SecretCipher {
    /// 密钥必须正好 32 字节
    pub fn new(secret: &str) -> Result<Self, AppError> {
        let cipher = Aes256Gcm::new_from_slice(secret.as_bytes())
            .map_err(|_| AppError::Crypto("encryption key must be exactly 32 bytes".to_string()))?;
        Ok(Self { cipher })
    }

    /// 加密，每次使用新的随机 nonce
    pub fn encrypt(&self, plaintext: &str) -> Result<String, AppError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| AppError::Crypto("encryption failed".to_string()))?;

        // aes-gcm 输出为 密文 || 标签
        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        Ok([
            general_purpose::STANDARD.encode(ciphertext),
            general_purpose::STANDARD.encode(nonce),
            general_purpose::STANDARD.encode(tag),
        ]
        .join(SEGMENT_SEPARATOR))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String, AppError> {
        let segments: Vec<&str> = encoded.split(SEGMENT_SEPARATOR).collect();
        let [ciphertext, nonce, tag] = segments[..] else {
            return Err(AppError::Crypto("malformed ciphertext".to_string()));
        };

        let decode = |segment: &str| {
            general_purpose::STANDARD
                .decode(segment)
                .map_err(|_| AppError::Crypto("malformed ciphertext".to_string()))
        };

        let mut sealed = decode(ciphertext)?;
        let nonce = decode(nonce)?;
        let tag = decode(tag)?;

        if nonce.len() != NONCE_LEN || tag.len() != TAG_LEN {
            return Err(AppError::Crypto("malformed ciphertext".to_string()));
        }
        sealed.extend_from_slice(&tag);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&nonce), sealed.as_slice())
            .map_err(|_| AppError::Crypto("decryption failed".to_string()))?;

        String::from_utf8(plaintext).map_err(|_| AppError::Crypto("plaintext is not utf-8".to_string()))
    }
}
