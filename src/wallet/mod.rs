use rand::rngs::OsRng;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey, ecdsa::Signature};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::LazyLock;

/// Shared signing/verification context; building one per call is expensive.
static SECP: LazyLock<Secp256k1<All>> = LazyLock::new(Secp256k1::new);

/// How many identifier characters the directory snapshots show.
pub const SHORT_ID_LEN: usize = 20;

/// A participant's secp256k1 key pair.
///
/// The secret key never leaves this struct: it is not serialized and not
/// printed by `Debug`. The public identifier is the hex of the compressed
/// public key (33 bytes, 66 hex chars).
pub struct Identity {
    secret: SecretKey,
    public: PublicKey,
}

impl Identity {
    /// Generate a fresh key pair from the OS random source.
    pub fn generate() -> Self {
        let (secret, public) = SECP.generate_keypair(&mut OsRng);
        Self { secret, public }
    }

    /// Stable hex identifier derived from the public key.
    pub fn identifier(&self) -> String {
        hex::encode(self.public.serialize())
    }

    /// Display form: the first 20 identifier characters followed by "...".
    pub fn short_identifier(&self) -> String {
        let mut id = self.identifier();
        id.truncate(SHORT_ID_LEN);
        id.push_str("...");
        id
    }

    /// SHA-256 the content and sign the digest. Returns DER bytes.
    ///
    /// ECDSA nonces are derived per RFC6979, so equal content gives an equal
    /// signature.
    pub fn sign(&self, content: &[u8]) -> Vec<u8> {
        let msg = Message::from_digest(digest(content));
        SECP.sign_ecdsa(&msg, &self.secret)
            .serialize_der()
            .to_vec()
    }

    /// Check a DER signature over `content` against this identity's public key.
    pub fn verify(&self, content: &[u8], signature_der: &[u8]) -> bool {
        let Ok(sig) = Signature::from_der(signature_der) else {
            return false;
        };
        let msg = Message::from_digest(digest(content));
        SECP.verify_ecdsa(&msg, &sig, &self.public).is_ok()
    }

    /// Like `verify`, for a hex-encoded DER signature. Bad hex never verifies.
    pub fn verify_hex(&self, content: &[u8], signature_hex: &str) -> bool {
        hex::decode(signature_hex).is_ok_and(|der| self.verify(content, &der))
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Identity {}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("identifier", &self.identifier())
            .finish_non_exhaustive()
    }
}

fn digest(content: &[u8]) -> [u8; 32] {
    Sha256::digest(content).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_stable() {
        let id = Identity::generate();
        assert_eq!(id.identifier(), id.identifier());
        assert_eq!(id.identifier().len(), 66);
    }

    #[test]
    fn distinct_identities_have_distinct_identifiers() {
        let a = Identity::generate();
        let b = Identity::generate();
        assert_ne!(a.identifier(), b.identifier());
        assert_ne!(a, b);
    }

    #[test]
    fn short_identifier_truncates() {
        let id = Identity::generate();
        let short = id.short_identifier();
        assert_eq!(short.len(), SHORT_ID_LEN + 3);
        assert!(short.ends_with("..."));
        assert!(id.identifier().starts_with(&short[..SHORT_ID_LEN]));
    }

    #[test]
    fn signatures_verify_and_are_deterministic() {
        let id = Identity::generate();
        let sig = id.sign(b"hello");
        assert_eq!(sig, id.sign(b"hello"));
        assert!(id.verify(b"hello", &sig));
        assert!(!id.verify(b"hullo", &sig));

        let other = Identity::generate();
        assert!(!other.verify(b"hello", &sig));
    }

    #[test]
    fn verify_from_hex() {
        let id = Identity::generate();
        let sig_hex = hex::encode(id.sign(b"payload"));
        assert!(id.verify_hex(b"payload", &sig_hex));
        assert!(!id.verify_hex(b"other", &sig_hex));
        assert!(!id.verify_hex(b"payload", "zz"));
        assert!(!id.verify_hex(b"payload", &"00".repeat(70)));
    }

    #[test]
    fn debug_hides_secret() {
        let id = Identity::generate();
        let dbg = format!("{id:?}");
        assert!(dbg.contains(&id.identifier()));
        assert!(!dbg.contains(&hex::encode(id.secret.secret_bytes())));
    }
}
