use std::fmt;

/// BLAKE3 digest of a declaration dump, used to skip identical files.
///
/// The hash is domain-separated so it never collides with digests computed
/// for other purposes over the same bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    const DOMAIN: &'static [u8] = b"apidiff-unit-v1:";

    pub fn of(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(Self::DOMAIN);
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters, for logs.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.short())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_content_equal_digest() {
        assert_eq!(ContentDigest::of(b"[]"), ContentDigest::of(b"[]"));
        assert_ne!(ContentDigest::of(b"[]"), ContentDigest::of(b"[ ]"));
    }

    #[test]
    fn domain_separated_from_plain_blake3() {
        let data = b"{}";
        assert_ne!(ContentDigest::of(data).as_bytes(), blake3::hash(data).as_bytes());
    }

    #[test]
    fn hex_forms() {
        let digest = ContentDigest::of(b"x");
        assert_eq!(digest.to_hex().len(), 64);
        assert!(digest.to_hex().starts_with(&digest.short()));
        assert_eq!(digest.to_string(), digest.to_hex());
    }
}
