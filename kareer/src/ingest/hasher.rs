use sha2::{Digest, Sha256};

/// Deterministic content fingerprint: SHA-256 over the UTF-8 bytes,
/// lowercase hex. Used for upload dedup only, so it is unkeyed.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
