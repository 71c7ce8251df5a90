use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a resource finding.
///
/// Identity fields:
/// - direction (`create`, `delete`, `update`)
/// - code
/// - resource address
/// - attribute name (if present)
pub fn fingerprint_for_resource(
    direction: &str,
    code: &str,
    address: &str,
    attribute: Option<&str>,
) -> String {
    let mut parts = vec![direction, code, address];
    if let Some(a) = attribute {
        parts.push(a);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
