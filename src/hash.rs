//! BLAKE3 digests for package integrity

use blake3::Hasher;

use crate::package::PackageEntry;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Digest of a package's membership: entry names and contents, in order.
///
/// Two packages with equal digests have byte-identical members, regardless
/// of compression metadata.
pub fn package_digest(entries: &[PackageEntry]) -> String {
    let mut hasher = Hasher::new();
    for entry in entries {
        hasher.update(entry.name.as_bytes());
        hasher.update(b"\0"); // null separator
        hasher.update(&(entry.contents.len() as u64).to_le_bytes());
        hasher.update(&entry.contents);
    }
    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}

/// Digest of a single asset, served as its entity tag
pub fn content_digest(bytes: &[u8]) -> String {
    format!("{}{}", HASH_PREFIX, blake3::hash(bytes).to_hex())
}
