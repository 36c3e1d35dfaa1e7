//! Deterministic short message identifiers.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Separates message and context in the digest input, so distinct
/// (message, context) pairs can never collide by concatenation.
const UNIT_SEPARATOR: char = '\u{001F}';

const ID_LENGTH: usize = 6;

/// Derive the short identifier for a message.
///
/// The id is the first six characters of the base64 SHA-256 digest of the
/// UTF-8 message bytes, with the context (when present) mixed in after a unit
/// separator. Identical inputs always produce identical ids; any change to
/// the context changes the id even when the message is unchanged. This is a
/// fingerprint, not a security boundary.
///
/// Call sites that supply an explicit id bypass this generator entirely.
pub fn generate_message_id(message: &str, context: Option<&str>) -> String {
    let input = format!(
        "{message}{UNIT_SEPARATOR}{context}",
        context = context.unwrap_or("")
    );
    let digest = Sha256::digest(input.as_bytes());
    let mut encoded = STANDARD.encode(digest);
    encoded.truncate(ID_LENGTH);
    encoded
}
