use md5::{Digest, Md5};

/// Length of an MD5 digest rendered as hex.
pub const MD5_HEX_LEN: usize = 32;

/// Lowercase hex lookup table, matching the case the dictionary keys are stored in.
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Convert a 16-byte digest to 32 lowercase hex chars (stack allocated)
#[inline]
pub fn digest_to_hex(digest: &[u8; 16]) -> [u8; MD5_HEX_LEN] {
    let mut out = [0u8; MD5_HEX_LEN];
    for (i, byte) in digest.iter().enumerate() {
        out[i * 2] = HEX[(byte >> 4) as usize];
        out[i * 2 + 1] = HEX[(byte & 0x0f) as usize];
    }
    out
}

/// MD5 of `password` as lowercase hex
#[inline]
pub fn md5_hex(password: &[u8]) -> [u8; MD5_HEX_LEN] {
    let digest: [u8; 16] = Md5::digest(password).into();
    digest_to_hex(&digest)
}

/// Convert one wordlist line to a `(hash, password)` pair.
///
/// Trailing `\n` / `\r\n` is stripped. Empty lines and lines that are not valid
/// UTF-8 yield `None`.
#[inline]
pub fn line_to_entry(line: &[u8]) -> Option<(String, String)> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return None;
    }

    let password = std::str::from_utf8(line).ok()?;
    let hash = md5_hex(line).iter().map(|&b| b as char).collect();
    Some((hash, password.to_owned()))
}
