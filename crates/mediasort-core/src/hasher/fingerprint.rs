use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// BLAKE3 digest of a file's full contents.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Fingerprint([u8; blake3::OUT_LEN]);

impl Fingerprint {
    pub const fn from_bytes(bytes: [u8; blake3::OUT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; blake3::OUT_LEN] {
        &self.0
    }

    /// Lowercase hex, 64 characters.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Streams the whole file through BLAKE3. Never hashes a prefix only, two
/// files sharing a header must not collide.
pub fn fingerprint_file(path: &Path) -> io::Result<Fingerprint> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(Fingerprint(*hasher.finalize().as_bytes()))
}
