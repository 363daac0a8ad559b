use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};

/// First eight bytes of every PNG file.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Classification of what sits at a tile's target path.
///
/// Presence alone decides whether a tile is fetched again (it is not); the
/// valid/unverified split only records whether the existing file carries a
/// PNG signature. Nothing is ever re-downloaded over an existing file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheStatus {
    /// No file at the target path.
    Absent,
    /// A file that starts with the PNG signature.
    PresentValid,
    /// A file that exists but could not be read or does not look like a
    /// PNG (empty, truncated below eight bytes, foreign content).
    PresentUnverified,
}

/// Checks the tile file at `path` without touching its contents beyond the
/// signature bytes.
pub fn check(path: &Path) -> CacheStatus {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return CacheStatus::Absent,
        Err(_) => return CacheStatus::PresentUnverified,
    };

    let mut signature = [0u8; 8];
    match file.read_exact(&mut signature) {
        Ok(()) if signature == PNG_SIGNATURE => CacheStatus::PresentValid,
        _ => CacheStatus::PresentUnverified,
    }
}
