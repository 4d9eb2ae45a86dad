//! Content digests used for rebuild avoidance.

pub use self::sha1::*;

use std::fmt;

mod sha1;

/// Length in bytes of a [`Hash`].
pub const HASH_LEN: usize = 20;

/// SHA-1 digest of a target's preprocessed input.
///
/// # Examples
///
/// A hash can be computed using [`Sha1`].
/// Displaying a hash produces a lower-case hexadecimal string.
///
/// ```
/// use otter_util::hash::Sha1;
/// let hash = Sha1::new().update(b"Hello, world!").finalize();
/// assert_eq!(hash.to_string(), "943a702d06f34599aee1f8da8ef9f7296031d699");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hash(pub [u8; HASH_LEN]);

impl fmt::Display for Hash
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl TryFrom<&[u8]> for Hash
{
    type Error = ();

    /// Succeeds only if `bytes` has exactly [`HASH_LEN`] bytes.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error>
    {
        <[u8; HASH_LEN]>::try_from(bytes).map(Self).map_err(|_| ())
    }
}
