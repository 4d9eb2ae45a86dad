use {
    super::Hash,
    ::sha1::{Digest, Sha1 as Sha1Impl},
    std::io::{self, IoSlice, Write},
};

/// SHA-1 cryptographic hash function.
///
/// The [`Write`] impl calls [`update`] for each incoming buffer.
/// The methods on the [`Write`] impl never return an error.
///
/// [`update`]: `Self::update`
pub struct Sha1(Sha1Impl);

impl Sha1
{
    /// Create a new hasher.
    pub fn new() -> Self
    {
        Self(Sha1Impl::new())
    }

    /// Add data to the hasher.
    ///
    /// Returns `self` for convenience.
    pub fn update(&mut self, buf: &[u8]) -> &mut Self
    {
        Digest::update(&mut self.0, buf);
        self
    }

    /// Extract the hash from the hasher.
    ///
    /// Unlike [`Digest::finalize`], this does not consume the hasher,
    /// so it may be called to inspect an intermediate state.
    pub fn finalize(&self) -> Hash
    {
        let digest = self.0.clone().finalize();
        let mut hash = Hash([0; 20]);
        hash.0.copy_from_slice(&digest);
        hash
    }
}

impl Write for Sha1
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>
    {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()>
    {
        Ok(())
    }

    fn write_vectored(&mut self, bufs: &[IoSlice]) -> io::Result<usize>
    {
        let mut len = 0usize;
        for buf in bufs {
            if let Some(new_len) = len.checked_add(buf.len()) {
                len = new_len;
                self.update(buf);
            } else {
                break;
            }
        }
        Ok(len)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>
    {
        self.update(buf);
        Ok(())
    }
}
