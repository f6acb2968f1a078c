//! Fixed-length, zero-padded UTF-8 string slots.

use crate::{Error, Result};

/// Codec for a string slot of a declared byte length.
///
/// Text is stored as UTF-8 followed by zero bytes up to the slot length. Decoding stops at the
/// first zero byte, or at the end of the slot if there is none.
///
/// # Examples
///
/// ```rust
/// use memlayout::codec::StringCodec;
///
/// let codec = StringCodec::new(8);
/// let mut slot = [0xFFu8; 8];
/// codec.encode(&mut slot, "abc")?;
/// assert_eq!(slot, *b"abc\0\0\0\0\0");
/// assert_eq!(codec.decode(&slot)?, "abc");
/// # Ok::<(), memlayout::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringCodec {
    length: usize,
}

impl StringCodec {
    /// Creates a codec for slots of `length` bytes.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }

    /// Slot length in bytes.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.length
    }

    /// Decodes the text held in `view`, borrowing from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] if `view` is not exactly the slot length, or
    /// [`Error::InvalidUtf8`] if the bytes before the first zero are not valid UTF-8.
    pub fn decode<'a>(&self, view: &'a [u8]) -> Result<&'a str> {
        self.check_view(view.len())?;

        let end = view.iter().position(|&byte| byte == 0).unwrap_or(view.len());
        std::str::from_utf8(&view[..end]).map_err(|error| Error::InvalidUtf8 {
            valid_up_to: error.valid_up_to(),
        })
    }

    /// Writes `text` into `view` and zero-fills the rest of the slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] if `view` is not exactly the slot length, or
    /// [`Error::StringTooLong`] if the UTF-8 encoding of `text` exceeds it. The view is not
    /// modified on error.
    pub fn encode(&self, view: &mut [u8], text: &str) -> Result<()> {
        self.check_view(view.len())?;

        let bytes = text.as_bytes();
        if bytes.len() > self.length {
            return Err(Error::StringTooLong {
                length: bytes.len(),
                capacity: self.length,
            });
        }

        let (head, tail) = view.split_at_mut(bytes.len());
        head.copy_from_slice(bytes);
        tail.fill(0);
        Ok(())
    }

    fn check_view(&self, actual: usize) -> Result<()> {
        if actual == self.length {
            Ok(())
        } else {
            Err(Error::ViewLength {
                expected: self.length,
                actual,
            })
        }
    }
}
