//! Fixed-capacity arrays of scalars.

use std::slice::ChunksExact;

use crate::{
    codec::{Codec, Scalar},
    Error, Result,
};

/// Codec for an array of `capacity` scalars, built from the element codec.
///
/// Element `i` occupies bytes `[i * w, (i + 1) * w)` of the view, where `w` is the element
/// width.
///
/// # Examples
///
/// ```rust
/// use memlayout::{
///     codec::{ArrayCodec, CodecRegistry, Scalar},
///     model::{ByteOrder, ScalarType},
/// };
///
/// let codec = ArrayCodec::new(CodecRegistry::get(ScalarType::U16, ByteOrder::Big), 2);
/// let mut view = [0u8; 4];
/// codec.encode(&mut view, &[Scalar::U16(1), Scalar::U16(2)])?;
/// assert_eq!(view, [0, 1, 0, 2]);
///
/// let values: Vec<Scalar> = codec.decode_iter(&view)?.collect();
/// assert_eq!(values, [Scalar::U16(1), Scalar::U16(2)]);
/// # Ok::<(), memlayout::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArrayCodec {
    element: &'static Codec,
    capacity: usize,
}

impl ArrayCodec {
    /// Creates a codec for `capacity` elements of `element`.
    #[must_use]
    pub fn new(element: &'static Codec, capacity: usize) -> Self {
        Self { element, capacity }
    }

    /// The element codec.
    #[must_use]
    pub fn element(&self) -> &'static Codec {
        self.element
    }

    /// Number of elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total width in bytes.
    #[must_use]
    pub fn width(&self) -> usize {
        self.element.width() * self.capacity
    }

    /// Lazily decodes the elements of `view` in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] if `view` is not exactly [`ArrayCodec::width`] bytes long.
    pub fn decode_iter<'a>(&self, view: &'a [u8]) -> Result<ArrayIter<'a>> {
        self.check_view(view.len())?;

        Ok(ArrayIter {
            element: self.element,
            chunks: view.chunks_exact(self.element.width()),
        })
    }

    /// Decodes every element of `view` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] for a wrongly sized view and [`Error::ArrayLength`] if
    /// `out` does not hold exactly [`ArrayCodec::capacity`] elements.
    pub fn decode_into(&self, view: &[u8], out: &mut [Scalar]) -> Result<()> {
        self.check_count(out.len())?;

        for (slot, value) in out.iter_mut().zip(self.decode_iter(view)?) {
            *slot = value;
        }
        Ok(())
    }

    /// Encodes `values` into `view` in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ViewLength`] for a wrongly sized view, [`Error::ArrayLength`] for a
    /// wrong number of values, or [`Error::ValueType`] if any value is not of the element type.
    /// All checks happen before the first byte is written.
    pub fn encode(&self, view: &mut [u8], values: &[Scalar]) -> Result<()> {
        self.check_view(view.len())?;
        self.check_count(values.len())?;

        let expected = self.element.scalar_type();
        if let Some(value) = values.iter().find(|value| value.scalar_type() != expected) {
            return Err(Error::ValueType {
                expected,
                found: value.scalar_type(),
            });
        }

        for (chunk, value) in view.chunks_exact_mut(self.element.width()).zip(values) {
            self.element.encode(chunk, *value)?;
        }
        Ok(())
    }

    fn check_view(&self, actual: usize) -> Result<()> {
        if actual == self.width() {
            Ok(())
        } else {
            Err(Error::ViewLength {
                expected: self.width(),
                actual,
            })
        }
    }

    fn check_count(&self, actual: usize) -> Result<()> {
        if actual == self.capacity {
            Ok(())
        } else {
            Err(Error::ArrayLength {
                expected: self.capacity,
                actual,
            })
        }
    }
}

/// Iterator over the decoded elements of an array view.
///
/// Created by [`ArrayCodec::decode_iter`]; it does not allocate.
#[derive(Debug, Clone)]
pub struct ArrayIter<'a> {
    element: &'static Codec,
    chunks: ChunksExact<'a, u8>,
}

impl Iterator for ArrayIter<'_> {
    type Item = Scalar;

    fn next(&mut self) -> Option<Self::Item> {
        // every chunk has the element width, so decoding cannot fail
        self.chunks
            .next()
            .and_then(|chunk| self.element.decode(chunk).ok())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}
