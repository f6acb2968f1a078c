use thiserror::Error;

use crate::model::ScalarType;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Layout validation never produces an [`Error`]: every problem with an entity or member
/// declaration is reported as a [`crate::diagnostics::Diagnostic`] instead. This enum only covers
/// the codec boundary, where caller-supplied byte views and values meet the fixed-width encodings.
///
/// # Error Categories
///
/// ## View Errors
/// - [`Error::ViewLength`] - A byte view does not have the exact width of the codec
/// - [`Error::ArrayLength`] - An array encode was given the wrong number of elements
///
/// ## Value Errors
/// - [`Error::ValueType`] - A [`crate::codec::Scalar`] of the wrong type was passed to a codec
/// - [`Error::StringTooLong`] - Text does not fit into a fixed-length string slot
/// - [`Error::InvalidUtf8`] - A fixed-length string slot does not hold valid UTF-8
///
/// # Examples
///
/// ```rust
/// use memlayout::{codec::LayoutIO, model::ByteOrder, Error};
///
/// let view = [0u8; 3];
/// match u32::read(&view, ByteOrder::Little) {
///     Err(Error::ViewLength { expected, actual }) => {
///         assert_eq!((expected, actual), (4, 3));
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The byte view handed to a codec does not have the codec's fixed width.
    ///
    /// Codecs read and write exactly `expected` bytes and never look outside the view, so a
    /// view of any other length is rejected before a single byte is touched.
    #[error("Byte view has length {actual}, codec requires exactly {expected} bytes")]
    ViewLength {
        /// Width required by the codec
        expected: usize,
        /// Length of the view that was supplied
        actual: usize,
    },

    /// An array encode received a different number of elements than the array capacity.
    #[error("Array codec expects {expected} elements, got {actual}")]
    ArrayLength {
        /// Declared array capacity
        expected: usize,
        /// Number of elements supplied
        actual: usize,
    },

    /// The value passed to a codec through the dynamic registry has the wrong type.
    #[error("Codec for {expected} cannot encode a {found} value")]
    ValueType {
        /// Type handled by the codec
        expected: ScalarType,
        /// Type of the supplied value
        found: ScalarType,
    },

    /// Encoded text is longer than the fixed-length string slot.
    #[error("String of {length} bytes does not fit into a {capacity}-byte slot")]
    StringTooLong {
        /// UTF-8 length of the text
        length: usize,
        /// Declared string length of the slot
        capacity: usize,
    },

    /// The bytes of a fixed-length string slot are not valid UTF-8.
    #[error("String slot does not contain valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// Number of leading bytes that formed valid UTF-8
        valid_up_to: usize,
    },
}
