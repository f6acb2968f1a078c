use std::str::FromStr;

use crate::model::{ByteOrder, Location, MemberType, ScalarType};

/// One field of an [`crate::model::Entity`].
///
/// A member is an immutable descriptor built by the discovery collaborator. All sizes are kept
/// as signed integers exactly as declared so that invalid declarations (zero, negative, not a
/// power of two) reach the validator unchanged and can be reported instead of rejected at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name, unique within its entity
    pub name: String,
    /// Raw type name as declared; resolved with [`Member::member_type`]
    pub type_name: String,
    /// Declared nullable. Nullable members are always rejected.
    pub is_nullable: bool,
    /// Fixed-capacity array of `type_name` elements
    pub is_array: bool,
    /// Byte order of multi-byte values
    pub byte_order: ByteOrder,
    /// Width of one value (one element for arrays) in bytes
    pub field_length: i32,
    /// Element count, only meaningful for arrays
    pub array_capacity: i32,
    /// Declared string length in bytes, only meaningful for strings
    pub string_length: i32,
    /// Author-declared offset, only meaningful under explicit layout
    pub declared_offset: Option<i32>,
    /// Declaration order; lower sequence wins contested bytes
    pub sequence: i32,
    /// Where the member was declared
    pub location: Location,
}

impl Member {
    /// Creates a member with the given raw type name and every size unset.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, sequence: i32) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_nullable: false,
            is_array: false,
            byte_order: ByteOrder::Little,
            field_length: 0,
            array_capacity: 0,
            string_length: 0,
            declared_offset: None,
            sequence,
            location: Location::none(),
        }
    }

    /// Creates a scalar member whose field length is the natural width of `scalar`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // widths are <= 16
    pub fn scalar(name: impl Into<String>, scalar: ScalarType, sequence: i32) -> Self {
        let mut member = Self::new(name, scalar.to_string(), sequence);
        member.field_length = scalar.width() as i32;
        member
    }

    /// Creates a fixed-length string member occupying `length` bytes.
    pub fn string(name: impl Into<String>, length: i32, sequence: i32) -> Self {
        let mut member = Self::new(name, "string", sequence);
        member.field_length = length;
        member.string_length = length;
        member
    }

    /// Creates a fixed-capacity array of `capacity` elements of `element`.
    pub fn array(
        name: impl Into<String>,
        element: ScalarType,
        capacity: i32,
        sequence: i32,
    ) -> Self {
        let mut member = Self::scalar(name, element, sequence);
        member.is_array = true;
        member.array_capacity = capacity;
        member
    }

    /// Sets the declared offset.
    #[must_use]
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.declared_offset = Some(offset);
        self
    }

    /// Overrides the field length.
    #[must_use]
    pub fn with_field_length(mut self, field_length: i32) -> Self {
        self.field_length = field_length;
        self
    }

    /// Sets the byte order.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Marks the member as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Resolves the declared type name, `None` if it is outside the supported set.
    #[must_use]
    pub fn member_type(&self) -> Option<MemberType> {
        MemberType::from_str(&self.type_name).ok()
    }

    /// Bytes occupied by the member: `field_length × array_capacity` for arrays.
    ///
    /// Computed in `i64` so absurd declarations cannot overflow.
    #[must_use]
    pub fn total_length(&self) -> i64 {
        if self.is_array {
            i64::from(self.field_length) * i64::from(self.array_capacity)
        } else {
            i64::from(self.field_length)
        }
    }
}
