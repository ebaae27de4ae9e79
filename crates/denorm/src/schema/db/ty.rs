/// Storage types of flattened columns, as they appear in emitted DDL.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// An unsigned integer of `n` bytes
    UnsignedInteger(u8),

    /// A floating point number of `n` bytes
    Float(u8),

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// 128-bit universally unique identifier (UUID)
    Uuid,

    /// Decimal number with optional precision and scale.
    /// - `None`: arbitrary-precision decimal
    /// - `Some((precision, scale))`: fixed precision and scale
    Numeric(Option<(u32, u32)>),

    /// A representation of a civil date in the Gregorian calendar.
    Date,

    /// A representation of a civil datetime with fractional seconds
    /// precision (0-9 digits).
    DateTime(u8),

    /// An instant in time with fractional seconds precision (0-9 digits).
    Timestamp(u8),

    /// User-specified unrecognized type, carried through to DDL verbatim
    Custom(String),
}

impl Type {
    /// True for types that can designate the time-partition column.
    /// `Date` alone does not qualify.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Type::DateTime(_) | Type::Timestamp(_))
    }
}
