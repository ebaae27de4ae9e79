use crate::schema::db;

/// A declared field of an entity type.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// The field name
    pub name: String,

    /// Scalar, to-one relation, or to-many relation
    pub ty: FieldTy,

    /// True if the field is an identifier on its entity
    pub primary_key: bool,

    /// True if the flattened column may hold NULL
    pub nullable: bool,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldTy {
    Primitive(Primitive),
    BelongsTo(BelongsTo),
    HasMany(HasMany),
}

/// A scalar field that flattens into exactly one column.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Primitive {
    /// Storage type of the flattened column
    pub ty: db::Type,
}

/// A to-one association with another entity type.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BelongsTo {
    /// Target entity type
    pub target: String,
}

/// A to-many association with another entity type.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HasMany {
    /// Target entity type
    pub target: String,
}

impl Field {
    /// A scalar field of the given storage type.
    pub fn primitive(name: impl Into<String>, ty: db::Type) -> Self {
        Self {
            name: name.into(),
            ty: FieldTy::Primitive(Primitive { ty }),
            primary_key: false,
            nullable: false,
        }
    }

    /// A to-one association with `target`.
    pub fn belongs_to(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldTy::BelongsTo(BelongsTo {
                target: target.into(),
            }),
            primary_key: false,
            nullable: false,
        }
    }

    /// A to-many association with `target`.
    pub fn has_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldTy::HasMany(HasMany {
                target: target.into(),
            }),
            primary_key: false,
            nullable: false,
        }
    }

    /// Mark the field as an identifier.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the flattened column as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::BelongsTo(..) | Self::HasMany(..))
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self, Self::HasMany(..))
    }

    /// If the field is an association, the target entity type.
    pub fn relation_target(&self) -> Option<&str> {
        match self {
            Self::BelongsTo(belongs_to) => Some(&belongs_to.target),
            Self::HasMany(has_many) => Some(&has_many.target),
            Self::Primitive(..) => None,
        }
    }
}
