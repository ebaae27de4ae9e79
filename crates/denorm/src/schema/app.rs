mod field;
pub use field::{BelongsTo, Field, FieldTy, HasMany, Primitive};

mod model;
pub use model::Model;
