//! Wire mapping layer.
//!
//! Every model is declared once through [`wire_model!`], which generates the
//! struct, its public field mapping table, and the decode/encode pair. Field
//! decoding goes through [`WireField`], so the required/optional split and
//! the numeric and timestamp rules live here instead of in each model.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DecodeError, DecodeErrorKind, ModelError};
use crate::time;

/// Generic string-keyed JSON object, the decode input and encode output
pub type JsonMap = Map<String, Value>;

/// Shape of a wire field as listed in a mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    Timestamp,
    Date,
    Object,
    List,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "number",
            FieldKind::Text => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp string",
            FieldKind::Date => "date string",
            FieldKind::Object => "object",
            FieldKind::List => "array",
        }
    }
}

/// One row of a model's wire mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// snake_case key on the wire
    pub wire: &'static str,
    /// Rust field name on the record
    pub member: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Short description of a JSON value's shape, used in mismatch errors
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(entity: &'static str, path: &str, expected: FieldKind, found: &Value) -> DecodeError {
    DecodeError::new(
        entity,
        path,
        DecodeErrorKind::TypeMismatch {
            expected: expected.as_str(),
            found: value_kind(found),
        },
    )
}

/// A value type that can appear as a field of a wire model
pub trait WireField: Sized {
    const KIND: FieldKind;
    const REQUIRED: bool = true;

    /// Decode a present, non-null wire value
    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError>;

    fn to_wire(&self) -> Value;

    /// Value to use when the key is absent or null; `None` means required
    fn when_absent() -> Option<Self> {
        None
    }
}

impl WireField for i64 {
    const KIND: FieldKind = FieldKind::Integer;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        let Value::Number(n) = value else {
            return Err(mismatch(entity, path, Self::KIND, value));
        };
        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
        // Integral floats such as 3.0 normalize; fractions and u64 overflow do not
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Ok(f as i64)
            }
            _ => Err(mismatch(entity, path, Self::KIND, value)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireField for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        value
            .as_f64()
            .ok_or_else(|| mismatch(entity, path, Self::KIND, value))
    }

    fn to_wire(&self) -> Value {
        // Non-finite floats have no JSON form and encode as null
        Value::from(*self)
    }
}

impl WireField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(entity, path, Self::KIND, value))
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl WireField for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| mismatch(entity, path, Self::KIND, value))
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl WireField for DateTime<FixedOffset> {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        let raw = value
            .as_str()
            .ok_or_else(|| mismatch(entity, path, Self::KIND, value))?;
        time::parse_timestamp(raw).ok_or_else(|| {
            DecodeError::new(
                entity,
                path,
                DecodeErrorKind::UnparsableTimestamp {
                    value: raw.to_string(),
                },
            )
        })
    }

    fn to_wire(&self) -> Value {
        Value::String(time::format_timestamp(self))
    }
}

impl WireField for NaiveDate {
    const KIND: FieldKind = FieldKind::Date;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        let raw = value
            .as_str()
            .ok_or_else(|| mismatch(entity, path, Self::KIND, value))?;
        time::parse_date(raw).ok_or_else(|| {
            DecodeError::new(
                entity,
                path,
                DecodeErrorKind::UnparsableTimestamp {
                    value: raw.to_string(),
                },
            )
        })
    }

    fn to_wire(&self) -> Value {
        Value::String(time::format_date(self))
    }
}

impl<T: WireField> WireField for Option<T> {
    const KIND: FieldKind = T::KIND;
    const REQUIRED: bool = false;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            present => T::from_wire(present, entity, path).map(Some),
        }
    }

    fn to_wire(&self) -> Value {
        match self {
            Some(inner) => inner.to_wire(),
            None => Value::Null,
        }
    }

    fn when_absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: WireField> WireField for Vec<T> {
    const KIND: FieldKind = FieldKind::List;

    fn from_wire(value: &Value, entity: &'static str, path: &str) -> Result<Self, DecodeError> {
        let Value::Array(items) = value else {
            return Err(mismatch(entity, path, Self::KIND, value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_wire(item, entity, &format!("{}[{}]", path, i)))
            .collect()
    }

    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(WireField::to_wire).collect())
    }
}

/// Typed accessor over one wire object
pub struct WireReader<'a> {
    entity: &'static str,
    map: &'a JsonMap,
}

impl<'a> WireReader<'a> {
    pub fn new(entity: &'static str, map: &'a JsonMap) -> Self {
        Self { entity, map }
    }

    /// Read one field; absent and explicit null are treated the same
    pub fn field<T: WireField>(&self, wire: &str) -> Result<T, DecodeError> {
        let result = match self.map.get(wire) {
            None | Some(Value::Null) => {
                T::when_absent().ok_or_else(|| DecodeError::missing(self.entity, wire))
            }
            Some(value) => T::from_wire(value, self.entity, wire),
        };

        if let Err(e) = &result {
            debug!(
                entity = self.entity,
                field = %e.field,
                code = e.kind.code(),
                "Wire field rejected"
            );
        }
        result
    }
}

/// Decode an embedded record, prefixing nested failures with the outer path
pub fn decode_nested<T: WireModel>(
    value: &Value,
    entity: &'static str,
    path: &str,
) -> Result<T, DecodeError> {
    let Value::Object(map) = value else {
        return Err(mismatch(entity, path, FieldKind::Object, value));
    };
    T::decode(map).map_err(|e| DecodeError::new(entity, format!("{}.{}", path, e.field), e.kind))
}

/// A record with a fixed wire mapping table
pub trait WireModel: Sized {
    /// Entity name used in errors
    const ENTITY: &'static str;

    /// Public mapping table, in declaration order
    const FIELDS: &'static [FieldMapping];

    fn decode(map: &JsonMap) -> Result<Self, DecodeError>;

    /// Encode every mapped field, `None` as explicit null.
    ///
    /// JSON has no NaN or infinity, so a non-finite `f64` encodes as null.
    /// Decoding that map back fails with `MissingField` for a required
    /// number and yields `None` for an optional one.
    fn encode(&self) -> JsonMap;

    fn from_value(value: &Value) -> Result<Self, ModelError> {
        match value {
            Value::Object(map) => Ok(Self::decode(map)?),
            other => Err(ModelError::NotAnObject {
                entity: Self::ENTITY,
                found: value_kind(other),
            }),
        }
    }

    fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    fn to_value(&self) -> Value {
        Value::Object(self.encode())
    }

    fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    /// Wire key for a Rust field name
    fn wire_name(member: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|f| f.member == member)
            .map(|f| f.wire)
    }

    /// Rust field name for a wire key
    fn member_name(wire: &str) -> Option<&'static str> {
        Self::FIELDS.iter().find(|f| f.wire == wire).map(|f| f.member)
    }
}

/// Decode a bare JSON array of records
pub fn decode_list<T: WireModel>(value: &Value) -> Result<Vec<T>, ModelError> {
    let Value::Array(items) = value else {
        return Err(ModelError::NotAnArray {
            entity: T::ENTITY,
            found: value_kind(value),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            T::from_value(item).map_err(|e| match e {
                ModelError::Decode(inner) => ModelError::Decode(DecodeError::new(
                    inner.entity,
                    format!("[{}].{}", i, inner.field),
                    inner.kind,
                )),
                other => other,
            })
        })
        .collect()
}

/// Declare a wire model.
///
/// Generates the struct, its [`WireModel`] impl with the mapping table, a
/// [`WireField`] impl so it can be embedded in other models, and serde impls
/// that go through the same decode/encode pair.
macro_rules! wire_model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $crate::wire::WireModel for $name {
            const ENTITY: &'static str = stringify!($name);

            const FIELDS: &'static [$crate::wire::FieldMapping] = &[
                $(
                    $crate::wire::FieldMapping {
                        wire: $wire,
                        member: stringify!($field),
                        kind: <$ty as $crate::wire::WireField>::KIND,
                        required: <$ty as $crate::wire::WireField>::REQUIRED,
                    },
                )*
            ];

            fn decode(
                map: &$crate::wire::JsonMap,
            ) -> ::std::result::Result<Self, $crate::error::DecodeError> {
                let reader = $crate::wire::WireReader::new(
                    <Self as $crate::wire::WireModel>::ENTITY,
                    map,
                );
                Ok(Self {
                    $( $field: reader.field::<$ty>($wire)?, )*
                })
            }

            fn encode(&self) -> $crate::wire::JsonMap {
                let mut map = $crate::wire::JsonMap::new();
                $(
                    map.insert(
                        $wire.to_string(),
                        $crate::wire::WireField::to_wire(&self.$field),
                    );
                )*
                map
            }
        }

        impl $crate::wire::WireField for $name {
            const KIND: $crate::wire::FieldKind = $crate::wire::FieldKind::Object;

            fn from_wire(
                value: &::serde_json::Value,
                entity: &'static str,
                path: &str,
            ) -> ::std::result::Result<Self, $crate::error::DecodeError> {
                $crate::wire::decode_nested::<Self>(value, entity, path)
            }

            fn to_wire(&self) -> ::serde_json::Value {
                $crate::wire::WireModel::to_value(self)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ::serde::Serialize::serialize(
                    &$crate::wire::WireModel::encode(self),
                    serializer,
                )
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let map =
                    <$crate::wire::JsonMap as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::wire::WireModel>::decode(&map)
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use wire_model;
