use crate::error::DecodeError;
use crate::wire::{FieldKind, FieldMapping, JsonMap, WireField, WireModel, WireReader};

/// Paginated list envelope used by the list endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T: WireModel + WireField> WireModel for Page<T> {
    const ENTITY: &'static str = "Page";

    const FIELDS: &'static [FieldMapping] = &[
        FieldMapping {
            wire: "count",
            member: "count",
            kind: FieldKind::Integer,
            required: true,
        },
        FieldMapping {
            wire: "next",
            member: "next",
            kind: FieldKind::Text,
            required: false,
        },
        FieldMapping {
            wire: "previous",
            member: "previous",
            kind: FieldKind::Text,
            required: false,
        },
        FieldMapping {
            wire: "results",
            member: "results",
            kind: FieldKind::List,
            required: true,
        },
    ];

    fn decode(map: &JsonMap) -> Result<Self, DecodeError> {
        let reader = WireReader::new(Self::ENTITY, map);
        Ok(Self {
            count: reader.field("count")?,
            next: reader.field("next")?,
            previous: reader.field("previous")?,
            results: reader.field("results")?,
        })
    }

    fn encode(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("count".to_string(), self.count.to_wire());
        map.insert("next".to_string(), self.next.to_wire());
        map.insert("previous".to_string(), self.previous.to_wire());
        map.insert("results".to_string(), self.results.to_wire());
        map
    }
}

impl<T: WireModel + WireField> serde::Serialize for Page<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.encode(), serializer)
    }
}

impl<'de, T: WireModel + WireField> serde::Deserialize<'de> for Page<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = <JsonMap as serde::Deserialize>::deserialize(deserializer)?;
        Self::decode(&map).map_err(serde::de::Error::custom)
    }
}
