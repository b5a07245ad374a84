//! Serde support.
//!
//! A [`Rid`] serializes as an optional string: the nil ID becomes `none`
//! (`null` in JSON) and any other ID its 24-character text. Deserialization
//! accepts `null`/unit as the nil ID, strings via [`Rid::from_text`], and
//! bytes the way [`Rid::scan`] reads them.

use crate::{Rid, Value};
use core::fmt;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

impl Serialize for Rid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_nil() {
            s.serialize_none()
        } else {
            s.serialize_some(self.encode().as_str())
        }
    }
}

impl<'de> Deserialize<'de> for Rid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_option(RidVisitor)
    }
}

struct RidVisitor;

impl<'de> Visitor<'de> for RidVisitor {
    type Value = Rid;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 24 character base32 encoded rid or null")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rid::NIL)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Rid::NIL)
    }

    fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(self)
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Rid::from_text(v).map_err(de::Error::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Rid::scan(Value::Bytes(v)).map_err(de::Error::custom)
    }
}
