//! Tri-state field for merge-patch inputs.
//!
//! JSON request bodies distinguish a missing key from an explicit `null`.
//! Combined with `#[serde(default)]` on the containing struct, a missing key
//! becomes [`Field::Absent`], `null` becomes [`Field::Null`] and anything else
//! [`Field::Value`].

use sea_orm::ActiveValue;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool { matches!(self, Field::Absent) }

    /// Collapse `Absent` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Field<U>, E> {
        Ok(match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)?),
        })
    }

    /// `Absent` leaves the column untouched, `Null` clears it.
    pub fn into_active_value(self) -> ActiveValue<Option<T>>
    where
        Option<T>: Into<sea_orm::Value>,
    {
        match self {
            Field::Absent => ActiveValue::NotSet,
            Field::Null => ActiveValue::Set(None),
            Field::Value(v) => ActiveValue::Set(Some(v)),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Field::Value(v),
            None => Field::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}
