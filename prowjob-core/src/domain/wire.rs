//! Serde helpers for fields whose wire form allows zero values

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Closed string enum where absent, `null` and `""` all mean "unset".
pub(crate) mod optional_enum {
    use serde::de::{self, IntoDeserializer};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => T::deserialize(value.into_deserializer())
                .map(Some)
                .map_err(|err: de::value::Error| de::Error::custom(err)),
        }
    }

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }
}

/// Timestamp where `0001-01-01T00:00:00Z` is the "not set" sentinel.
pub(crate) mod optional_time {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::effective_time;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(effective_time(value))
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }
}

pub(crate) fn is_zero_instant(time: &DateTime<Utc>) -> bool {
    time.year() == 1
        && time.ordinal() == 1
        && time.num_seconds_from_midnight() == 0
        && time.nanosecond() == 0
}

/// Treat the zero instant the same as an unset timestamp.
pub(crate) fn effective_time(time: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    time.filter(|time| !is_zero_instant(time))
}

pub(crate) fn is_unset_time(time: &Option<DateTime<Utc>>) -> bool {
    effective_time(*time).is_none()
}

pub(crate) fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// `null` leaves the zero value in place, like an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    use serde::Deserialize;

    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
