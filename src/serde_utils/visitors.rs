// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use core::marker::PhantomData;
use serde::de::{self, Unexpected, Visitor};
use std::fmt;
use std::str::FromStr;

/// Serialize with `Display` and deserialize with `FromStr`, so string enums
/// keep their wire spelling on both sides, e.g. `serde_str!(PlaybackMode);`
#[macro_export]
macro_rules! serde_str {
    ($id:ident) => {
        impl serde::Serialize for $id {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $id {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_str($crate::serde_utils::FromStrVisitor::<Self>::new(
                    stringify!($id),
                ))
            }
        }
    };
}

/// Deserializes a string with `FromStr`. Rejected strings are reported as
/// invalid values of the named type.
pub struct FromStrVisitor<T> {
    name: &'static str,
    _marker: PhantomData<T>,
}

impl<T> FromStrVisitor<T> {
    /// `name` is used in error messages, e.g. `PlaybackMode`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }
}

impl<'de, T: FromStr> Visitor<'de> for FromStrVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a {} string", self.name)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        T::from_str(value).map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}
