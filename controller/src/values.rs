// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Type {
    String,
    Int16,
    Int32,
    /// Non-negative amount, used for top-n limits
    Count,
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::String => "text",
            Type::Int16 | Type::Int32 => "integer",
            Type::Count => "non-negative integer",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Field<'a> {
    Required(&'a str, Type),
    Optional(&'a str, Type),
}

impl<'a> Field<'a> {
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(..))
    }

    pub fn into_tuple(self) -> (&'a str, Type) {
        match self {
            Self::Required(name, ty) | Self::Optional(name, ty) => (name, ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int16(i16),
    Int32(i32),
    Count(u32),
}

/// Values collected from the operator, keyed by field name
pub type Prototype<'a> = HashMap<&'a str, Value>;

fn parse_as<T: FromStr>(value: &str) -> Result<T, ErrorKind>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ErrorKind::ValueConvert(e.to_string()))
}

impl Value {
    pub fn from_str(value: &str, tp: Type) -> Result<Self, ErrorKind> {
        let value = match tp {
            Type::String => Self::String(value.to_owned()),
            Type::Int16 => Self::Int16(parse_as(value)?),
            Type::Int32 => Self::Int32(parse_as(value)?),
            Type::Count => Self::Count(parse_as(value)?),
        };

        Ok(value)
    }

    pub fn as_string(&self) -> Result<&str, ErrorKind> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(ErrorKind::CastingValue("String")),
        }
    }

    pub fn as_i16(&self) -> Result<i16, ErrorKind> {
        match self {
            Self::Int16(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("i16")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, ErrorKind> {
        match self {
            Self::Int32(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("i32")),
        }
    }

    pub fn as_count(&self) -> Result<u32, ErrorKind> {
        match self {
            Self::Count(v) => Ok(*v),
            _ => Err(ErrorKind::CastingValue("u32")),
        }
    }
}
