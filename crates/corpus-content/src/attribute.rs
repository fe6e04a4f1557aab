// Copyright (c) 2025-2026 Corpus Contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! AsciiDoc attribute values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A floating point attribute value with equality and hashing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Float(pub f64);

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// An AsciiDoc attribute value.
///
/// Attribute values (document attributes, `antora.yml`'s `asciidoc.attributes`
/// map) can be strings, booleans, numbers, lists, or nested maps. A hard-set
/// value (plain `name: value`) and a soft-set value (`name: value@`) both
/// deserialize to this type; softness is tracked separately by the classifier,
/// not encoded in the value itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String value.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(Float),
    /// List value.
    List(Vec<AttributeValue>),
    /// Map value.
    Map(BTreeMap<String, AttributeValue>),
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl PartialEq for Float {
    /// Compares two floating point numbers for equality.
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < f64::EPSILON
    }
}

impl Eq for Float {}

// ----------------------------------------------------------------------------

impl Hash for Float {
    /// Hashes the number.
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write(&self.0.to_ne_bytes());
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for AttributeValue {
    /// Formats the value the way it would be substituted into text, i.e. when
    /// resolving an `{attribute}` reference (§4.5 step 1).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(value) => write!(f, "{value}"),
            AttributeValue::Bool(value) => write!(f, "{value}"),
            AttributeValue::Integer(value) => write!(f, "{value}"),
            AttributeValue::Float(value) => write!(f, "{value}"),
            AttributeValue::List(values) => {
                let rendered: Vec<String> =
                    values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            AttributeValue::Map(values) => {
                let rendered: Vec<String> = values
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// A map of AsciiDoc attributes, either from `antora.yml`'s `asciidoc.attributes`
/// or from a parsed document's header.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
