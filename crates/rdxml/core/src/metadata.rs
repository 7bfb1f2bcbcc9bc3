// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Custom attribute arguments and their display form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of a custom attribute argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArgumentType {
    Boolean,
    Char,
    Int32,
    Int64,
    Double,
    String,
    Type,
    Object,
    /// An enum, by full name
    Enum(String),
    Array(Box<ArgumentType>),
}

impl ArgumentType {
    /// Full name, e.g. `System.Int32` or `App.Color`
    pub fn full_name(&self) -> String {
        match self {
            Self::Enum(name) => name.clone(),
            Self::Array(element) => format!("{}[]", element.full_name()),
            other => format!("System.{}", other.name()),
        }
    }

    /// Name without namespace, e.g. `Int32` or `Color`
    pub fn name(&self) -> String {
        match self {
            Self::Boolean => "Boolean".to_string(),
            Self::Char => "Char".to_string(),
            Self::Int32 => "Int32".to_string(),
            Self::Int64 => "Int64".to_string(),
            Self::Double => "Double".to_string(),
            Self::String => "String".to_string(),
            Self::Type => "Type".to_string(),
            Self::Object => "Object".to_string(),
            Self::Enum(name) => name.rsplit(['.', '+']).next().unwrap_or(name).to_string(),
            Self::Array(element) => format!("{}[]", element.name()),
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "bool"),
            Self::Char => write!(f, "char"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Double => write!(f, "double"),
            Self::String => write!(f, "string"),
            Self::Type => write!(f, "type"),
            Self::Object => write!(f, "object"),
            Self::Enum(name) => write!(f, "enum:{}", name),
            Self::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl FromStr for ArgumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(element) = s.strip_suffix("[]") {
            return Ok(Self::Array(Box::new(element.parse()?)));
        }
        if let Some(name) = s.strip_prefix("enum:") {
            if name.is_empty() {
                return Err("enum argument type needs a name".to_string());
            }
            return Ok(Self::Enum(name.to_string()));
        }
        match s {
            "bool" => Ok(Self::Boolean),
            "char" => Ok(Self::Char),
            "int32" => Ok(Self::Int32),
            "int64" => Ok(Self::Int64),
            "double" => Ok(Self::Double),
            "string" => Ok(Self::String),
            "type" => Ok(Self::Type),
            "object" => Ok(Self::Object),
            other => Err(format!("unknown argument type '{}'", other)),
        }
    }
}

impl TryFrom<String> for ArgumentType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArgumentType> for String {
    fn from(value: ArgumentType) -> Self {
        value.to_string()
    }
}

/// Value of a custom attribute argument. Enum values are stored as their
/// underlying integer; char and type values are stored as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Array(Vec<TypedArgument>),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(true) => write!(f, "True"),
            Self::Boolean(false) => write!(f, "False"),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
            Self::Array(values) => write!(f, "{} element(s)", values.len()),
        }
    }
}

/// One positional argument of a custom attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedArgument {
    #[serde(rename = "type")]
    pub argument_type: ArgumentType,
    #[serde(default)]
    pub value: Option<ArgumentValue>,
}

impl TypedArgument {
    pub fn new(argument_type: ArgumentType, value: Option<ArgumentValue>) -> Self {
        Self { argument_type, value }
    }

    /// Render the argument.
    ///
    /// `typed` means the surrounding context already states the type, so no
    /// `(Type)` prefix is added to values that would otherwise carry one.
    pub fn render(&self, typed: bool) -> String {
        let argument_type = &self.argument_type;

        if argument_type.is_enum() {
            let value = self.value.as_ref().map(ToString::to_string).unwrap_or_default();
            return if typed { value } else { format!("({}){}", argument_type.full_name(), value) };
        }

        let Some(value) = &self.value else {
            return if typed { "null".to_string() } else { format!("({})null", argument_type.name()) };
        };

        match (argument_type, value) {
            (ArgumentType::String, _) => format!("\"{}\"", value),
            (ArgumentType::Char, _) => format!("'{}'", value),
            (ArgumentType::Type, _) => format!("typeof({})", value),
            (ArgumentType::Array(element), ArgumentValue::Array(items)) => {
                let element_name = if element.is_enum() { element.full_name() } else { element.name() };
                let nested_typed = **element != ArgumentType::Object;
                let rendered: Vec<String> = items.iter().map(|item| item.render(nested_typed)).collect();
                format!("new {}[{}] {{ {} }}", element_name, items.len(), rendered.join(", "))
            }
            _ if typed => value.to_string(),
            _ => format!("({}){}", argument_type.name(), value),
        }
    }
}

impl fmt::Display for TypedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

/// A custom attribute applied to a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    #[serde(rename = "type")]
    pub attribute_type: String,
    #[serde(default)]
    pub arguments: Vec<TypedArgument>,
}

impl fmt::Display for CustomAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}(", self.attribute_type)?;
        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", argument)?;
        }
        write!(f, ")]")
    }
}
