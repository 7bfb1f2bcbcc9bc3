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

//! Assembly display names
//!
//! Parses `Simple.Name, Version=1.2.3.4, Culture=neutral, PublicKeyToken=null`.
//! Identity is the simple name, compared without regard to ASCII case.

use crate::error::{TypeSystemError, TypeSystemResult};
use std::fmt;
use std::str::FromStr;

/// A parsed assembly display name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyName {
    pub name: String,
    pub version: Option<String>,
    pub culture: Option<String>,
    pub public_key_token: Option<String>,
}

impl AssemblyName {
    /// Create a name with only the simple name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse an assembly display name
    pub fn parse(text: &str) -> TypeSystemResult<Self> {
        let (simple, rest) = split_simple_name(text)?;
        let mut assembly = Self::new(simple);

        for property in rest.iter().map(|part| part.trim()) {
            let Some((key, value)) = property.split_once('=') else {
                return Err(TypeSystemError::invalid_assembly_name(text, format!("property '{}' has no value", property)));
            };
            let value = value.trim().to_string();

            match key.trim().to_ascii_lowercase().as_str() {
                "version" => {
                    validate_version(&value).map_err(|reason| TypeSystemError::invalid_assembly_name(text, reason))?;
                    assembly.version = Some(value);
                }
                "culture" => assembly.culture = Some(value),
                "publickeytoken" => assembly.public_key_token = Some(value),
                // ProcessorArchitecture, Retargetable and friends do not affect binding here
                _ => {}
            }
        }

        Ok(assembly)
    }

    /// Whether `simple_name` identifies the same assembly
    pub fn matches(&self, simple_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(simple_name)
    }
}

impl FromStr for AssemblyName {
    type Err = TypeSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AssemblyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, ", Version={}", version)?;
        }
        if let Some(culture) = &self.culture {
            write!(f, ", Culture={}", culture)?;
        }
        if let Some(token) = &self.public_key_token {
            write!(f, ", PublicKeyToken={}", token)?;
        }
        Ok(())
    }
}

/// Split off the simple name (honouring `\` escapes) from the comma-separated properties
fn split_simple_name(text: &str) -> TypeSystemResult<(String, Vec<&str>)> {
    let mut simple = String::new();
    let mut chars = text.char_indices();
    let mut rest_start = None;

    while let Some((index, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => simple.push(escaped),
                None => return Err(TypeSystemError::invalid_assembly_name(text, "dangling escape character")),
            },
            ',' => {
                rest_start = Some(index + 1);
                break;
            }
            _ => simple.push(ch),
        }
    }

    let simple = simple.trim().to_string();
    if simple.is_empty() {
        return Err(TypeSystemError::invalid_assembly_name(text, "simple name is empty"));
    }

    let rest = match rest_start {
        Some(start) => text[start..].split(',').collect(),
        None => Vec::new(),
    };
    Ok((simple, rest))
}

fn validate_version(value: &str) -> Result<(), String> {
    let parts: Vec<&str> = value.split('.').collect();
    if !(2..=4).contains(&parts.len()) {
        return Err(format!("version '{}' must have between two and four components", value));
    }
    for part in parts {
        part.parse::<u16>().map_err(|_| format!("version component '{}' is not a number", part))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_name() {
        let name = AssemblyName::parse("App.A").unwrap();
        assert_eq!(name.name, "App.A");
        assert!(name.version.is_none());
    }

    #[test]
    fn test_parse_full_display_name() {
        let name: AssemblyName = "System.Runtime, Version=8.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a".parse().unwrap();

        assert_eq!(name.name, "System.Runtime");
        assert_eq!(name.version.as_deref(), Some("8.0.0.0"));
        assert_eq!(name.culture.as_deref(), Some("neutral"));
        assert_eq!(name.public_key_token.as_deref(), Some("b03f5f7f11d50a3a"));
        assert_eq!(name.to_string(), "System.Runtime, Version=8.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a");
    }

    #[test]
    fn test_parse_ignores_unknown_properties() {
        let name = AssemblyName::parse("App, processorArchitecture=MSIL").unwrap();
        assert_eq!(name, AssemblyName::new("App"));
    }

    #[test]
    fn test_parse_escaped_comma() {
        let name = AssemblyName::parse(r"Odd\,Name, Culture=neutral").unwrap();
        assert_eq!(name.name, "Odd,Name");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(AssemblyName::parse("").is_err());
        assert!(AssemblyName::parse("   , Version=1.0").is_err());
        assert!(AssemblyName::parse("App, Version").is_err());
        assert!(AssemblyName::parse("App, Version=one.two").is_err());
        assert!(AssemblyName::parse("App, Version=1").is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let name = AssemblyName::new("app.a");
        assert!(name.matches("App.A"));
        assert!(!name.matches("App.B"));
    }
}
