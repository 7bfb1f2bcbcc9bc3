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

//! Custom-attribute style type names
//!
//! ```text
//! TypeName      := QualifiedName GenericArgs? ArraySuffix* ("," AssemblyName)?
//! QualifiedName := Name ("+" Name)*
//! GenericArgs   := "[" GenericArg ("," GenericArg)* "]"
//! GenericArg    := "[" TypeName "]" | QualifiedName GenericArgs? ArraySuffix*
//! ArraySuffix   := "[" ","* "]"
//! ```
//!
//! A backslash escapes the next character of a name. Pointer and by-ref
//! suffixes are not supported.

use crate::assembly_name::AssemblyName;
use crate::error::{TypeSystemError, TypeSystemResult};
use std::fmt;

/// A parsed type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// Outermost type first; nested types follow (`Outer+Inner`)
    pub nesting: Vec<String>,
    pub generic_arguments: Vec<TypeName>,
    /// Rank of each array suffix, innermost first
    pub array_ranks: Vec<usize>,
    pub assembly: Option<AssemblyName>,
}

impl TypeName {
    /// A plain, non-nested, non-generic name
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            nesting: vec![name.into()],
            generic_arguments: Vec::new(),
            array_ranks: Vec::new(),
            assembly: None,
        }
    }

    pub fn parse(text: &str) -> TypeSystemResult<Self> {
        let mut parser = TypeNameParser::new(text);
        let name = parser.type_name(true)?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(name),
            Some(ch) => Err(parser.error(format!("unexpected '{}'", ch))),
        }
    }

    /// The definition part of the name, `Outer+Inner`
    pub fn definition_name(&self) -> String {
        self.nesting.join("+")
    }

    /// True when the name refers to a type definition as declared
    pub fn is_definition(&self) -> bool {
        self.generic_arguments.is_empty() && self.array_ranks.is_empty() && self.assembly.is_none()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition_name())?;

        if !self.generic_arguments.is_empty() {
            write!(f, "[")?;
            for (index, argument) in self.generic_arguments.iter().enumerate() {
                if index > 0 {
                    write!(f, ",")?;
                }
                if argument.assembly.is_some() {
                    write!(f, "[{}]", argument)?;
                } else {
                    write!(f, "{}", argument)?;
                }
            }
            write!(f, "]")?;
        }

        for rank in &self.array_ranks {
            write!(f, "[{}]", ",".repeat(rank.saturating_sub(1)))?;
        }

        if let Some(assembly) = &self.assembly {
            write!(f, ", {}", assembly)?;
        }
        Ok(())
    }
}

/// Generic parameter count encoded in a definition name (`Map`2+Entry`1` has 3)
pub fn generic_arity(definition_name: &str) -> usize {
    definition_name
        .split('+')
        .filter_map(|segment| segment.rsplit_once('`'))
        .filter_map(|(_, count)| count.parse::<usize>().ok())
        .sum()
}

struct TypeNameParser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> TypeNameParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// First non-whitespace character after the current one
    fn peek_next_significant(&self) -> Option<char> {
        self.chars[self.pos.saturating_add(1).min(self.chars.len())..].iter().copied().find(|ch| !ch.is_whitespace())
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, reason: impl Into<String>) -> TypeSystemError {
        TypeSystemError::invalid_type_name(self.source, reason)
    }

    fn type_name(&mut self, allow_assembly: bool) -> TypeSystemResult<TypeName> {
        let nesting = self.qualified_name()?;

        let mut generic_arguments = Vec::new();
        if self.peek() == Some('[') && !matches!(self.peek_next_significant(), Some(']') | Some(',')) {
            self.bump();
            loop {
                self.skip_whitespace();
                let argument = if self.peek() == Some('[') {
                    self.bump();
                    let argument = self.type_name(true)?;
                    self.skip_whitespace();
                    if self.bump() != Some(']') {
                        return Err(self.error("unterminated assembly-qualified generic argument"));
                    }
                    argument
                } else {
                    self.type_name(false)?
                };
                generic_arguments.push(argument);

                self.skip_whitespace();
                match self.bump() {
                    Some(',') => continue,
                    Some(']') => break,
                    _ => return Err(self.error("unterminated generic argument list")),
                }
            }
        }

        let mut array_ranks = Vec::new();
        while self.peek() == Some('[') {
            self.bump();
            let mut rank = 1;
            loop {
                self.skip_whitespace();
                match self.bump() {
                    Some(',') => rank += 1,
                    Some(']') => break,
                    _ => return Err(self.error("malformed array suffix")),
                }
            }
            array_ranks.push(rank);
        }

        self.skip_whitespace();
        let assembly = if allow_assembly && self.peek() == Some(',') {
            self.bump();
            let start = self.pos;
            while let Some(ch) = self.peek() {
                if ch == ']' {
                    break;
                }
                if ch == '\\' {
                    self.bump();
                }
                self.bump();
            }
            let text: String = self.chars[start..self.pos].iter().collect();
            Some(AssemblyName::parse(text.trim())?)
        } else {
            None
        };

        Ok(TypeName {
            nesting,
            generic_arguments,
            array_ranks,
            assembly,
        })
    }

    fn qualified_name(&mut self) -> TypeSystemResult<Vec<String>> {
        let mut nesting = vec![self.identifier()?];
        while self.peek() == Some('+') {
            self.bump();
            nesting.push(self.identifier()?);
        }
        Ok(nesting)
    }

    fn identifier(&mut self) -> TypeSystemResult<String> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '\\' => {
                    self.bump();
                    match self.bump() {
                        Some(escaped) => name.push(escaped),
                        None => return Err(self.error("dangling escape character")),
                    }
                }
                '[' | ']' | ',' | '+' | '&' | '*' => break,
                _ => {
                    name.push(ch);
                    self.bump();
                }
            }
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(self.error("empty name segment"));
        }
        Ok(name.to_string())
    }
}
