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

//! Printable summaries of resolution results

use crate::config::OutputFormat;
use anyhow::Result;
use rdxml_core::{RootSet, RootTarget, TypeSystem};
use serde::Serialize;
use std::fmt::Write as _;

/// One root with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedRoot {
    pub kind: &'static str,
    pub name: String,
    pub reason: String,
}

/// A best-effort root the sink declined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedSkip {
    pub kind: &'static str,
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootReport {
    pub roots: Vec<ReportedRoot>,
    pub skipped: Vec<ReportedSkip>,
}

/// Counts of accepted roots per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RootCounts {
    pub modules: usize,
    pub types: usize,
    pub methods: usize,
    pub skipped: usize,
}

fn kind_of(target: &RootTarget) -> &'static str {
    match target {
        RootTarget::ModuleMetadata(_) => "module",
        RootTarget::Type(_) => "type",
        RootTarget::Method(_) => "method",
    }
}

fn name_of<T: TypeSystem + ?Sized>(types: &T, target: &RootTarget) -> Result<String> {
    Ok(match target {
        RootTarget::ModuleMetadata(module) => types.module_name(*module)?,
        RootTarget::Type(ty) => types.type_info(*ty)?.name,
        RootTarget::Method(method) => types.method_info(*method)?.name,
    })
}

impl RootReport {
    /// Collect display names for every accepted and skipped root
    pub fn from_roots<T: TypeSystem + ?Sized>(types: &T, roots: &RootSet<'_, T>) -> Result<Self> {
        let mut report = Self::default();

        for record in roots.records() {
            report.roots.push(ReportedRoot {
                kind: kind_of(&record.target),
                name: name_of(types, &record.target)?,
                reason: record.reason.clone(),
            });
        }

        for skip in roots.skipped() {
            report.skipped.push(ReportedSkip {
                kind: kind_of(&skip.target),
                name: name_of(types, &skip.target)?,
                error: skip.error.to_string(),
            });
        }

        Ok(report)
    }

    pub fn counts(&self) -> RootCounts {
        let mut counts = RootCounts {
            skipped: self.skipped.len(),
            ..Default::default()
        };
        for root in &self.roots {
            match root.kind {
                "module" => counts.modules += 1,
                "type" => counts.types += 1,
                _ => counts.methods += 1,
            }
        }
        counts
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        let mut output = String::new();

        for root in &self.roots {
            let _ = writeln!(output, "{:<8} {:<60} {}", root.kind, root.name, root.reason);
        }
        for skip in &self.skipped {
            let _ = writeln!(output, "skipped  {:<6} {:<53} {}", skip.kind, skip.name, skip.error);
        }
        let _ = writeln!(output, "{} root(s), {} skipped", self.roots.len(), self.skipped.len());

        output
    }
}

impl RootCounts {
    pub fn summary(&self) -> String {
        format!(
            "ok: {} module(s), {} type(s), {} method(s), {} skipped",
            self.modules, self.types, self.methods, self.skipped
        )
    }
}
