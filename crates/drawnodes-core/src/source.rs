//! Description files: named sections of grid rows plus `@key=value` directives.
//!
//! ```text
//! =adder
//! @imgsize=800,600
//!  #__
//!  |  \
//! =
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-section rendering overrides. Unset fields fall back to computed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directives {
    pub imgsize: Option<(u32, u32)>,
    pub camera: Option<(f64, f64, f64)>,
    pub border: Option<f64>,
    /// Custom palette, already normalized. `None` when absent or empty.
    pub colors: Option<Vec<String>>,
}

impl Directives {
    /// Applies one directive line (without the leading `@`).
    pub fn apply(&mut self, line: &str) -> Result<()> {
        let (key, value) = line.split_once('=').ok_or_else(|| Error::InvalidDirective {
            directive: line.trim().to_string(),
            value: String::new(),
        })?;
        let key = key.trim();
        let value = value.trim();
        let invalid = || Error::InvalidDirective {
            directive: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "imgsize" => {
                let [w, h] = parse_list::<u32, 2>(value).ok_or_else(invalid)?;
                self.imgsize = Some((w, h));
            }
            "camera" => {
                let [x, y, z] = parse_list::<f64, 3>(value).ok_or_else(invalid)?;
                self.camera = Some((x, y, z));
            }
            "border" => {
                self.border = Some(value.parse().map_err(|_| invalid())?);
            }
            "colors" => {
                let colors: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(crate::color::normalize_color)
                    .collect();
                self.colors = (!colors.is_empty()).then_some(colors);
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

fn parse_list<T: std::str::FromStr, const N: usize>(value: &str) -> Option<[T; N]> {
    let parsed: Vec<T> = value
        .split(',')
        .map(|v| v.trim().parse().ok())
        .collect::<Option<_>>()?;
    parsed.try_into().ok()
}

/// One `=name` … `=` block of a description file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Grid rows with trailing whitespace removed.
    pub rows: Vec<String>,
    pub directives: Directives,
    /// Human-readable problems found while reading the section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub sections: Vec<Section>,
    /// File-level problems, such as an unterminated final section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Splits a description file into sections.
///
/// Lines outside sections are ignored. A final section missing its closing `=` is dropped.
pub fn parse_sections(text: &str) -> SourceFile {
    let mut out = SourceFile::default();
    let mut current: Option<Section> = None;

    for raw in text.lines() {
        let line = raw.trim_end();
        match current.as_mut() {
            None => {
                if let Some(name) = line.strip_prefix('=') {
                    if name.is_empty() {
                        continue;
                    }
                    current = Some(Section {
                        name: name.to_string(),
                        ..Section::default()
                    });
                }
            }
            Some(section) => {
                if line == "=" {
                    if let Some(done) = current.take() {
                        tracing::debug!(
                            section = %done.name,
                            rows = done.rows.len(),
                            "read section"
                        );
                        out.sections.push(done);
                    }
                } else if let Some(directive) = line.strip_prefix('@') {
                    if let Err(err) = section.directives.apply(directive) {
                        tracing::warn!(section = %section.name, error = %err, "ignoring directive");
                        section.warnings.push(err.to_string());
                    }
                } else {
                    section.rows.push(line.to_string());
                }
            }
        }
    }

    if let Some(open) = current {
        tracing::warn!(section = %open.name, "dropping unterminated section");
        out.warnings
            .push(format!("section `{}` has no closing `=` and was dropped", open.name));
    }
    out
}
