//! Formal contexts: objects, properties, and their incidence relation.
//!
//! A [`Context`] is the immutable triple (object labels, property names,
//! object x property incidence) that a concept lattice is computed from.
//! Three plain-text input formats are supported, selected by
//! [`ContextFormat`]: a pipe-delimited grid (`table`, the default), the
//! Burmeister `.cxt` exchange format, and a bare comma-separated grid.

use std::collections::HashSet;
use std::fmt;

use bit_set::BitSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ContextError, ContextResult};
use crate::lattice::Lattice;

/// Input format of a context description.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContextFormat {
    /// Pipe-delimited grid with a property header row (the default).
    #[default]
    Table,
    /// Burmeister `.cxt` exchange format.
    Cxt,
    /// Comma-separated grid, no quoting.
    Csv,
}

/// An immutable formal context.
///
/// Invariants: object labels are unique, property names are unique, and every
/// incidence row has exactly one cell per property. All constructors enforce
/// this; a `Context` that exists is well-formed.
#[derive(Debug, Clone)]
pub struct Context {
    objects: Vec<String>,
    properties: Vec<String>,
    rows: Vec<BitSet>,
}

impl Context {
    /// Build a context from explicit parts, validating the invariants.
    pub fn new(
        objects: Vec<String>,
        properties: Vec<String>,
        incidence: Vec<Vec<bool>>,
    ) -> ContextResult<Context> {
        if objects.is_empty() || properties.is_empty() {
            return Err(ContextError::Empty);
        }
        let mut seen = HashSet::new();
        for label in &objects {
            if !seen.insert(label.as_str()) {
                return Err(ContextError::DuplicateObject(label.clone()));
            }
        }
        let mut seen = HashSet::new();
        for name in &properties {
            if !seen.insert(name.as_str()) {
                return Err(ContextError::DuplicateProperty(name.clone()));
            }
        }
        if incidence.len() != objects.len() {
            return Err(ContextError::Empty);
        }
        let mut rows = Vec::with_capacity(incidence.len());
        for (label, cells) in objects.iter().zip(&incidence) {
            if cells.len() != properties.len() {
                return Err(ContextError::RowWidth {
                    label: label.clone(),
                    expected: properties.len(),
                    found: cells.len(),
                });
            }
            let mut row = BitSet::with_capacity(properties.len());
            for (p, &marked) in cells.iter().enumerate() {
                if marked {
                    row.insert(p);
                }
            }
            rows.push(row);
        }
        Ok(Context {
            objects,
            properties,
            rows,
        })
    }

    /// Parse a context from text in the given format.
    pub fn from_str(text: &str, format: ContextFormat) -> ContextResult<Context> {
        match format {
            ContextFormat::Table => Self::parse_table(text),
            ContextFormat::Cxt => Self::parse_cxt(text),
            ContextFormat::Csv => Self::parse_csv(text),
        }
    }

    fn parse_table(text: &str) -> ContextResult<Context> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines.next().ok_or(ContextError::Empty)?;
        let head = split_pipe_row(header);
        if head.len() < 2 || !head[0].is_empty() || head[1..].iter().any(|p| p.is_empty()) {
            return Err(ContextError::MissingHeader);
        }
        let properties: Vec<String> = head[1..].iter().map(|p| p.to_string()).collect();

        let mut objects = Vec::new();
        let mut incidence = Vec::new();
        for line in lines {
            let cells = split_pipe_row(line);
            let label = cells.first().copied().unwrap_or_default().to_string();
            if cells.len() != properties.len() + 1 {
                return Err(ContextError::RowWidth {
                    label,
                    expected: properties.len(),
                    found: cells.len().saturating_sub(1),
                });
            }
            let mut row = Vec::with_capacity(properties.len());
            for (property, &cell) in properties.iter().zip(&cells[1..]) {
                row.push(parse_mark(cell, &label, property)?);
            }
            objects.push(label);
            incidence.push(row);
        }
        Context::new(objects, properties, incidence)
    }

    fn parse_cxt(text: &str) -> ContextResult<Context> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        match lines.next() {
            Some("B") => {}
            _ => return Err(ContextError::BadCxt("missing 'B' magic line".into())),
        }
        let object_count = parse_cxt_count(lines.next())?;
        let property_count = parse_cxt_count(lines.next())?;

        let rest: Vec<&str> = lines.collect();
        if rest.len() != object_count * 2 + property_count {
            return Err(ContextError::BadCxt(format!(
                "expected {} label and incidence lines, found {}",
                object_count * 2 + property_count,
                rest.len()
            )));
        }
        let objects: Vec<String> = rest[..object_count].iter().map(|s| s.to_string()).collect();
        let properties: Vec<String> = rest[object_count..object_count + property_count]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut incidence = Vec::with_capacity(object_count);
        for line in &rest[object_count + property_count..] {
            let mut row = Vec::with_capacity(property_count);
            for c in line.chars() {
                match c {
                    'X' | 'x' => row.push(true),
                    '.' => row.push(false),
                    other => {
                        return Err(ContextError::BadCxt(format!(
                            "unrecognized incidence character {other:?}"
                        )));
                    }
                }
            }
            incidence.push(row);
        }
        Context::new(objects, properties, incidence)
    }

    fn parse_csv(text: &str) -> ContextResult<Context> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines.next().ok_or(ContextError::Empty)?;
        let head: Vec<&str> = header.split(',').map(str::trim).collect();
        if head.len() < 2 || !head[0].is_empty() || head[1..].iter().any(|p| p.is_empty()) {
            return Err(ContextError::MissingHeader);
        }
        let properties: Vec<String> = head[1..].iter().map(|p| p.to_string()).collect();

        let mut objects = Vec::new();
        let mut incidence = Vec::new();
        for line in lines {
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            let label = cells.first().copied().unwrap_or_default().to_string();
            if cells.len() != properties.len() + 1 {
                return Err(ContextError::RowWidth {
                    label,
                    expected: properties.len(),
                    found: cells.len().saturating_sub(1),
                });
            }
            let mut row = Vec::with_capacity(properties.len());
            for (property, &cell) in properties.iter().zip(&cells[1..]) {
                row.push(parse_mark(cell, &label, property)?);
            }
            objects.push(label);
            incidence.push(row);
        }
        Context::new(objects, properties, incidence)
    }

    /// Ordered object labels.
    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    /// Ordered property names.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Position of a property name, if known.
    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p == name)
    }

    /// Whether the given object carries the given property.
    pub fn incidence(&self, object: usize, property: usize) -> bool {
        self.rows[object].contains(property)
    }

    /// The set of all objects.
    pub fn universe(&self) -> BitSet {
        let mut all = BitSet::with_capacity(self.objects.len());
        for o in 0..self.objects.len() {
            all.insert(o);
        }
        all
    }

    /// The set of objects carrying the given property.
    pub fn attribute_extent(&self, property: usize) -> BitSet {
        let mut extent = BitSet::with_capacity(self.objects.len());
        for (o, row) in self.rows.iter().enumerate() {
            if row.contains(property) {
                extent.insert(o);
            }
        }
        extent
    }

    /// Objects carrying every given property; the universe for no properties.
    pub fn extension<I: IntoIterator<Item = usize>>(&self, properties: I) -> BitSet {
        let mut extent = self.universe();
        for p in properties {
            extent.intersect_with(&self.attribute_extent(p));
        }
        extent
    }

    /// Properties carried by every given object; all properties for no objects.
    pub fn intension<I: IntoIterator<Item = usize>>(&self, objects: I) -> BitSet {
        let mut intent = BitSet::with_capacity(self.properties.len());
        for p in 0..self.properties.len() {
            intent.insert(p);
        }
        for o in objects {
            intent.intersect_with(&self.rows[o]);
        }
        intent
    }

    /// Compute the concept lattice of this context, consuming it.
    pub fn lattice(self) -> Lattice {
        Lattice::build(self)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Context of {} objects [{}] and {} properties [{}]>",
            self.objects.len(),
            self.objects.join(" "),
            self.properties.len(),
            self.properties.join(" "),
        )
    }
}

/// Split one table row on `|`, dropping a single trailing delimiter.
fn split_pipe_row(line: &str) -> Vec<&str> {
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(str::trim).collect()
}

fn parse_mark(cell: &str, label: &str, property: &str) -> ContextResult<bool> {
    match cell {
        "" => Ok(false),
        "X" | "x" => Ok(true),
        other => Err(ContextError::BadCell {
            label: label.to_string(),
            property: property.to_string(),
            content: other.to_string(),
        }),
    }
}

fn parse_cxt_count(line: Option<&str>) -> ContextResult<usize> {
    let line = line.ok_or_else(|| ContextError::BadCxt("missing count line".into()))?;
    line.parse()
        .map_err(|_| ContextError::BadCxt(format!("bad count line {line:?}")))
}
