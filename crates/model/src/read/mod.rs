//! Netlist readers.
//!
//! Each reader builds a [`Model`](crate::Model) through the public building
//! API and finishes with [`Model::wrap_up`](crate::Model::wrap_up).

mod aag;
mod blif;
mod iscas89;
mod truth;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::ReadError;
use crate::id::NodeId;
use crate::model::Model;

/// Position in a source file, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    /// Line number.
    pub line: usize,
    /// Column number.
    pub column: usize,
}

impl Location {
    /// Creates a location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reader options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Name of the clock input created for AIGER latches.
    pub clock_name: String,
    /// Name of the reset input created for AIGER latches.
    pub reset_name: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            clock_name: "clock".to_string(),
            reset_name: "reset".to_string(),
        }
    }
}

/// Path reported for models read from a string.
pub(crate) const STRING_SOURCE: &str = "<string>";

fn open(path: &Path) -> Result<BufReader<File>, ReadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: io::Error) -> ReadError {
    ReadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, ReadError> {
    let mut text = String::new();
    open(path)?
        .read_to_string(&mut text)
        .map_err(|e| io_error(path, e))?;
    Ok(text)
}

/// Reads a file that may contain binary sections.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, ReadError> {
    let mut data = Vec::new();
    open(path)?
        .read_to_end(&mut data)
        .map_err(|e| io_error(path, e))?;
    Ok(data)
}

pub(crate) fn parse_error(path: &Path, loc: Location, message: impl Into<String>) -> ReadError {
    ReadError::Parse {
        path: path.to_path_buf(),
        loc,
        message: message.into(),
    }
}

/// Splits a line into whitespace-separated words with their 1-based columns.
pub(crate) fn split_words(line: &str) -> impl Iterator<Item = (usize, &str)> {
    line.split_whitespace().map(move |w| {
        let offset = w.as_ptr() as usize - line.as_ptr() as usize;
        (line[..offset].chars().count() + 1, w)
    })
}

#[derive(Debug)]
struct NetEntry {
    node: NodeId,
    defined: Option<Location>,
    referenced: Option<Location>,
}

/// Maps net names to nodes, tracking where each was defined and first used.
///
/// Nets may be used before they are defined; the node is allocated on first
/// mention and given its driver when the definition shows up.
#[derive(Debug, Default)]
pub(crate) struct NetTable {
    nets: IndexMap<String, NetEntry, ahash::RandomState>,
}

impl NetTable {
    fn entry<'t>(&'t mut self, model: &mut Model, name: &str) -> &'t mut NetEntry {
        match self.nets.entry(name.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(NetEntry {
                node: model.new_node(name),
                defined: None,
                referenced: None,
            }),
        }
    }

    /// Node for a use of `name`.
    pub(crate) fn reference(&mut self, model: &mut Model, name: &str, loc: Location) -> NodeId {
        let entry = self.entry(model, name);
        entry.referenced.get_or_insert(loc);
        entry.node
    }

    /// Node for the definition of `name`. Fails with a message if the net
    /// already has a definition.
    pub(crate) fn define(
        &mut self,
        model: &mut Model,
        name: &str,
        loc: Location,
    ) -> Result<NodeId, String> {
        let entry = self.entry(model, name);
        if let Some(prev) = entry.defined {
            return Err(format!(
                "'{name}' is defined more than once (previous definition at {prev})"
            ));
        }
        entry.defined = Some(loc);
        Ok(entry.node)
    }

    /// First net that is used but never defined.
    pub(crate) fn first_undefined(&self) -> Option<(&str, Location)> {
        self.nets
            .iter()
            .filter(|(_, e)| e.defined.is_none())
            .filter_map(|(name, e)| e.referenced.map(|loc| (name.as_str(), loc)))
            .min_by_key(|&(_, loc)| loc)
    }

    pub(crate) fn len(&self) -> usize {
        self.nets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        let words: Vec<_> = split_words("  .names a\tb  c").collect();
        assert_eq!(words, vec![(3, ".names"), (10, "a"), (12, "b"), (15, "c")]);
    }

    #[test]
    fn test_net_table() {
        let mut model = Model::new();
        let mut nets = NetTable::default();
        let a = nets.reference(&mut model, "a", Location::new(3, 1));
        let b = nets.reference(&mut model, "b", Location::new(2, 5));
        assert_eq!(nets.define(&mut model, "a", Location::new(4, 1)), Ok(a));
        assert!(nets.define(&mut model, "a", Location::new(5, 1)).is_err());
        assert_eq!(nets.first_undefined(), Some(("b", Location::new(2, 5))));
        assert_eq!(model.node_num(), 2);
        assert_ne!(a, b);
        assert_eq!(nets.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = read_file(Path::new("/nonexistent/model.blif")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
        assert!(err.location().is_none());
    }
}
