//! Error types.

use std::io;
use std::path::PathBuf;

use crate::id::{NodeId, SeqId};
use crate::read::Location;

/// Errors raised by model accessors and the model-building API.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An index did not refer to an existing entity.
    #[error("'{what}'({index}) is out-of-range (size is {len})")]
    OutOfRange {
        /// Which table was indexed.
        what: &'static str,
        /// The offending index.
        index: usize,
        /// The table size.
        len: usize,
    },

    /// The number of fanins does not match the function's input count.
    #[error("fanin count mismatch: function takes {expected} inputs, got {got}")]
    FaninMismatch {
        /// Inputs expected by the function.
        expected: usize,
        /// Fanins supplied.
        got: usize,
    },

    /// A node was given a driver twice.
    #[error("node {node} ({name}) is already defined")]
    AlreadyDefined {
        /// The node.
        node: NodeId,
        /// Its name, possibly empty.
        name: String,
    },

    /// A node is referenced but never given a driver.
    #[error("node {node} ({name}) is undefined")]
    Undefined {
        /// The node.
        node: NodeId,
        /// Its name, possibly empty.
        name: String,
    },

    /// The combinational part of the network contains a cycle.
    #[error("combinational loop through node {node} ({name})")]
    CombinationalLoop {
        /// A node on the cycle.
        node: NodeId,
        /// Its name, possibly empty.
        name: String,
    },

    /// A pin was set that the sequential element does not have.
    #[error("{seq} is not a {expected}")]
    WrongSeqKind {
        /// The sequential element.
        seq: SeqId,
        /// The kind the operation requires.
        expected: &'static str,
    },

    /// A sequential element has no data source.
    #[error("{seq} has no data source")]
    NoDataSource {
        /// The sequential element.
        seq: SeqId,
    },

    /// A value vector passed to the evaluator has the wrong length.
    #[error("expected {expected} {what} values, got {got}")]
    InputLength {
        /// `"input"` or `"state"`.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
}

/// Errors raised while reading a netlist file.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file could not be opened or read.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The file contents are malformed.
    #[error("{}:{loc}: {message}", path.display())]
    Parse {
        /// The file.
        path: PathBuf,
        /// Where the problem was found.
        loc: Location,
        /// What went wrong.
        message: String,
    },

    /// The netlist was well formed but describes an invalid network.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ReadError {
    /// Location of a parse error, if this is one.
    pub fn location(&self) -> Option<Location> {
        match self {
            ReadError::Parse { loc, .. } => Some(*loc),
            _ => None,
        }
    }
}
