//! Boolean network model and netlist readers.
//!
//! A [`Model`] holds a gate-level sequential circuit: primary inputs and
//! outputs, D flip-flops and latches, and logic nodes whose functions live in
//! a deduplicated function table. Models are loaded from BLIF
//! ([`Model::read_blif`]), ISCAS'89 `.bench` ([`Model::read_iscas89`]),
//! AIGER ([`Model::read_aag`], [`Model::read_aig`]) or truth-table
//! ([`Model::read_truth`]) files, or built by hand through the
//! `new_*`/`set_*` methods followed by [`Model::wrap_up`].
//!
//! ```
//! use bn_model::Model;
//!
//! let model = Model::read_blif_str(
//!     ".model and2\n.inputs a b\n.outputs y\n.names a b y\n11 1\n.end\n",
//! )?;
//! assert_eq!(model.name(), "and2");
//! assert_eq!(model.logic_num(), 1);
//! assert_eq!(model.eval(&[true, true], &[])?.outputs, [true]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The empty model takes no construction arguments:
//!
//! ```compile_fail
//! let model = bn_model::Model::new(1);
//! ```

mod error;
mod eval;
mod func;
mod id;
mod library;
mod model;
mod node;
mod read;
mod seq;

pub use error::{ModelError, ReadError};
pub use eval::EvalResult;
pub use func::{Cube, Func, MAX_TV_INPUTS, Pat, PrimType, SopCover, TvFunc, parse_cube};
pub use id::{FuncId, NodeId, SeqId};
pub use library::CellLibrary;
pub use model::Model;
pub use node::{Node, NodeKind};
pub use read::{Location, ReadOptions};
pub use seq::{Seq, SeqKind};
