//! Logic functions attached to logic nodes.

mod cover;
mod prim;
mod tvfunc;

pub use cover::{Cube, Pat, SopCover, parse_cube};
pub use prim::PrimType;
pub use tvfunc::{MAX_TV_INPUTS, TvFunc};

use std::fmt;

use indexmap::IndexSet;

use crate::id::FuncId;

/// A function in the model's function table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Func {
    /// Built-in gate over `input_num` inputs.
    Primitive {
        /// Number of inputs.
        input_num: usize,
        /// Gate kind.
        prim: PrimType,
    },
    /// Sum-of-products cover. When `output_inv` is set the cover describes
    /// the off-set and the function is its complement.
    Cover {
        /// The cover.
        cover: SopCover,
        /// Output polarity.
        output_inv: bool,
    },
    /// Explicit truth table.
    TruthTable(TvFunc),
}

impl Func {
    /// Number of inputs.
    pub fn input_num(&self) -> usize {
        match self {
            Func::Primitive { input_num, .. } => *input_num,
            Func::Cover { cover, .. } => cover.input_num(),
            Func::TruthTable(tv) => tv.input_num(),
        }
    }

    /// True for [`Func::Primitive`].
    pub fn is_primitive(&self) -> bool {
        matches!(self, Func::Primitive { .. })
    }

    /// True for [`Func::Cover`].
    pub fn is_cover(&self) -> bool {
        matches!(self, Func::Cover { .. })
    }

    /// True for [`Func::TruthTable`].
    pub fn is_tvfunc(&self) -> bool {
        matches!(self, Func::TruthTable(_))
    }

    /// The output character of a cover, `'1'` or `'0'`.
    pub fn output_pat(&self) -> Option<char> {
        match self {
            Func::Cover { output_inv, .. } => Some(if *output_inv { '0' } else { '1' }),
            _ => None,
        }
    }

    /// Evaluates the function. `inputs` must hold `input_num()` values.
    pub fn eval(&self, inputs: &[bool]) -> bool {
        debug_assert_eq!(inputs.len(), self.input_num());
        match self {
            Func::Primitive { prim, .. } => prim.eval(inputs),
            Func::Cover { cover, output_inv } => cover.eval(inputs) ^ *output_inv,
            Func::TruthTable(tv) => tv.eval(inputs),
        }
    }

    /// Expands the function into a truth table.
    ///
    /// # Panics
    ///
    /// If the function has more than [`MAX_TV_INPUTS`] inputs.
    pub fn to_tvfunc(&self) -> TvFunc {
        match self {
            Func::TruthTable(tv) => tv.clone(),
            _ => TvFunc::from_fn(self.input_num(), |v| self.eval(v)),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Func::Primitive { input_num, prim } => write!(f, "Primitive({prim}, {input_num})"),
            Func::Cover { cover, output_inv } => {
                let opat = if *output_inv { '0' } else { '1' };
                write!(f, "Cover({}; {cover} -> {opat})", cover.input_num())
            }
            Func::TruthTable(tv) => write!(f, "TvFunc({}; {tv})", tv.input_num()),
        }
    }
}

/// Deduplicating, insertion-ordered function table.
///
/// Registering a function equal to one already present returns the existing
/// id, so ids stay dense.
#[derive(Debug, Clone, Default)]
pub(crate) struct FuncMgr {
    funcs: IndexSet<Func, ahash::RandomState>,
}

impl FuncMgr {
    pub(crate) fn reg(&mut self, func: Func) -> FuncId {
        let (idx, _) = self.funcs.insert_full(func);
        FuncId::from(idx)
    }

    pub(crate) fn len(&self) -> usize {
        self.funcs.len()
    }

    pub(crate) fn get(&self, id: FuncId) -> Option<&Func> {
        self.funcs.get_index(usize::from(id))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Func> {
        self.funcs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_mgr_dedup() {
        let mut mgr = FuncMgr::default();
        let and2 = mgr.reg(Func::Primitive {
            input_num: 2,
            prim: PrimType::And,
        });
        let or2 = mgr.reg(Func::Primitive {
            input_num: 2,
            prim: PrimType::Or,
        });
        let and2_again = mgr.reg(Func::Primitive {
            input_num: 2,
            prim: PrimType::And,
        });
        let and3 = mgr.reg(Func::Primitive {
            input_num: 3,
            prim: PrimType::And,
        });

        assert_eq!(and2, and2_again);
        assert_ne!(and2, or2);
        assert_ne!(and2, and3);
        assert_eq!(mgr.len(), 3);
        assert_eq!(usize::from(and3), 2);
    }

    #[test]
    fn test_cover_polarity() {
        let cover = SopCover::from_strs(2, &["11"]).unwrap();
        let nand = Func::Cover {
            cover,
            output_inv: true,
        };
        assert_eq!(nand.output_pat(), Some('0'));
        assert!(!nand.eval(&[true, true]));
        assert!(nand.eval(&[false, true]));

        let prim = Func::Primitive {
            input_num: 2,
            prim: PrimType::Nand,
        };
        assert_eq!(nand.to_tvfunc(), prim.to_tvfunc());
    }
}
