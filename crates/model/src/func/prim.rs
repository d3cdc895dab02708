//! Primitive gate types.

use std::fmt;
use std::str::FromStr;

/// Built-in gate function.
///
/// The n-ary kinds (`And` through `Xnor`) accept any positive number of
/// inputs. `C0`/`C1` take none, `Buff`/`Not` take exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimType {
    /// Constant 0.
    C0,
    /// Constant 1.
    C1,
    /// Buffer.
    Buff,
    /// Inverter.
    Not,
    /// AND.
    And,
    /// NAND.
    Nand,
    /// OR.
    Or,
    /// NOR.
    Nor,
    /// XOR (odd parity).
    Xor,
    /// XNOR (even parity).
    Xnor,
}

impl PrimType {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimType; 10] = [
        PrimType::C0,
        PrimType::C1,
        PrimType::Buff,
        PrimType::Not,
        PrimType::And,
        PrimType::Nand,
        PrimType::Or,
        PrimType::Nor,
        PrimType::Xor,
        PrimType::Xnor,
    ];

    /// Returns the input count this gate requires when `input_num` is not
    /// acceptable, or `None` if it is.
    pub fn arity_violation(self, input_num: usize) -> Option<usize> {
        let required = match self {
            PrimType::C0 | PrimType::C1 => 0,
            PrimType::Buff | PrimType::Not => 1,
            _ if input_num == 0 => 1,
            _ => return None,
        };
        (required != input_num).then_some(required)
    }

    /// Evaluates the gate.
    #[inline]
    pub fn eval(self, inputs: &[bool]) -> bool {
        match self {
            PrimType::C0 => false,
            PrimType::C1 => true,
            PrimType::Buff => inputs[0],
            PrimType::Not => !inputs[0],
            PrimType::And => inputs.iter().all(|&b| b),
            PrimType::Nand => !inputs.iter().all(|&b| b),
            PrimType::Or => inputs.iter().any(|&b| b),
            PrimType::Nor => !inputs.iter().any(|&b| b),
            PrimType::Xor => inputs.iter().fold(false, |acc, &b| acc ^ b),
            PrimType::Xnor => !inputs.iter().fold(false, |acc, &b| acc ^ b),
        }
    }

    /// Upper-case keyword, as used in `.bench` files.
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimType::C0 => "CONST0",
            PrimType::C1 => "CONST1",
            PrimType::Buff => "BUFF",
            PrimType::Not => "NOT",
            PrimType::And => "AND",
            PrimType::Nand => "NAND",
            PrimType::Or => "OR",
            PrimType::Nor => "NOR",
            PrimType::Xor => "XOR",
            PrimType::Xnor => "XNOR",
        }
    }
}

impl fmt::Display for PrimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for PrimType {
    type Err = ();

    /// Accepts the `.bench` keywords and their common aliases in either
    /// all-upper or all-lower case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prim = match s {
            "CONST0" | "const0" => PrimType::C0,
            "CONST1" | "const1" => PrimType::C1,
            "BUFF" | "buff" | "BUF" | "buf" => PrimType::Buff,
            "NOT" | "not" | "INV" | "inv" => PrimType::Not,
            "AND" | "and" => PrimType::And,
            "NAND" | "nand" => PrimType::Nand,
            "OR" | "or" => PrimType::Or,
            "NOR" | "nor" => PrimType::Nor,
            "XOR" | "xor" => PrimType::Xor,
            "XNOR" | "xnor" => PrimType::Xnor,
            _ => return Err(()),
        };
        Ok(prim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prim_eval() {
        assert!(!PrimType::C0.eval(&[]));
        assert!(PrimType::C1.eval(&[]));
        assert!(PrimType::Not.eval(&[false]));
        assert!(PrimType::And.eval(&[true, true, true]));
        assert!(!PrimType::And.eval(&[true, false, true]));
        assert!(PrimType::Nand.eval(&[true, false]));
        assert!(PrimType::Or.eval(&[false, true]));
        assert!(PrimType::Nor.eval(&[false, false]));
        assert!(PrimType::Xor.eval(&[true, true, true]));
        assert!(PrimType::Xnor.eval(&[true, true]));
    }

    #[test]
    fn test_prim_arity() {
        assert_eq!(PrimType::Not.arity_violation(1), None);
        assert_eq!(PrimType::Not.arity_violation(2), Some(1));
        assert_eq!(PrimType::C1.arity_violation(1), Some(0));
        assert_eq!(PrimType::And.arity_violation(0), Some(1));
        assert_eq!(PrimType::And.arity_violation(5), None);
    }

    #[test]
    fn test_prim_keywords() {
        for prim in PrimType::ALL {
            assert_eq!(prim.keyword().parse::<PrimType>(), Ok(prim));
        }
        assert_eq!("inv".parse::<PrimType>(), Ok(PrimType::Not));
        assert!("Nand".parse::<PrimType>().is_err());
    }
}
