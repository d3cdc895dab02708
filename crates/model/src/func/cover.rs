//! Sum-of-products covers, as found in `.names` tables.

use std::fmt;

/// Value of one variable position in a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pat {
    /// Variable must be 0.
    Zero,
    /// Variable must be 1.
    One,
    /// Variable is unconstrained.
    DontCare,
}

impl Pat {
    /// Parses one cube character (`0`, `1` or `-`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Pat::Zero),
            '1' => Some(Pat::One),
            '-' => Some(Pat::DontCare),
            _ => None,
        }
    }

    /// The cube character for this pattern.
    pub fn to_char(self) -> char {
        match self {
            Pat::Zero => '0',
            Pat::One => '1',
            Pat::DontCare => '-',
        }
    }

    #[inline]
    fn matches(self, value: bool) -> bool {
        match self {
            Pat::Zero => !value,
            Pat::One => value,
            Pat::DontCare => true,
        }
    }
}

/// A product term over the cover's variables.
pub type Cube = Box<[Pat]>;

/// Sum-of-products cover over `input_num` variables.
///
/// Cubes are kept sorted and without duplicates, so two covers describing the
/// same set of cubes compare equal regardless of the order they were given in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SopCover {
    input_num: usize,
    cubes: Vec<Cube>,
}

impl SopCover {
    /// Builds a cover, returning `None` if some cube is not exactly
    /// `input_num` wide.
    pub fn new(input_num: usize, cubes: impl IntoIterator<Item = Cube>) -> Option<Self> {
        let mut cubes: Vec<Cube> = cubes.into_iter().collect();
        if cubes.iter().any(|c| c.len() != input_num) {
            return None;
        }
        cubes.sort();
        cubes.dedup();
        Some(Self { input_num, cubes })
    }

    /// Builds a cover from cube strings such as `"1-0"`.
    pub fn from_strs(input_num: usize, cubes: &[&str]) -> Option<Self> {
        let cubes = cubes
            .iter()
            .map(|s| parse_cube(s))
            .collect::<Option<Vec<_>>>()?;
        Self::new(input_num, cubes)
    }

    /// Number of variables.
    pub fn input_num(&self) -> usize {
        self.input_num
    }

    /// Number of cubes.
    pub fn cube_num(&self) -> usize {
        self.cubes.len()
    }

    /// The cubes, in canonical order.
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Pattern of variable `var` in cube `cube`.
    pub fn get_pat(&self, cube: usize, var: usize) -> Pat {
        self.cubes[cube][var]
    }

    /// True when some cube is satisfied by `inputs`.
    pub fn eval(&self, inputs: &[bool]) -> bool {
        self.cubes
            .iter()
            .any(|cube| cube.iter().zip(inputs).all(|(p, &v)| p.matches(v)))
    }
}

impl fmt::Display for SopCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cube) in self.cubes.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            for p in cube.iter() {
                write!(f, "{}", p.to_char())?;
            }
        }
        Ok(())
    }
}

/// Parses a cube string, returning `None` on any character outside `01-`.
pub fn parse_cube(s: &str) -> Option<Cube> {
    s.chars().map(Pat::from_char).collect()
}
