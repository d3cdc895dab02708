//! AIGER readers, ASCII (`.aag`) and binary (`.aig`).

use std::path::Path;

use ahash::AHashMap;
use tracing::debug;

use crate::error::ReadError;
use crate::func::PrimType;
use crate::id::{NodeId, SeqId};
use crate::model::Model;
use crate::read::{Location, ReadOptions, STRING_SOURCE, parse_error, read_bytes, split_words};

impl Model {
    /// Reads an ASCII AIGER file.
    ///
    /// Latches become D flip-flops. When the file has latches, two extra
    /// inputs named by `options` are created for their clock and reset.
    pub fn read_aag(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Model, ReadError> {
        let path = path.as_ref();
        let data = read_bytes(path)?;
        AagParser::new(path, options, Format::Ascii).parse(&data)
    }

    /// Reads ASCII AIGER from a string.
    pub fn read_aag_str(text: &str, options: &ReadOptions) -> Result<Model, ReadError> {
        AagParser::new(Path::new(STRING_SOURCE), options, Format::Ascii).parse(text.as_bytes())
    }

    /// Reads a binary AIGER file.
    ///
    /// Builds the same model as [`Model::read_aag`] would for the ASCII form
    /// of the file.
    pub fn read_aig(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Model, ReadError> {
        let path = path.as_ref();
        let data = read_bytes(path)?;
        AagParser::new(path, options, Format::Binary).parse(&data)
    }

    /// Reads binary AIGER from memory.
    pub fn read_aig_bytes(data: &[u8], options: &ReadOptions) -> Result<Model, ReadError> {
        AagParser::new(Path::new(STRING_SOURCE), options, Format::Binary).parse(data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Ascii,
    Binary,
}

impl Format {
    fn magic(self) -> &'static str {
        match self {
            Format::Ascii => "aag",
            Format::Binary => "aig",
        }
    }
}

/// Cursor over the file contents. Text sections are read by line, the
/// binary AND section by byte.
#[derive(Debug)]
struct Cursor<'t> {
    data: &'t [u8],
    pos: usize,
    /// Lines consumed so far.
    line: usize,
}

impl<'t> Cursor<'t> {
    fn new(data: &'t [u8]) -> Self {
        Self {
            data,
            pos: 0,
            line: 0,
        }
    }

    /// Next line without its terminator, with its 1-based number.
    fn next_line(&mut self) -> Option<(usize, &'t [u8])> {
        let rest = self.data.get(self.pos..).filter(|r| !r.is_empty())?;
        let (line, used) = match rest.iter().position(|&b| b == b'\n') {
            Some(n) => (&rest[..n], n + 1),
            None => (rest, rest.len()),
        };
        self.pos += used;
        self.line += 1;
        Some((self.line, line.strip_suffix(b"\r").unwrap_or(line)))
    }

    /// Reads one unsigned number stored 7 bits per byte, low bits first,
    /// with the high bit set on every byte but the last.
    fn delta(&mut self) -> Option<usize> {
        let mut value = 0usize;
        let mut shift = 0u32;
        loop {
            let byte = *self.data.get(self.pos)?;
            self.pos += 1;
            let bits = usize::from(byte & 0x7f);
            if shift >= usize::BITS || (bits << shift) >> shift != bits {
                return None;
            }
            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Some(value);
            }
            shift += 7;
        }
    }

    /// Location just past the last line read.
    fn next_location(&self) -> Location {
        Location::new(self.line + 1, 1)
    }
}

struct AagParser<'p> {
    path: &'p Path,
    options: &'p ReadOptions,
    format: Format,
    model: Model,
    /// Node of each defined variable, keyed by `literal / 2`.
    vars: AHashMap<usize, NodeId>,
    const_nodes: [Option<NodeId>; 2],
    inverters: AHashMap<usize, NodeId>,
}

impl<'p> AagParser<'p> {
    fn new(path: &'p Path, options: &'p ReadOptions, format: Format) -> Self {
        Self {
            path,
            options,
            format,
            model: Model::new(),
            vars: AHashMap::new(),
            const_nodes: [None, None],
            inverters: AHashMap::new(),
        }
    }

    fn error(&self, loc: Location, message: impl Into<String>) -> ReadError {
        parse_error(self.path, loc, message)
    }

    fn text_line<'t>(
        &self,
        cur: &mut Cursor<'t>,
    ) -> Result<Option<(usize, &'t str)>, ReadError> {
        let Some((lineno, bytes)) = cur.next_line() else {
            return Ok(None);
        };
        let line = std::str::from_utf8(bytes)
            .map_err(|_| self.error(Location::new(lineno, 1), "invalid UTF-8 in text line"))?;
        Ok(Some((lineno, line)))
    }

    /// Reads the next line as exactly `n` numbers, or `n` or `n + 1` when
    /// `optional_last` is set.
    fn numbers(
        &self,
        cur: &mut Cursor<'_>,
        n: usize,
        optional_last: bool,
        what: &str,
    ) -> Result<(Vec<usize>, Location), ReadError> {
        let eof = cur.next_location();
        let Some((lineno, line)) = self.text_line(cur)? else {
            return Err(self.error(eof, format!("unexpected end of file in {what}")));
        };
        let loc = Location::new(lineno, 1);
        let mut nums = Vec::with_capacity(n + 1);
        for (col, w) in split_words(line) {
            let v = w.parse::<usize>().map_err(|_| {
                self.error(Location::new(lineno, col), format!("number expected, got '{w}'"))
            })?;
            nums.push(v);
        }
        if nums.len() == n || (optional_last && nums.len() == n + 1) {
            Ok((nums, loc))
        } else {
            Err(self.error(loc, format!("malformed {what} line")))
        }
    }

    /// Allocates the node for a variable defined by an input, latch or AND.
    fn define_var(
        &mut self,
        lit: usize,
        loc: Location,
        max_var: usize,
    ) -> Result<NodeId, ReadError> {
        let var = lit / 2;
        if lit % 2 == 1 || var == 0 {
            return Err(self.error(loc, format!("literal {lit} cannot be defined")));
        }
        if var > max_var {
            return Err(self.error(
                loc,
                format!("literal {lit} exceeds the maximum variable index"),
            ));
        }
        if self.vars.contains_key(&var) {
            return Err(self.error(loc, format!("literal {lit} is defined more than once")));
        }
        let id = self.model.new_node("");
        self.vars.insert(var, id);
        Ok(id)
    }

    /// Node and inversion for a literal used as an AND fanin.
    fn fanin(&mut self, lit: usize, loc: Location) -> Result<(NodeId, bool), ReadError> {
        let inv = lit % 2 == 1;
        if lit / 2 == 0 {
            return Ok((self.const_node(false)?, inv));
        }
        Ok((self.var_node(lit, loc)?, inv))
    }

    fn var_node(&self, lit: usize, loc: Location) -> Result<NodeId, ReadError> {
        self.vars
            .get(&(lit / 2))
            .copied()
            .ok_or_else(|| self.error(loc, format!("literal {lit} is not defined")))
    }

    fn const_node(&mut self, value: bool) -> Result<NodeId, ReadError> {
        let slot = usize::from(value);
        if let Some(id) = self.const_nodes[slot] {
            return Ok(id);
        }
        let prim = if value { PrimType::C1 } else { PrimType::C0 };
        let id = self.model.new_primitive(&[], prim, "")?;
        self.const_nodes[slot] = Some(id);
        Ok(id)
    }

    /// Node carrying the value of a literal, adding an inverter if needed.
    fn driver(&mut self, lit: usize, loc: Location) -> Result<NodeId, ReadError> {
        match lit {
            0 => return self.const_node(false),
            1 => return self.const_node(true),
            _ => {}
        }
        let node = self.var_node(lit, loc)?;
        if lit % 2 == 0 {
            return Ok(node);
        }
        if let Some(&inv) = self.inverters.get(&(lit / 2)) {
            return Ok(inv);
        }
        let inv = self.model.new_primitive(&[node], PrimType::Not, "")?;
        self.inverters.insert(lit / 2, inv);
        Ok(inv)
    }

    /// Parses `<magic> M I L O A`, returning the five counts.
    fn header(&self, cur: &mut Cursor<'_>) -> Result<[usize; 5], ReadError> {
        let header_loc = Location::new(1, 1);
        let magic = self.format.magic();
        let Some((_, header)) = self.text_line(cur)? else {
            return Err(self.error(header_loc, "empty file"));
        };
        let words: Vec<_> = header.split_whitespace().collect();
        let [first, rest @ ..] = words.as_slice() else {
            return Err(self.error(header_loc, format!("'{magic}' header expected")));
        };
        if *first != magic || rest.len() != 5 {
            return Err(self.error(header_loc, format!("'{magic} M I L O A' header expected")));
        }
        let mut counts = [0usize; 5];
        for (slot, w) in counts.iter_mut().zip(rest) {
            *slot = w
                .parse()
                .map_err(|_| self.error(header_loc, format!("number expected, got '{w}'")))?;
        }

        let [max_var, ni, nl, _, na] = counts;
        // every literal up to 2 * M + 1 must fit
        if max_var > usize::MAX / 2 {
            return Err(self.error(header_loc, format!("M = {max_var} is too large")));
        }
        let defined = ni
            .checked_add(nl)
            .and_then(|n| n.checked_add(na))
            .ok_or_else(|| self.error(header_loc, "I + L + A overflows"))?;
        match self.format {
            Format::Ascii if defined > max_var => {
                Err(self.error(header_loc, "M is smaller than I + L + A"))
            }
            Format::Binary if defined != max_var => {
                Err(self.error(header_loc, "M must equal I + L + A"))
            }
            _ => Ok(counts),
        }
    }

    fn parse(mut self, data: &[u8]) -> Result<Model, ReadError> {
        let mut cur = Cursor::new(data);
        let [max_var, ni, nl, no, na] = self.header(&mut cur)?;

        // Counts come from the file, so nothing is reserved up front.
        let mut input_ids = Vec::new();
        for i in 0..ni {
            let (lit, loc) = match self.format {
                Format::Ascii => {
                    let (nums, loc) = self.numbers(&mut cur, 1, false, "input")?;
                    (nums[0], loc)
                }
                Format::Binary => (2 * (i + 1), Location::new(1, 1)),
            };
            let id = self.define_var(lit, loc, max_var)?;
            self.model.set_input(id)?;
            input_ids.push(id);
        }

        let mut latches: Vec<(SeqId, usize, Location)> = Vec::new();
        for i in 0..nl {
            let (lit, rest, loc) = match self.format {
                Format::Ascii => {
                    let (mut nums, loc) = self.numbers(&mut cur, 2, true, "latch")?;
                    let lit = nums.remove(0);
                    (lit, nums, loc)
                }
                Format::Binary => {
                    let (nums, loc) = self.numbers(&mut cur, 1, true, "latch")?;
                    (2 * (ni + i + 1), nums, loc)
                }
            };
            let id = self.define_var(lit, loc, max_var)?;
            let rsval = match rest.get(1) {
                None | Some(0) => '0',
                Some(1) => '1',
                Some(&v) if v == lit => 'X',
                Some(v) => {
                    return Err(self.error(loc, format!("illegal latch initial value {v}")));
                }
            };
            let seq = self.model.add_dff(id, rsval)?;
            latches.push((seq, rest[0], loc));
        }

        let mut outputs = Vec::new();
        for _ in 0..no {
            let (nums, loc) = self.numbers(&mut cur, 1, false, "output")?;
            outputs.push((nums[0], loc));
        }

        let mut ands = Vec::new();
        for i in 0..na {
            let (lhs, rhs0, rhs1, loc) = match self.format {
                Format::Ascii => {
                    let (nums, loc) = self.numbers(&mut cur, 3, false, "and")?;
                    (nums[0], nums[1], nums[2], loc)
                }
                Format::Binary => self.binary_and(&mut cur, 2 * (ni + nl + i + 1))?,
            };
            let id = self.define_var(lhs, loc, max_var)?;
            ands.push((id, rhs0, rhs1, loc));
        }
        for (id, rhs0, rhs1, loc) in ands {
            let (src0, inv0) = self.fanin(rhs0, loc)?;
            let (src1, inv1) = self.fanin(rhs1, loc)?;
            self.model.set_aig(id, src0, inv0, src1, inv1)?;
        }

        for (i, &(lit, loc)) in outputs.iter().enumerate() {
            let src = self.driver(lit, loc)?;
            self.model.new_output(src, format!("o{i}"))?;
        }

        if !latches.is_empty() {
            let clock = self.model.new_input(self.options.clock_name.clone());
            let reset = self.model.new_input(self.options.reset_name.clone());
            for &(seq, next, loc) in &latches {
                let src = self.driver(next, loc)?;
                self.model.set_data_src(seq, src)?;
                self.model.set_clock(seq, clock)?;
                let rsval = self.model.seq(usize::from(seq))?.rsval();
                match rsval {
                    '0' => self.model.set_clear(seq, reset)?,
                    '1' => self.model.set_preset(seq, reset)?,
                    _ => {}
                }
            }
        }

        self.read_symbols(&mut cur, &input_ids, &latches)?;

        self.model.wrap_up()?;
        debug!(
            format = self.format.magic(),
            inputs = self.model.input_num(),
            outputs = self.model.output_num(),
            seqs = self.model.seq_num(),
            logic = self.model.logic_num(),
            "read AIGER model"
        );
        Ok(self.model)
    }

    /// Decodes one delta-encoded AND gate whose left side is `lhs`.
    fn binary_and(
        &self,
        cur: &mut Cursor<'_>,
        lhs: usize,
    ) -> Result<(usize, usize, usize, Location), ReadError> {
        let loc = cur.next_location();
        let (Some(d0), Some(d1)) = (cur.delta(), cur.delta()) else {
            return Err(self.error(loc, format!("truncated or oversized delta for AND {lhs}")));
        };
        let rhs0 = lhs
            .checked_sub(d0)
            .filter(|_| d0 > 0)
            .ok_or_else(|| self.error(loc, format!("invalid delta {d0} for AND {lhs}")))?;
        let rhs1 = rhs0
            .checked_sub(d1)
            .ok_or_else(|| self.error(loc, format!("invalid delta {d1} for AND {lhs}")))?;
        Ok((lhs, rhs0, rhs1, loc))
    }

    /// Applies the symbol table and the comment section.
    fn read_symbols(
        &mut self,
        cur: &mut Cursor<'_>,
        input_ids: &[NodeId],
        latches: &[(SeqId, usize, Location)],
    ) -> Result<(), ReadError> {
        while let Some((lineno, line)) = self.text_line(cur)? {
            let loc = Location::new(lineno, 1);
            if line == "c" || line.starts_with("c ") {
                let mut comment = vec![line.get(2..).unwrap_or_default().to_string()];
                while let Some((_, l)) = cur.next_line() {
                    comment.push(String::from_utf8_lossy(l).into_owned());
                }
                self.model.set_comment(comment.join("\n").trim());
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }
            let Some((key, name)) = line.split_once(' ') else {
                return Err(self.error(loc, "malformed symbol"));
            };
            let mut chars = key.chars();
            let kind = chars.next();
            let pos: usize = chars
                .as_str()
                .parse()
                .map_err(|_| self.error(loc, format!("malformed symbol '{key}'")))?;
            match kind {
                Some('i') => {
                    let id = *input_ids
                        .get(pos)
                        .ok_or_else(|| self.error(loc, format!("input {pos} does not exist")))?;
                    self.model.set_node_name(id, name)?;
                }
                Some('l') => {
                    let &(seq, _, _) = latches
                        .get(pos)
                        .ok_or_else(|| self.error(loc, format!("latch {pos} does not exist")))?;
                    self.model.set_seq_name(seq, name)?;
                    let out = self.model.seq(usize::from(seq))?.data_output().id();
                    self.model.set_node_name(out, name)?;
                }
                Some('o') => {
                    if pos >= self.model.output_num() {
                        return Err(self.error(loc, format!("output {pos} does not exist")));
                    }
                    self.model.set_output_name(pos, name)?;
                }
                _ => return Err(self.error(loc, format!("unknown symbol '{key}'"))),
            }
        }
        Ok(())
    }
}
