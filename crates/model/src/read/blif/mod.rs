//! BLIF reader.

mod scanner;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::ReadError;
use crate::func::{Cube, Pat, SopCover};
use crate::id::NodeId;
use crate::model::Model;
use crate::read::{Location, NetTable, STRING_SOURCE, parse_error, read_file};

use scanner::{Scanner, Token, TokenKind};

/// Statements that carry timing or wiring annotations only.
const SKIPPED_STATEMENTS: &[&str] = &[
    ".wire_load_slope",
    ".wire",
    ".input_arrival",
    ".default_input_arrival",
    ".output_required",
    ".default_output_required",
    ".input_drive",
    ".default_input_drive",
    ".output_load",
    ".default_output_load",
];

/// Latch trigger types accepted in `.latch` statements.
const LATCH_TYPES: &[&str] = &["fe", "re", "ah", "al", "as"];

impl Model {
    /// Reads a BLIF file.
    ///
    /// # Errors
    ///
    /// [`ReadError::Io`] if the file cannot be read, [`ReadError::Parse`] on
    /// malformed input and [`ReadError::Model`] if the network fails
    /// [`Model::wrap_up`].
    pub fn read_blif(path: impl AsRef<Path>) -> Result<Model, ReadError> {
        let path = path.as_ref();
        let text = read_file(path)?;
        BlifParser::new(&text, path).parse()
    }

    /// Reads BLIF from a string.
    pub fn read_blif_str(text: &str) -> Result<Model, ReadError> {
        BlifParser::new(text, Path::new(STRING_SOURCE)).parse()
    }
}

type Line<'a> = Vec<Token<'a>>;

struct BlifParser<'a, 'p> {
    scanner: Scanner<'a>,
    path: &'p Path,
    model: Model,
    nets: NetTable,
    pending: Option<Line<'a>>,
    eof: Location,
}

impl<'a, 'p> BlifParser<'a, 'p> {
    fn new(text: &'a str, path: &'p Path) -> Self {
        Self {
            scanner: Scanner::new(text),
            path,
            model: Model::new(),
            nets: NetTable::default(),
            pending: None,
            eof: Location::new(1, 1),
        }
    }

    fn error(&self, loc: Location, message: impl Into<String>) -> ReadError {
        parse_error(self.path, loc, message)
    }

    /// Next non-empty line, or `None` at end of input.
    fn next_line(&mut self) -> Option<Line<'a>> {
        if let Some(line) = self.pending.take() {
            return Some(line);
        }
        let mut line = Vec::new();
        loop {
            let tok = self.scanner.next_token();
            match tok.kind {
                TokenKind::Word => line.push(tok),
                TokenKind::Nl if line.is_empty() => {}
                TokenKind::Nl => return Some(line),
                TokenKind::Eof => {
                    self.eof = tok.loc;
                    return (!line.is_empty()).then_some(line);
                }
            }
        }
    }

    fn parse(mut self) -> Result<Model, ReadError> {
        let mut seen_model = false;
        let mut seen_end = false;

        while let Some(line) = self.next_line() {
            let head = line[0];
            if seen_end {
                warn!(
                    "{}:{}: statements after '.end' are ignored",
                    self.path.display(),
                    head.loc
                );
                break;
            }
            match head.text {
                ".model" => {
                    if seen_model {
                        return Err(self.error(head.loc, "duplicate '.model'"));
                    }
                    let name = line
                        .get(1)
                        .ok_or_else(|| self.error(head.loc, "model name expected after '.model'"))?;
                    self.model.set_name(name.text);
                    seen_model = true;
                }
                _ if !seen_model => {
                    return Err(self.error(head.loc, "'.model' expected"));
                }
                ".inputs" => self.parse_inputs(&line)?,
                ".outputs" => self.parse_outputs(&line)?,
                ".names" => self.parse_names(&line)?,
                ".latch" => self.parse_latch(&line)?,
                ".gate" | ".mlatch" => {
                    if !self.model.library().is_valid() {
                        return Err(self.error(
                            head.loc,
                            format!("'{}' requires a cell library", head.text),
                        ));
                    }
                }
                ".exdc" => self.skip_exdc(head.loc)?,
                ".end" => seen_end = true,
                s if SKIPPED_STATEMENTS.contains(&s) => {
                    debug!("{}:{}: skipping '{s}'", self.path.display(), head.loc);
                }
                s if s.starts_with('.') => {
                    return Err(self.error(head.loc, format!("unknown statement '{s}'")));
                }
                _ => {
                    return Err(self.error(head.loc, "cube line outside of '.names'"));
                }
            }
        }

        if !seen_model {
            return Err(self.error(self.eof, "'.model' expected"));
        }
        if !seen_end {
            warn!("{}: '.end' is missing", self.path.display());
        }
        if let Some((name, loc)) = self.nets.first_undefined() {
            return Err(self.error(loc, format!("'{name}' is not defined")));
        }

        let nets = self.nets.len();
        let mut model = self.model;
        model.wrap_up()?;
        debug!(
            name = model.name(),
            nets,
            inputs = model.input_num(),
            outputs = model.output_num(),
            seqs = model.seq_num(),
            logic = model.logic_num(),
            "read BLIF model"
        );
        Ok(model)
    }

    fn define(&mut self, tok: &Token<'a>) -> Result<NodeId, ReadError> {
        self.nets
            .define(&mut self.model, tok.text, tok.loc)
            .map_err(|msg| self.error(tok.loc, msg))
    }

    fn reference(&mut self, tok: &Token<'a>) -> NodeId {
        self.nets.reference(&mut self.model, tok.text, tok.loc)
    }

    fn parse_inputs(&mut self, line: &[Token<'a>]) -> Result<(), ReadError> {
        if line.len() == 1 {
            warn!("{}:{}: empty '.inputs'", self.path.display(), line[0].loc);
        }
        for tok in &line[1..] {
            let id = self.define(tok)?;
            self.model.set_input(id)?;
        }
        Ok(())
    }

    fn parse_outputs(&mut self, line: &[Token<'a>]) -> Result<(), ReadError> {
        if line.len() == 1 {
            warn!("{}:{}: empty '.outputs'", self.path.display(), line[0].loc);
        }
        for tok in &line[1..] {
            let id = self.reference(tok);
            self.model.new_output(id, tok.text)?;
        }
        Ok(())
    }

    fn parse_names(&mut self, line: &[Token<'a>]) -> Result<(), ReadError> {
        let Some((out, ins)) = line[1..].split_last() else {
            return Err(self.error(line[0].loc, "output name expected after '.names'"));
        };
        let ni = ins.len();

        let mut cubes: Vec<Cube> = Vec::new();
        let mut opat: Option<char> = None;
        while let Some(cube_line) = self.next_line() {
            if cube_line[0].text.starts_with('.') {
                self.pending = Some(cube_line);
                break;
            }
            let (cube_tok, out_tok) = match (ni, cube_line.as_slice()) {
                (0, [o]) => (None, o),
                (n, [c, o]) if n > 0 => (Some(c), o),
                _ => return Err(self.error(cube_line[0].loc, "malformed cube line")),
            };

            let cube: Cube = match cube_tok {
                None => Box::new([]),
                Some(tok) => {
                    let width = tok.text.chars().count();
                    if width != ni {
                        return Err(self.error(
                            tok.loc,
                            format!("cube width mismatch: expected {ni}, got {width}"),
                        ));
                    }
                    tok.text
                        .chars()
                        .map(|c| {
                            Pat::from_char(c).ok_or_else(|| {
                                self.error(tok.loc, format!("illegal character '{c}' in cube"))
                            })
                        })
                        .collect::<Result<_, _>>()?
                }
            };

            let o = match out_tok.text {
                "0" => '0',
                "1" => '1',
                s => {
                    return Err(self.error(out_tok.loc, format!("illegal output pattern '{s}'")));
                }
            };
            match opat {
                Some(prev) if prev != o => {
                    return Err(self.error(
                        out_tok.loc,
                        format!("output pattern mismatch: expected '{prev}', got '{o}'"),
                    ));
                }
                _ => opat = Some(o),
            }
            cubes.push(cube);
        }

        let fanins: Vec<_> = ins.iter().map(|tok| self.reference(tok)).collect();
        let node = self.define(out)?;
        let Some(cover) = SopCover::new(ni, cubes) else {
            return Err(self.error(out.loc, "cube width mismatch"));
        };
        // an empty table is constant 0
        let output_inv = opat == Some('0');
        self.model.set_cover(node, &fanins, cover, output_inv)?;
        Ok(())
    }

    fn parse_latch(&mut self, line: &[Token<'a>]) -> Result<(), ReadError> {
        let args = &line[1..];
        let (input, output, control, init) = match args {
            [i, o] => (i, o, None, None),
            [i, o, v] => (i, o, None, Some(v)),
            [i, o, t, c] => (i, o, Some((t, c)), None),
            [i, o, t, c, v] => (i, o, Some((t, c)), Some(v)),
            _ => return Err(self.error(line[0].loc, "malformed '.latch'")),
        };

        // a missing initial value means unknown
        let rsval = match init.map(|t| t.text) {
            Some("0") => '0',
            Some("1") => '1',
            None | Some("2") | Some("3") => 'X',
            Some(s) => {
                let loc = init.map_or(line[0].loc, |t| t.loc);
                return Err(self.error(loc, format!("illegal latch initial value '{s}'")));
            }
        };

        let out = self.define(output)?;
        let seq = self.model.add_dff(out, rsval)?;
        let src = self.reference(input);
        self.model.set_data_src(seq, src)?;

        if let Some((ty, ctrl)) = control {
            if !LATCH_TYPES.contains(&ty.text) {
                return Err(self.error(ty.loc, format!("illegal latch type '{}'", ty.text)));
            }
            if ctrl.text != "NIL" {
                let clock = self.reference(ctrl);
                self.model.set_clock(seq, clock)?;
            }
        }
        Ok(())
    }

    /// Skips an external don't-care network up to its `.end`.
    fn skip_exdc(&mut self, loc: Location) -> Result<(), ReadError> {
        while let Some(line) = self.next_line() {
            if line[0].text == ".end" {
                return Ok(());
            }
        }
        Err(self.error(loc, "'.end' expected after '.exdc'"))
    }
}
