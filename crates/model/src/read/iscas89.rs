//! ISCAS'89 `.bench` reader.

use std::path::Path;

use tracing::debug;

use crate::error::ReadError;
use crate::func::PrimType;
use crate::model::Model;
use crate::read::{Location, NetTable, STRING_SOURCE, parse_error, read_file};

impl Model {
    /// Reads an ISCAS'89 `.bench` file.
    ///
    /// The model is named after the file stem.
    pub fn read_iscas89(path: impl AsRef<Path>) -> Result<Model, ReadError> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let mut model = parse(&text, path)?;
        if let Some(stem) = path.file_stem() {
            model.set_name(stem.to_string_lossy());
        }
        Ok(model)
    }

    /// Reads `.bench` text from a string.
    pub fn read_iscas89_str(text: &str) -> Result<Model, ReadError> {
        parse(text, Path::new(STRING_SOURCE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tok<'a> {
    Name(&'a str),
    Eq,
    LParen,
    RParen,
    Comma,
}

/// Tokenizes one line, comments already removed.
fn lex(line: &str, lineno: usize) -> Vec<(Tok<'_>, Location)> {
    let mut toks = Vec::new();
    let mut chars = line.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        let loc = Location::new(lineno, line[..start].chars().count() + 1);
        let tok = match c {
            '=' => Tok::Eq,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            ',' => Tok::Comma,
            c if c.is_whitespace() => continue,
            _ => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || "=(),".contains(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                Tok::Name(&line[start..end])
            }
        };
        toks.push((tok, loc));
    }
    toks
}

fn parse(text: &str, path: &Path) -> Result<Model, ReadError> {
    let mut model = Model::new();
    let mut nets = NetTable::default();
    let err = |loc, msg: String| parse_error(path, loc, msg);

    for (i, raw) in text.lines().enumerate() {
        let lineno = i + 1;
        let line = raw.split('#').next().unwrap_or_default();
        let toks = lex(line, lineno);
        let Some(&(_, first_loc)) = toks.first() else {
            continue;
        };

        match toks.as_slice() {
            [(Tok::Name(kw), _), (Tok::LParen, _), (Tok::Name(name), loc), (Tok::RParen, _)]
                if matches!(*kw, "INPUT" | "input") =>
            {
                let id = nets
                    .define(&mut model, name, *loc)
                    .map_err(|m| err(*loc, m))?;
                model.set_input(id)?;
            }
            [(Tok::Name(kw), _), (Tok::LParen, _), (Tok::Name(name), loc), (Tok::RParen, _)]
                if matches!(*kw, "OUTPUT" | "output") =>
            {
                let id = nets.reference(&mut model, name, *loc);
                model.new_output(id, *name)?;
            }
            [
                (Tok::Name(name), name_loc),
                (Tok::Eq, _),
                (Tok::Name(gate), gate_loc),
                (Tok::LParen, _),
                rest @ ..,
            ] => {
                let fanin_names = parse_args(rest).ok_or_else(|| {
                    err(*gate_loc, format!("malformed argument list for '{gate}'"))
                })?;
                let id = nets
                    .define(&mut model, name, *name_loc)
                    .map_err(|m| err(*name_loc, m))?;
                let fanins: Vec<_> = fanin_names
                    .iter()
                    .map(|&(n, loc)| nets.reference(&mut model, n, loc))
                    .collect();

                if matches!(*gate, "DFF" | "dff") {
                    let [src] = fanins.as_slice() else {
                        return Err(err(*gate_loc, "DFF takes exactly one input".to_string()));
                    };
                    let seq = model.add_dff(id, ' ')?;
                    model.set_data_src(seq, *src)?;
                    continue;
                }

                let prim: PrimType = gate
                    .parse()
                    .map_err(|()| err(*gate_loc, format!("unknown gate type '{gate}'")))?;
                if let Some(required) = prim.arity_violation(fanins.len()) {
                    let msg = match prim {
                        PrimType::C0 | PrimType::C1 | PrimType::Buff | PrimType::Not => {
                            format!("{prim} takes {required} inputs, got {}", fanins.len())
                        }
                        _ => format!("{prim} takes at least one input"),
                    };
                    return Err(err(*gate_loc, msg));
                }
                model.set_primitive(id, &fanins, prim)?;
            }
            _ => return Err(err(first_loc, "syntax error".to_string())),
        }
    }

    if let Some((name, loc)) = nets.first_undefined() {
        return Err(err(loc, format!("'{name}' is not defined")));
    }

    model.wrap_up()?;
    debug!(
        inputs = model.input_num(),
        outputs = model.output_num(),
        seqs = model.seq_num(),
        logic = model.logic_num(),
        "read ISCAS89 model"
    );
    Ok(model)
}

/// Parses `a, b, c)` into names. An empty list `)` is allowed.
fn parse_args<'a>(toks: &[(Tok<'a>, Location)]) -> Option<Vec<(&'a str, Location)>> {
    let mut names = Vec::new();
    let mut rest = toks;
    if let [(Tok::RParen, _)] = rest {
        return Some(names);
    }
    loop {
        match rest {
            [(Tok::Name(n), loc), (Tok::Comma, _), tail @ ..] => {
                names.push((*n, *loc));
                rest = tail;
            }
            [(Tok::Name(n), loc), (Tok::RParen, _)] => {
                names.push((*n, *loc));
                return Some(names);
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex() {
        let toks: Vec<_> = lex("G1 = NAND(G2,  G3)", 7).into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            toks,
            vec![
                Tok::Name("G1"),
                Tok::Eq,
                Tok::Name("NAND"),
                Tok::LParen,
                Tok::Name("G2"),
                Tok::Comma,
                Tok::Name("G3"),
                Tok::RParen,
            ]
        );
        let (_, loc) = lex("  x = NOT(y)", 7)[0];
        assert_eq!(loc, Location::new(7, 3));
    }

    #[test]
    fn test_read_bench() {
        let m = Model::read_iscas89_str(
            "# tiny\n\
             INPUT(a)\n\
             INPUT(b)\n\
             OUTPUT(y)\n\
             OUTPUT(q)\n\
             q = DFF(y)\n\
             t = and(a, q)\n\
             one = CONST1()\n\
             y = XOR(t, b, one)\n",
        )
        .unwrap();
        assert_eq!(m.input_num(), 2);
        assert_eq!(m.output_num(), 2);
        assert_eq!(m.seq_num(), 1);
        assert_eq!(m.logic_num(), 3);
        assert_eq!(m.func_num(), 3);

        let r = m.eval(&[true, false], &[true]).unwrap();
        // t = 1, y = 1 ^ 0 ^ 1
        assert_eq!(r.outputs, vec![false, true]);
        assert_eq!(r.next_state, vec![false]);
    }

    #[test]
    fn test_bench_errors() {
        let err = Model::read_iscas89_str("INPUT(a)\ny = FOO(a)\n").unwrap_err();
        assert_eq!(err.location(), Some(Location::new(2, 5)));
        assert!(err.to_string().contains("unknown gate type 'FOO'"));

        let err = Model::read_iscas89_str("INPUT(a)\ny = NOT(a, a)\n").unwrap_err();
        assert!(err.to_string().contains("NOT takes 1 inputs, got 2"));

        let err = Model::read_iscas89_str("INPUT(a)\nOUTPUT(y)\n").unwrap_err();
        assert!(err.to_string().contains("'y' is not defined"));

        let err = Model::read_iscas89_str("INPUT(a)\ny = AND(a,)\n").unwrap_err();
        assert!(err.to_string().contains("malformed argument list"));

        let err = Model::read_iscas89_str("INPUT a\n").unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }
}
