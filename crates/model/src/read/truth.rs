//! Truth-table (`.truth`) reader.

use std::path::Path;

use tracing::debug;

use crate::error::ReadError;
use crate::func::TvFunc;
use crate::model::Model;
use crate::read::{Location, STRING_SOURCE, parse_error, read_file};

impl Model {
    /// Reads a `.truth` file: one binary truth table per line, every line
    /// over the same number of variables.
    ///
    /// Each line becomes an output driven by a truth-table node over all the
    /// inputs. The leftmost character of a line is the highest assignment,
    /// whose most significant variable is input 0. The model is named after
    /// the file stem.
    pub fn read_truth(path: impl AsRef<Path>) -> Result<Model, ReadError> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let mut model = parse(&text, path)?;
        if let Some(stem) = path.file_stem() {
            model.set_name(stem.to_string_lossy());
        }
        Ok(model)
    }

    /// Reads `.truth` text from a string.
    pub fn read_truth_str(text: &str) -> Result<Model, ReadError> {
        parse(text, Path::new(STRING_SOURCE))
    }
}

fn parse(text: &str, path: &Path) -> Result<Model, ReadError> {
    let mut funcs: Vec<TvFunc> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let loc = Location::new(i + 1, 1);
        let tv = TvFunc::from_binary(line)
            .ok_or_else(|| parse_error(path, loc, "illegal truth table"))?;
        if let Some(first) = funcs.first() {
            if first.input_num() != tv.input_num() {
                return Err(parse_error(
                    path,
                    loc,
                    format!(
                        "expected a table over {} inputs, got {}",
                        first.input_num(),
                        tv.input_num()
                    ),
                ));
            }
        }
        funcs.push(tv);
    }

    let mut model = Model::new();
    let ni = funcs.first().map_or(0, TvFunc::input_num);
    let inputs: Vec<_> = (0..ni).map(|_| model.new_input("")).collect();
    let fanins: Vec<_> = inputs.iter().rev().copied().collect();
    for (k, tv) in funcs.into_iter().enumerate() {
        let id = model.new_tvfunc(&fanins, tv, "")?;
        model.new_output(id, format!("o{k}"))?;
    }

    model.wrap_up()?;
    debug!(
        inputs = model.input_num(),
        outputs = model.output_num(),
        funcs = model.func_num(),
        "read truth-table model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_truth() {
        // o0 = !i0 & i1, o1 = i0 ^ i1, o2 = i0 ^ i1 again
        let m = Model::read_truth_str("0010\n0110\n\n0110\n").unwrap();
        assert_eq!(m.input_num(), 2);
        assert_eq!(m.output_num(), 3);
        assert_eq!(m.logic_num(), 3);
        assert_eq!(m.func_num(), 2);
        assert_eq!(m.output_name(2).unwrap(), "o2");

        let o0 = m.output(0).unwrap();
        assert_eq!(o0.fanin(0).unwrap().id(), m.input_list()[1]);

        for k in 0..4 {
            let (i0, i1) = (k & 1 == 1, k & 2 == 2);
            let r = m.eval(&[i0, i1], &[]).unwrap();
            assert_eq!(r.outputs, vec![!i0 && i1, i0 ^ i1, i0 ^ i1], "i0 = {i0}, i1 = {i1}");
        }
    }

    #[test]
    fn test_read_truth_empty() {
        let m = Model::read_truth_str("").unwrap();
        assert_eq!(m.input_num(), 0);
        assert_eq!(m.output_num(), 0);
    }

    #[test]
    fn test_truth_errors() {
        let err = Model::read_truth_str("0110\n01\n").unwrap_err();
        assert_eq!(err.location(), Some(Location::new(2, 1)));
        assert!(err.to_string().contains("expected a table over 2 inputs, got 1"));

        let err = Model::read_truth_str("011\n").unwrap_err();
        assert!(err.to_string().contains("illegal truth table"));

        let err = Model::read_truth_str("0a10\n").unwrap_err();
        assert!(err.to_string().contains("illegal truth table"));
    }
}
