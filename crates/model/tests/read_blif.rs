#![allow(unused_crate_dependencies)]

mod common;

use std::io::Write;

use bn_model::{Location, Model, ReadError};
use tempfile::NamedTempFile;

fn blif_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_s27() {
    let model = Model::read_blif(common::fixture("s27.blif")).unwrap();
    assert_eq!(model.name(), "s27");
    assert_eq!(model.input_num(), 4);
    assert_eq!(model.output_num(), 1);
    assert_eq!(model.seq_num(), 3);
    assert_eq!(model.logic_num(), 10);
    assert_eq!(model.func_num(), 5);
    assert_eq!(
        model.input_name_list().collect::<Vec<_>>(),
        ["G0", "G1", "G2", "G3"]
    );
    assert_eq!(model.output_name(0).unwrap(), "G17");

    let g5 = model.seq(0).unwrap();
    assert!(g5.is_dff());
    assert_eq!(g5.data_output().name(), "G5");
    assert_eq!(g5.data_src().unwrap().name(), "G10");
    assert_eq!(g5.rsval(), '0');

    // every fanin of a logic node comes earlier in the list or is not logic
    let mut seen = std::collections::HashSet::new();
    for i in 0..model.logic_num() {
        let node = model.logic(i).unwrap();
        for &fanin in node.fanin_list() {
            let f = model.node(fanin).unwrap();
            assert!(!f.is_logic() || seen.contains(&fanin), "{node} before {f}");
        }
        seen.insert(node.id());
    }
}

#[test]
#[ignore = "needs TESTDATA_DIR/s5378.blif"]
fn test_read_s5378() {
    let path = common::testdata_dir().join("s5378.blif");
    let model = Model::read_blif(&path).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(model.input_num(), 35);
    assert_eq!(model.output_num(), 49);
    assert_eq!(model.seq_num(), 179);
    assert_eq!(model.logic_num(), 2779);
}

#[test]
fn test_missing_file() {
    let err = Model::read_blif("/nonexistent/dir/missing.blif").unwrap_err();
    assert!(matches!(err, ReadError::Io { .. }));
}

#[test]
fn test_undefined_net() {
    let path = common::fixture("broken.blif");
    let err = Model::read_blif(&path).unwrap_err();
    assert_eq!(err.location(), Some(Location::new(4, 10)));
    let msg = err.to_string();
    assert!(msg.contains("broken.blif:4:10"), "{msg}");
    assert!(msg.contains("'c' is not defined"), "{msg}");
}

#[test]
fn test_duplicate_definition() {
    let file = blif_file(
        ".model dup\n\
         .inputs a\n\
         .outputs y\n\
         .names a y\n\
         1 1\n\
         .names a y\n\
         0 1\n\
         .end\n",
    );
    let err = Model::read_blif(file.path()).unwrap_err();
    assert_eq!(err.location(), Some(Location::new(6, 10)));
    assert!(err.to_string().contains("defined more than once"));
}

#[test]
fn test_cube_width_mismatch() {
    let file = blif_file(".model w\n.inputs a b\n.outputs y\n.names a b y\n1 1\n.end\n");
    let err = Model::read_blif(file.path()).unwrap_err();
    assert!(matches!(err, ReadError::Parse { .. }));
    assert!(err.to_string().contains("cube width mismatch"));
}

#[test]
fn test_output_pattern_mismatch() {
    let file = blif_file(".model p\n.inputs a b\n.outputs y\n.names a b y\n11 1\n00 0\n.end\n");
    let err = Model::read_blif(file.path()).unwrap_err();
    assert_eq!(err.location(), Some(Location::new(6, 4)));
    assert!(err.to_string().contains("output pattern mismatch"));
}

#[test]
fn test_missing_end_is_accepted() {
    let file = blif_file(".model e\n.inputs a\n.outputs y\n.names a y\n0 1\n");
    let model = Model::read_blif(file.path()).unwrap();
    assert_eq!(model.logic_num(), 1);
    assert_eq!(model.eval(&[false], &[]).unwrap().outputs, [true]);
}

#[test]
fn test_statements_after_end_ignored() {
    let file = blif_file(".model e\n.inputs a\n.outputs a\n.end\n.model other\n");
    let model = Model::read_blif(file.path()).unwrap();
    assert_eq!(model.name(), "e");
    assert_eq!(model.output(0).unwrap().name(), "a");
}
