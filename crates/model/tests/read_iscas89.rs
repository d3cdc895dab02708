#![allow(unused_crate_dependencies)]

mod common;

use bn_model::{Model, NodeKind, PrimType};

#[test]
fn test_read_s27_bench() {
    let model = Model::read_iscas89(common::fixture("s27.bench")).unwrap();
    assert_eq!(model.name(), "s27");
    assert_eq!(model.input_num(), 4);
    assert_eq!(model.output_num(), 1);
    assert_eq!(model.seq_num(), 3);
    assert_eq!(model.logic_num(), 10);
    // NOT, AND, OR, NAND and NOR, each over a fixed input count
    assert_eq!(model.func_num(), 5);

    let g17 = model.output(0).unwrap();
    assert_eq!(g17.name(), "G17");
    assert!(matches!(g17.kind(), NodeKind::Logic { .. }));
    assert!(matches!(
        g17.func(),
        Some(bn_model::Func::Primitive {
            prim: PrimType::Not,
            ..
        })
    ));
}

#[test]
fn test_s27_formats_agree() {
    let blif = Model::read_blif(common::fixture("s27.blif")).unwrap();
    let bench = Model::read_iscas89(common::fixture("s27.bench")).unwrap();
    assert_eq!(blif.input_num(), bench.input_num());
    assert_eq!(blif.seq_num(), bench.seq_num());
    for (a, b) in blif.seq_list().zip(bench.seq_list()) {
        assert_eq!(a.data_output().name(), b.data_output().name());
    }

    for inputs in 0..16u32 {
        for state in 0..8u32 {
            let iv: Vec<bool> = (0..4).map(|i| (inputs >> i) & 1 == 1).collect();
            let sv: Vec<bool> = (0..3).map(|i| (state >> i) & 1 == 1).collect();
            let r1 = blif.eval(&iv, &sv).unwrap();
            let r2 = bench.eval(&iv, &sv).unwrap();
            assert_eq!(r1, r2, "inputs = {inputs:04b}, state = {state:03b}");
        }
    }
}

#[test]
fn test_missing_bench_file() {
    let err = Model::read_iscas89("/nonexistent/s27.bench").unwrap_err();
    assert!(matches!(err, bn_model::ReadError::Io { .. }));
}
