//! End-to-end `source -> value` / `source -> error` tests (spec.md §8's
//! named scenarios), relocated out of individual module files the way the
//! teacher relocates broader integration tests into `ori_eval/src/tests/`.

mod scenario_tests;

use std::path::PathBuf;
use std::rc::Rc;

use vela_ir::StringInterner;
use vela_values::EvalResult;

use crate::context::EvalContext;

/// Parses and evaluates one module's source text through the same
/// pipeline `velac run` drives.
pub(crate) fn eval_source(source: &str) -> EvalResult {
    let interner = Rc::new(StringInterner::new());
    let (arena, root) = vela_parse::parse(source, &interner).unwrap_or_else(|err| panic!("parse error: {err}"));
    let ctx = EvalContext::new(interner, Vec::<PathBuf>::new(), "test");
    let env = crate::module::root_bindings(&ctx);
    crate::eval::evaluate(&arena, root, &env, &ctx)
}
