//! Runtime values and the supporting plumbing (environments, thunks,
//! errors) that the evaluator operates on.
//!
//! `Value`, `Environment`, and `Thunk` are mutually recursive — a closure's
//! captured environment can hold thunks, thunks hold environments, and
//! environments bind values — so, unlike the teacher's split between a
//! value crate and an eval crate, they have to live together here. See
//! `DESIGN.md` for why the teacher's own split (`FunctionValue` snapshots a
//! flat capture map instead of chaining a full scope) doesn't apply to a
//! lazy language. `vela_eval` depends on this crate for all of it and adds
//! only the expression-walking logic on top.

mod environment;
mod errors;
mod heap;
mod scalar_int;
mod thunk;
mod value;

pub use environment::Environment;
pub use errors::{
    cyclic_reference, division_by_zero, expected_function, field_not_found, index_out_of_bounds,
    invalid_argument, module_not_found, overflow, type_mismatch, unknown_field,
    unknown_identifier, user_crash, wrong_number_of_arguments, ErrorKind, EvalError, EvalResult,
    SecondarySpan, StackFrame,
};
pub use heap::Heap;
pub use scalar_int::ScalarInt;
pub use thunk::{ThunkCell, ThunkState};
pub use value::{
    FunctionValue, NativeContext, NativeFn, ObjectValue, PartialApp, RangeValue, Value, ValueField,
};
