//! Evaluation context: the error side-channel (spec.md §4.8) plus the
//! module cache and import search path the module loader needs.
//!
//! Grounded in the teacher's `shared.rs` shared-registry idiom, but using
//! `Rc<RefCell<_>>` rather than `Arc<RwLock<_>>` since evaluation here is
//! single-threaded.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use vela_ir::StringInterner;
use vela_values::{NativeContext, StackFrame, Value};

/// Everything the evaluator needs beyond the arena and environment it is
/// handed per call: the shared interner, import resolution configuration,
/// the module cache, the active call stack, the set of known identifier
/// names (for did-you-mean), and the process-scoped crash-message slot.
pub struct EvalContext {
    pub interner: Rc<StringInterner>,
    pub import_search_paths: Vec<PathBuf>,
    module_cache: RefCell<FxHashMap<PathBuf, Value>>,
    call_stack: RefCell<Vec<StackFrame>>,
    known_names: RefCell<FxHashSet<Rc<str>>>,
    current_file: RefCell<Rc<str>>,
    crash_message: RefCell<Option<String>>,
}

impl EvalContext {
    pub fn new(
        interner: Rc<StringInterner>,
        import_search_paths: Vec<PathBuf>,
        entry_file: impl Into<Rc<str>>,
    ) -> Self {
        EvalContext {
            interner,
            import_search_paths,
            module_cache: RefCell::new(FxHashMap::default()),
            call_stack: RefCell::new(Vec::new()),
            known_names: RefCell::new(FxHashSet::default()),
            current_file: RefCell::new(entry_file.into()),
            crash_message: RefCell::new(None),
        }
    }

    pub fn current_file(&self) -> Rc<str> {
        self.current_file.borrow().clone()
    }

    /// Runs `f` with the active filename swapped to `file`, restoring the
    /// previous one on return whether `f` succeeds or fails (spec.md
    /// §4.7's "save and restore on return" rule).
    pub fn with_file<R>(&self, file: Rc<str>, f: impl FnOnce() -> R) -> R {
        let previous = self.current_file.replace(file);
        let result = f();
        self.current_file.replace(previous);
        result
    }

    pub fn push_frame(&self, frame: StackFrame) {
        self.call_stack.borrow_mut().push(frame);
    }

    pub fn pop_frame(&self) {
        self.call_stack.borrow_mut().pop();
    }

    pub fn snapshot_call_stack(&self) -> Vec<StackFrame> {
        self.call_stack.borrow().clone()
    }

    pub fn register_name(&self, name: &str) {
        if !self.known_names.borrow().contains(name) {
            self.known_names.borrow_mut().insert(Rc::from(name));
        }
    }

    pub fn known_names(&self) -> Vec<Rc<str>> {
        self.known_names.borrow().iter().cloned().collect()
    }

    pub fn cached_module(&self, path: &PathBuf) -> Option<Value> {
        self.module_cache.borrow().get(path).cloned()
    }

    pub fn cache_module(&self, path: PathBuf, value: Value) {
        self.module_cache.borrow_mut().insert(path, value);
    }
}

impl NativeContext for EvalContext {
    fn crash(&self, message: String) {
        *self.crash_message.borrow_mut() = Some(message);
    }

    fn apply(&self, func: Value, arg: Value) -> vela_values::EvalResult {
        crate::eval::apply_value(func, arg, vela_ir::Span::DUMMY, vela_ir::Span::DUMMY, None, self)
    }

    fn intern(&self, name: &str) -> vela_ir::Name {
        self.interner.intern(name)
    }

    fn resolve(&self, name: vela_ir::Name) -> &'static str {
        self.interner.resolve(name)
    }

    fn force(&self, value: Value) -> vela_values::EvalResult {
        crate::force::force(value, self)
    }
}

impl EvalContext {
    /// Reads and clears the crash slot. The driver calls this after
    /// evaluation completes (spec.md §5's "driver must clear it after
    /// reading").
    pub fn take_crash_message(&self) -> Option<String> {
        self.crash_message.borrow_mut().take()
    }
}
