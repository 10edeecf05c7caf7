//! Module resolution, loading, and stdlib auto-import (spec.md §4.7).

use std::path::{Path, PathBuf};
use std::rc::Rc;

use vela_ir::Span;
use vela_values::{module_not_found, Environment, EvalResult, Value};

use crate::context::EvalContext;

const FILE_EXTENSION: &str = "vela";

/// Resolves and loads a user `import "path"` expression. Searches the
/// configured import paths (spec.md §6's colon-separated environment
/// variable), honoring `./`/`../` relative resolution against the active
/// file's directory. Caches by resolved path.
pub fn import(path: &str, path_span: Span, ctx: &EvalContext) -> EvalResult {
    let _span = tracing::debug_span!("import", path).entered();

    let resolved = resolve(path, ctx).ok_or_else(|| module_not_found(path).at(path_span))?;

    if let Some(cached) = ctx.cached_module(&resolved) {
        tracing::debug!(resolved = %resolved.display(), "module cache hit");
        return Ok(cached);
    }

    let source = std::fs::read_to_string(&resolved).map_err(|_| module_not_found(path).at(path_span))?;
    let module_dir: Rc<str> = Rc::from(resolved.to_string_lossy().as_ref());

    let value = ctx.with_file(module_dir, || load_module(&source, ctx))?;
    ctx.cache_module(resolved, value.clone());
    Ok(value)
}

fn load_module(source: &str, ctx: &EvalContext) -> EvalResult {
    let _span = tracing::debug_span!("load_module", file = %ctx.current_file()).entered();
    let (arena, root) =
        vela_parse::parse(source, &ctx.interner).map_err(|err| vela_values::invalid_argument(err.to_string()))?;
    let env = root_bindings(ctx);
    crate::eval::evaluate(&arena, root, &env, ctx)
}

fn resolve(path: &str, ctx: &EvalContext) -> Option<PathBuf> {
    let with_extension = ensure_extension(path);

    if path.starts_with("./") || path.starts_with("../") {
        let base = Path::new(&*ctx.current_file()).parent().unwrap_or_else(|| Path::new("."));
        let candidate = base.join(&with_extension);
        return candidate.is_file().then_some(candidate);
    }

    for search_path in &ctx.import_search_paths {
        let candidate = search_path.join(&with_extension);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}

fn ensure_extension(path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.extension().is_some() {
        candidate
    } else {
        candidate.with_extension(FILE_EXTENSION)
    }
}

/// Builds the environment every module (and the top-level program) starts
/// with: the native builtin registry plus the ten auto-imported stdlib
/// modules, with `Basics`'s own fields additionally bound unqualified.
pub fn root_bindings(ctx: &EvalContext) -> Environment {
    let modules = crate::builtins::stdlib_modules(ctx);
    let mut table = rustc_hash::FxHashMap::default();
    for (name, value) in &modules {
        table.insert(ctx.interner.intern(name), value.clone());
    }

    let mut env = Environment::root().extend_batch(table);

    if let Some((_, Value::Object(basics))) = modules.iter().find(|(name, _)| *name == "Basics") {
        let mut unqualified = rustc_hash::FxHashMap::default();
        for field in &basics.fields {
            unqualified.insert(ctx.interner.intern(&field.name), field.value.clone());
        }
        env = env.extend_batch(unqualified);
    }

    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ctx() -> EvalContext {
        EvalContext::new(Rc::new(vela_ir::StringInterner::new()), Vec::<PathBuf>::new(), "test")
    }

    #[test]
    fn unresolvable_path_is_module_not_found() {
        let ctx = ctx();
        let err = import("./does/not/exist", Span::DUMMY, &ctx).unwrap_err();
        assert!(matches!(err.kind, vela_values::ErrorKind::ModuleNotFound { .. }));
    }

    #[test]
    fn root_bindings_installs_auto_imported_modules() {
        let ctx = ctx();
        let env = root_bindings(&ctx);
        assert!(env.lookup(ctx.interner.intern("Array")).is_some());
        assert!(env.lookup(ctx.interner.intern("Math")).is_some());
    }

    #[test]
    fn basics_fields_are_also_bound_unqualified() {
        let ctx = ctx();
        let env = root_bindings(&ctx);
        assert!(env.lookup(ctx.interner.intern("identity")).is_some());
    }
}
