//! String interner for identifiers.
//!
//! This is a single-table simplification of the teacher's sharded,
//! concurrent-compilation-oriented interner: this language evaluates
//! single-threaded with no incremental re-compilation, so there is no
//! need to shard for lock contention. One `RwLock`-guarded table is
//! sufficient and keeps `Name` a plain index.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::name::Name;

struct Table {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Table {
    fn new() -> Self {
        let mut table = Table {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        table.insert_new("");
        table
    }

    fn insert_new(&mut self, s: &str) -> u32 {
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} entries", u32::MAX));
        self.strings.push(leaked);
        self.map.insert(leaked, idx);
        idx
    }
}

/// Thread-safe string-to-[`Name`] interner.
///
/// `intern` is idempotent: interning the same string twice returns the
/// same `Name`. Strings are leaked to give them `'static` lifetime, which
/// is fine for a process that interns a bounded vocabulary of source
/// identifiers once per run.
pub struct StringInterner {
    table: RwLock<Table>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            table: RwLock::new(Table::new()),
        }
    }

    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.table.read().map.get(s) {
            return Name::from_raw(idx);
        }
        let mut table = self.table.write();
        if let Some(&idx) = table.map.get(s) {
            return Name::from_raw(idx);
        }
        Name::from_raw(table.insert_new(s))
    }

    pub fn resolve(&self, name: Name) -> &'static str {
        self.table.read().strings[name.raw() as usize]
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All interned identifiers, for did-you-mean suggestion lookups.
    pub fn all_names(&self) -> Vec<Name> {
        let table = self.table.read();
        (0..table.strings.len() as u32).map(Name::from_raw).collect()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("hello");
        let b = interner.intern("hello");
        assert_eq!(a.raw(), b.raw());
        assert_eq!(interner.resolve(a), "hello");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a.raw(), b.raw());
    }

    #[test]
    fn empty_string_preinterned_at_zero() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern("").raw(), 0);
    }
}
