use std::cell::Cell;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};

use derive_more::From;

/// Counter value a [`Symbol`] was created with.
#[derive(PartialEq, Eq, Clone, PartialOrd, Ord, Debug, Copy, Hash, From)]
pub struct SymbolId(pub usize);

/// Boolean variable of a [`crate::formula::Formula`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    id: SymbolId,
    name: String,
}

impl Symbol {
    pub(crate) fn new(template: &str, id: SymbolId) -> Symbol {
        let name = if template.contains("{}") {
            template.replacen("{}", &id.0.to_string(), 1)
        } else {
            format!("{template}_{}", id.0)
        };

        Symbol { id, name }
    }

    #[must_use]
    pub fn id(&self) -> SymbolId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Source of the counters that make symbol names fresh.
pub trait SymbolGenerator {
    fn next_id(&self) -> SymbolId;
}

static NEXT_SYMBOL_ID: AtomicUsize = AtomicUsize::new(0);

/// Process-wide counter. Every symbol created through it, by any manager on
/// any thread, gets a distinct id.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalCounter;

impl SymbolGenerator for GlobalCounter {
    fn next_id(&self) -> SymbolId {
        SymbolId(NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Counter local to a single generator. Ids are deterministic, which makes
/// symbol names reproducible, but they are only unique per generator.
#[derive(Debug, Default)]
pub struct LocalCounter {
    next: Cell<usize>,
}

impl LocalCounter {
    #[must_use]
    pub fn starting_at(first: usize) -> Self {
        LocalCounter {
            next: Cell::new(first),
        }
    }
}

impl SymbolGenerator for LocalCounter {
    fn next_id(&self) -> SymbolId {
        let id = self.next.get();
        self.next.set(id + 1);
        SymbolId(id)
    }
}
