use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Symbol kinds associated with an identifier.
/// Currently only plain identifiers and class names are distinguished,
/// further kinds are expected once later phases land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Identifier,
    Class,
}

/// A single source position at which an identifier was mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolReference {
    line: usize,
    column: usize,
}

impl SymbolReference {
    pub fn new(line: usize, column: usize) -> Self {
        SymbolReference { line, column }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Interning data shared between every handle of one symbol.
#[derive(Debug)]
struct SymbolData {
    identifier: String,
    kind: SymbolKind,
    scope: i64,
    references: Vec<SymbolReference>,
}

/// Shared handle to an interned identifier.
///
/// The symbol table and every AST node referring to the identifier hold
/// clones of the same handle. The identifier text is fixed at construction,
/// while the scope is assigned by the symbol table at interning time and the
/// reference list grows with every source position the identifier occurs at.
/// The backing data is freed when the last handle drops.
#[derive(Clone)]
pub struct Symbol {
    data: Rc<RefCell<SymbolData>>,
}

impl Symbol {
    /// Create a fresh symbol owning a copy of the identifier text with the
    /// creating source position attached as its first reference.
    pub fn new(identifier: &str, kind: SymbolKind, line: usize, column: usize) -> Self {
        log::trace!("creating new symbol '{}'", identifier);

        Symbol {
            data: Rc::new(RefCell::new(SymbolData {
                identifier: identifier.to_owned(),
                kind,
                scope: 0,
                references: vec![SymbolReference::new(line, column)],
            })),
        }
    }

    pub fn identifier(&self) -> String {
        self.data.borrow().identifier.clone()
    }

    pub fn kind(&self) -> SymbolKind {
        self.data.borrow().kind
    }

    pub fn scope(&self) -> i64 {
        self.data.borrow().scope
    }

    pub(crate) fn set_scope(&self, scope: i64) {
        self.data.borrow_mut().scope = scope;
    }

    /// All source positions recorded for this symbol, in insertion order.
    pub fn references(&self) -> Vec<SymbolReference> {
        self.data.borrow().references.clone()
    }

    /// The position the symbol was created at.
    pub fn first_reference(&self) -> Option<SymbolReference> {
        self.data.borrow().references.first().copied()
    }

    pub(crate) fn push_reference(&self, reference: SymbolReference) {
        self.data.borrow_mut().references.push(reference);
    }

    pub(crate) fn pop_reference(&self) -> Option<SymbolReference> {
        self.data.borrow_mut().references.pop()
    }

    /// Number of live handles to this symbol.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }

    /// Non-owning observer of this symbol, mainly for lifetime diagnostics.
    pub fn downgrade(&self) -> WeakSymbol {
        WeakSymbol {
            data: Rc::downgrade(&self.data),
        }
    }
}

/// Two symbol handles are equal when they share the same backing data.
impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("Symbol")
            .field("identifier", &data.identifier)
            .field("kind", &data.kind)
            .field("scope", &data.scope)
            .field("references", &data.references)
            .finish()
    }
}

/// Non-owning observer of a symbol, used to check whether the backing data
/// is still reachable from somewhere.
pub struct WeakSymbol {
    data: Weak<RefCell<SymbolData>>,
}

impl WeakSymbol {
    pub fn upgrade(&self) -> Option<Symbol> {
        self.data.upgrade().map(|data| Symbol { data })
    }
}
