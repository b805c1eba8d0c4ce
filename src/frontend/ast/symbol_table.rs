use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::symbol::{Symbol, SymbolReference};

/// Errors the symbol table reports back to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolTableError {
    /// An identifier was declared twice within the same scope. The table
    /// keeps the first declaration, the caller decides how to continue.
    #[error(
        "multiple declaration of identifier '{identifier}' at {line}:{column}, \
         first declared at {previous_line}:{previous_column}"
    )]
    DuplicateDeclaration {
        identifier: String,
        line: usize,
        column: usize,
        previous_line: usize,
        previous_column: usize,
    },
}

/// Scoped registry interning identifiers into shared symbols.
///
/// Symbols are stored per identifier as a chain ordered innermost scope last,
/// so the newest visible declaration shadows outer ones. Two modes drive
/// `add_symbol`: in declaration mode a symbol binds the identifier in the
/// current scope, outside of it the symbol is folded into the already known
/// one and only contributes its source position.
pub struct SymbolTable {
    current_scope: i64,
    declaration_mode: bool,
    symbols: HashMap<String, Vec<Symbol>>,
}

impl SymbolTable {
    /// Create an empty symbol table sitting in the outermost scope.
    pub fn new() -> Self {
        log::trace!("creating new symboltable");

        SymbolTable {
            current_scope: 0,
            declaration_mode: false,
            symbols: HashMap::new(),
        }
    }

    pub fn current_scope(&self) -> i64 {
        self.current_scope
    }

    pub fn enter_scope(&mut self) {
        self.current_scope += 1;

        log::debug!("entering new scope: {}", self.current_scope);
    }

    /// Leave the current scope, dropping every symbol that was interned in
    /// it. Handles held by AST nodes keep such symbols alive, the table
    /// merely stops indexing them.
    pub fn exit_scope(&mut self) {
        log::debug!("leaving scope: {}", self.current_scope);

        let current_scope = self.current_scope;
        self.symbols.retain(|_, chain| {
            while chain
                .last()
                .map(|symbol| symbol.scope() == current_scope)
                .unwrap_or(false)
            {
                chain.pop();
            }
            !chain.is_empty()
        });

        self.current_scope -= 1;
    }

    pub fn enter_declaration_mode(&mut self) {
        log::debug!("entering declaration mode");

        self.declaration_mode = true;
    }

    pub fn leave_declaration_mode(&mut self) {
        log::debug!("leaving declaration mode");

        self.declaration_mode = false;
    }

    pub fn in_declaration_mode(&self) -> bool {
        self.declaration_mode
    }

    /// Intern a freshly created symbol, or fold it into the symbol already
    /// known for its identifier.
    ///
    /// The returned handle is the canonical symbol the caller has to store.
    /// In declaration mode a same-scope clash is an error: the table is left
    /// untouched and the error carries both source positions.
    pub fn add_symbol(&mut self, new_symbol: Symbol) -> Result<Symbol, SymbolTableError> {
        let identifier = new_symbol.identifier();

        let found_symbol = self
            .symbols
            .get(&identifier)
            .and_then(|chain| chain.last())
            .cloned();

        match found_symbol {
            Some(found) if self.declaration_mode => {
                if found.scope() == self.current_scope {
                    let reference = new_symbol
                        .first_reference()
                        .unwrap_or_else(|| SymbolReference::new(0, 0));
                    let previous = found
                        .first_reference()
                        .unwrap_or_else(|| SymbolReference::new(0, 0));

                    return Err(SymbolTableError::DuplicateDeclaration {
                        identifier,
                        line: reference.line(),
                        column: reference.column(),
                        previous_line: previous.line(),
                        previous_column: previous.column(),
                    });
                }

                // Shadow the outer declaration.
                self.intern(identifier, new_symbol)
            }
            Some(found) => {
                if let Some(reference) = new_symbol.pop_reference() {
                    found.push_reference(reference);
                }

                log::debug!(
                    "referencing known symbol with identifier '{}' in scope {}",
                    identifier,
                    self.current_scope
                );

                Ok(found)
            }
            None => self.intern(identifier, new_symbol),
        }
    }

    /// Look up the innermost symbol known for the identifier.
    pub fn lookup(&self, identifier: &str) -> Option<Symbol> {
        self.symbols
            .get(identifier)
            .and_then(|chain| chain.last())
            .cloned()
    }

    pub fn has(&self, identifier: &str) -> bool {
        self.symbols.contains_key(identifier)
    }

    fn intern(&mut self, identifier: String, symbol: Symbol) -> Result<Symbol, SymbolTableError> {
        symbol.set_scope(self.current_scope);

        log::debug!(
            "{} new symbol with identifier '{}' in scope {}",
            if self.declaration_mode {
                "declaring"
            } else {
                "referencing"
            },
            identifier,
            self.current_scope
        );

        self.symbols
            .entry(identifier)
            .or_default()
            .push(symbol.clone());

        Ok(symbol)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

/// Formatting of the symbol table writes every identifier chain with its
/// scopes, outermost first. Identifiers are sorted to keep the output
/// stable.
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "symboltable in scope {}:", self.current_scope)?;

        let mut identifiers: Vec<&String> = self.symbols.keys().collect();
        identifiers.sort();

        for identifier in identifiers {
            for symbol in &self.symbols[identifier] {
                writeln!(
                    f,
                    "\t{} (scope {}, {} reference(s))",
                    identifier,
                    symbol.scope(),
                    symbol.references().len()
                )?;
            }
        }

        Ok(())
    }
}
