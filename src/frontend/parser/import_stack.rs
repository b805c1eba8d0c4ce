/// Saved state of an outer source while an imported file is being read.
/// The entry owns the suspended buffer and its file name together with the
/// position of the import that caused the switch.
#[derive(Debug)]
pub struct SourceState {
    file_name: String,
    source: String,
    line: usize,
    column: usize,
}

impl SourceState {
    pub fn new(file_name: String, source: String, line: usize, column: usize) -> Self {
        SourceState {
            file_name,
            source,
            line,
            column,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn into_file_name(self) -> String {
        self.file_name
    }
}

/// Stack of suspended sources implementing file inclusion for `import`.
///
/// The parser pushes the current source before switching to an imported
/// file and pops it back once the imported file is exhausted. The stack
/// itself stays policy free, guarding against cycles or runaway depth is
/// the business of whoever pushes.
#[derive(Debug, Default)]
pub struct ImportStack {
    states: Vec<SourceState>,
}

impl ImportStack {
    pub fn new() -> Self {
        ImportStack { states: Vec::new() }
    }

    pub fn push(&mut self, state: SourceState) {
        log::trace!(
            "suspending source '{}' at {}:{}",
            state.file_name(),
            state.line(),
            state.column()
        );

        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<SourceState> {
        let state = self.states.pop();

        if let Some(state) = &state {
            log::trace!("resuming source '{}'", state.file_name());
        }

        state
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
