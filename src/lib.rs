// Internal Modules
pub mod frontend;
pub mod logging;

// Concrete Definitions Re-Export
pub use frontend::error::FrontendError;
pub use frontend::parser::{AstParser, ParserDebug, PestWaituiParser, SourceContext};
pub use frontend::printer::{DotPrinter, GraphPrinter};
pub use frontend::{Frontend, SOURCE_STDIN, WAITUI_VERSION};
