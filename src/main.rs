// Internal Modules
use waitui_frontend::logging::{self, LogLevel};
use waitui_frontend::{
    DotPrinter, Frontend, FrontendError, ParserDebug, PestWaituiParser, SOURCE_STDIN,
};

// Standard Imports
use clap::Parser;
use std::path::PathBuf;

// Exit codes of the frontend
const WAITUI_SUCCESS: i32 = 0;
const WAITUI_FAILURE: i32 = 1;
const WAITUI_OTHER_ERROR: i32 = 2;

// Basic Frontend Configuration
type PARSER = PestWaituiParser;
type PRINTER = DotPrinter;

/// Command Line interface struct
/// Describes possible arguments using the clap library
#[derive(Parser)]
#[clap(version)]
struct FrontendCliOptions {
    /// Path of the waitui source file to parse, standard input when omitted
    #[clap(parse(from_os_str))]
    path: Option<PathBuf>,

    /// Path of the graph output file, default is <path>.dot
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    // Flags

    /// Only report errors
    #[clap(long, action)]
    quiet: bool,

    /// Log everything the frontend does
    #[clap(long, action)]
    verbose: bool,
}

impl FrontendCliOptions {
    fn log_level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Quiet
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Default
        }
    }

    /// The source file name handed to the frontend. Without a path the
    /// frontend reads standard input under the name `stdin`.
    fn source_file_name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => String::from(SOURCE_STDIN),
        }
    }

    /// Imports resolve relative to the directory of the source file.
    fn working_directory(&self) -> String {
        self.path
            .as_ref()
            .and_then(|path| path.parent())
            .map(|parent| parent.display().to_string())
            .unwrap_or_default()
    }

    /// The graph artifact lands beside the source as `<source>.dot` unless
    /// an explicit output path is given.
    fn graph_file_name(&self) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => PathBuf::from(format!("{}.dot", self.source_file_name())),
        }
    }
}

fn main() {
    // Parse Command line arguments
    let cli_args = FrontendCliOptions::parse();

    if let Err(why) = logging::set_up_logging(&cli_args.log_level()) {
        eprintln!("could not set up logging: {}", why);
        std::process::exit(WAITUI_OTHER_ERROR);
    }

    log::debug!("waitui start execution");

    let source_file_name = cli_args.source_file_name();
    let mut frontend = match Frontend::<PARSER>::new(
        &source_file_name,
        &cli_args.working_directory(),
        ParserDebug::NONE,
    ) {
        Ok(frontend) => frontend,
        Err(why) => {
            log::error!("{}", why);
            std::process::exit(WAITUI_OTHER_ERROR);
        }
    };

    log::trace!("start parsing input");
    if let Err(why) = frontend.parse() {
        log::error!("parsing input failed: {}", why);
        let exit_code = match why {
            FrontendError::Parse { .. } => WAITUI_FAILURE,
            _ => WAITUI_OTHER_ERROR,
        };
        std::process::exit(exit_code);
    }
    log::debug!("input was parsed successful");

    let graph_file_name = cli_args.graph_file_name();
    if let Err(why) = frontend.generate_graph_file::<PRINTER>(graph_file_name.as_path()) {
        log::error!("{}", why);
        std::process::exit(WAITUI_OTHER_ERROR);
    }

    log::debug!("waitui execution done");
    std::process::exit(WAITUI_SUCCESS);
}
