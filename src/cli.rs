use clap::{Parser, Subcommand, ValueEnum};
use edgecount_db::QueryShape;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edgecount")]
#[command(author, version, about = "Node degree query reproduction harness")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    Grouped,
    FanOut,
}

impl From<ShapeArg> for QueryShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Grouped => QueryShape::Grouped,
            ShapeArg::FanOut => QueryShape::FanOut,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the reproduction scenario against configured targets
    Run {
        /// Only run these targets (may repeat); disabled targets run when named
        #[arg(short, long = "target")]
        targets: Vec<String>,

        /// Join form of the degree query (defaults to the config value)
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the degree view of a database
    Query {
        /// Connection descriptor, e.g. sqlite://edges.db
        #[arg(long)]
        db: String,

        /// Join form of the degree query
        #[arg(long, value_enum, default_value = "grouped")]
        shape: ShapeArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Insert one edge
    Add {
        /// Connection descriptor
        #[arg(long)]
        db: String,

        /// Source node name
        from: String,

        /// Destination node name
        to: String,
    },

    /// Delete every edge
    Reset {
        /// Connection descriptor
        #[arg(long)]
        db: String,
    },

    /// List configured targets
    Targets,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
