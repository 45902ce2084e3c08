use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::filter::{FilterCriteria, FilterField};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "lapview")]
#[command(author, version, about = "Browse, filter and compare laptop listings", long_about = None)]
#[command(after_help = r#"Examples:
  lapview list                                   All laptops
  lapview list --brand lenovo --min-rating 4     Lenovo laptops rated 4+
  lapview list --max-price 800 --json            Machine-readable output
  lapview compare 3 7 12                         Side-by-side comparison
  lapview --file laptops.json list               Use a saved response

Environment:
  LAPVIEW_API_URL    Catalog service base URL (overrides config)
  LAPVIEW_CONFIG     Config file path
  RUST_LOG           Log filter, e.g. lapview=debug
"#)]
pub struct Cli {
    /// Read laptops from a saved JSON response instead of the API
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List laptops matching the given filters
    #[command(after_help = r#"Examples:
  lapview list --brand hp                  Brand contains "hp"
  lapview list --min-price 500 --max-price 1200
  lapview list --processor i7 --memory 16GB
  lapview list --query thinkpad            Search every field
  lapview list --details                   One block per laptop
"#)]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Show all details
        #[arg(long)]
        details: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the filter choices offered by the catalog service
    Options {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one laptop
    Show {
        /// Laptop id
        #[arg(value_name = "ID")]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two or more laptops side by side
    #[command(after_help = r#"Examples:
  lapview compare 3 7
  lapview compare 3 7 12 --json
"#)]
    Compare {
        /// Laptop ids
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Price and rating summary of the catalog
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the configuration, or write a default one
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  lapview completions bash > ~/.local/share/bash-completion/completions/lapview
  lapview completions zsh > ~/.zfunc/_lapview
  lapview completions fish > ~/.config/fish/completions/lapview.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Filter flags shared by listing commands
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Brand contains this text
    #[arg(long)]
    pub brand: Option<String>,

    /// Minimum price in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub min_price: Option<String>,

    /// Maximum price in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub max_price: Option<String>,

    /// Minimum rating (0-5)
    #[arg(long, value_name = "STARS")]
    pub min_rating: Option<String>,

    /// Processor contains this text
    #[arg(long)]
    pub processor: Option<String>,

    /// Memory contains this text
    #[arg(long)]
    pub memory: Option<String>,

    /// Storage contains this text
    #[arg(long)]
    pub storage: Option<String>,

    /// Display contains this text
    #[arg(long)]
    pub display: Option<String>,

    /// Search brand, model and specs
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

impl FilterArgs {
    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Build criteria; rejects non-numeric price and rating bounds
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::default();
        for (field, value) in self.pairs() {
            criteria.set(field, value)?;
        }
        Ok(criteria)
    }

    fn pairs(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::Brand, &self.brand),
            (FilterField::MinPrice, &self.min_price),
            (FilterField::MaxPrice, &self.max_price),
            (FilterField::MinRating, &self.min_rating),
            (FilterField::Processor, &self.processor),
            (FilterField::Memory, &self.memory),
            (FilterField::Storage, &self.storage),
            (FilterField::Display, &self.display),
            (FilterField::Query, &self.query),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}
