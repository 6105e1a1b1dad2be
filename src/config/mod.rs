pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, GenerateArgs, ValidateArgs};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::OutputFormat;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_positive_number, Validate};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "form-ref")]
    #[command(about = "Generate and validate six-digit form reference numbers")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        /// Emit logs as JSON lines on stderr
        #[arg(long, global = true)]
        pub log_json: bool,

        /// Override the output format from the configuration file
        #[arg(long, global = true, value_enum)]
        pub format: Option<OutputFormat>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Generate new form numbers
        Generate(GenerateArgs),
        /// Check form numbers, exits with status 1 if any is invalid
        Validate(ValidateArgs),
        /// List the registered category prefixes
        Prefixes,
    }

    #[derive(Debug, Clone, Args)]
    pub struct GenerateArgs {
        /// Category name or code, e.g. safety or SF
        #[arg(long, conflicts_with_all = ["prefix", "bare"])]
        pub category: Option<String>,

        /// Raw prefix, not checked against the registered categories
        #[arg(long, conflicts_with = "bare")]
        pub prefix: Option<String>,

        /// Generate numbers without any prefix
        #[arg(long)]
        pub bare: bool,

        #[arg(short = 'n', long, default_value = "1")]
        pub count: usize,

        /// Redraw duplicates within this batch
        #[arg(long)]
        pub distinct: bool,

        /// Seed for reproducible output
        #[arg(long)]
        pub seed: Option<u64>,
    }

    #[derive(Debug, Clone, Args)]
    pub struct ValidateArgs {
        /// Candidates to check; read from stdin, one per line, when omitted
        pub candidates: Vec<String>,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Command::Generate(args) = &self.command {
                validate_positive_number("count", args.count, 1)?;
            }
            Ok(())
        }
    }

}
