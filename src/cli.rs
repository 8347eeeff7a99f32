use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "platen",
    about = "Render a template with parameters and after-render filters",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template to stdout or a file
    Render {
        /// Template file (default: `template.file` from the config)
        file: Option<String>,

        /// Path to platen.toml or the directory containing it
        #[arg(short, long)]
        config: Option<String>,

        /// Base directory for relative template files
        #[arg(short, long)]
        root: Option<String>,

        /// Set parameter values (can be repeated: -d key=value)
        #[arg(short, long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,

        /// Log render failures and emit empty output instead of failing
        #[arg(long)]
        safe: bool,

        /// Write the rendered text to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a platen.toml
    Check {
        /// Path to the config (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },
}
