use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{classify_command, init_command, plan_command};

#[derive(Parser, Debug)]
#[command(name = "beanforge")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Beanforge {
    /// Config file to use instead of discovering .beanforge.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the bean strategy selected for every class of a model
    #[command(visible_alias = "c")]
    Classify {
        /// Model file, or a directory searched for *.json model files
        model: PathBuf,
    },
    /// Plan the generated definitions for a model
    #[command(visible_alias = "p")]
    Plan {
        /// Model file, or a directory searched for *.json model files
        model: PathBuf,

        /// Only plan this class
        #[arg(long = "class")]
        class: Option<String>,

        /// Print plans as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a default .beanforge.json
    Init {
        /// Directory to write into (defaults to current directory)
        #[arg(long = "cwd")]
        cwd: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

impl Beanforge {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let config = self.config;
        match self.command {
            Commands::Classify { model } => classify_command(&model, config.as_deref()),
            Commands::Plan { model, class, json } => {
                plan_command(&model, config.as_deref(), class.as_deref(), json)
            }
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
