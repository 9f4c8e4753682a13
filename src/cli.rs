use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use declarative::StrictnessLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rigging")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Reconcile device resources against their canonical form", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List, inspect, or manage resources of one type
    Resource(ResourceArgs),

    /// Apply configuration to devices from the device config
    Device(DeviceArgs),

    /// Show facts a device reports about itself
    Facts(FactsArgs),

    /// Describe the built-in resource types
    Types(TypesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Shared Arguments
// ============================================================================

/// What to do when a device returns non-canonical values
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrictArg {
    /// Accept silently
    Off,
    /// Report and continue
    Warning,
    /// Fail the resource
    Error,
}

impl From<StrictArg> for StrictnessLevel {
    fn from(arg: StrictArg) -> Self {
        match arg {
            StrictArg::Off => Self::Off,
            StrictArg::Warning => Self::Warning,
            StrictArg::Error => Self::Error,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Canonicalization strictness (default from config.toml, else warning)
    #[arg(long, value_enum, env = "RIGGING_STRICT")]
    pub strict: Option<StrictArg>,

    /// Report changes without applying them
    #[arg(long)]
    pub noop: bool,
}

#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Device name from the device config
    #[arg(short, long)]
    pub target: Option<String>,

    /// Device config file (default: <config dir>/device.conf)
    #[arg(long, value_name = "PATH")]
    pub deviceconfig: Option<String>,
}

// ============================================================================
// Resource
// ============================================================================

#[derive(Args, Debug)]
pub struct ResourceArgs {
    /// Resource type, e.g. device_provider
    pub resource_type: String,

    /// Resource title; omit to list every resource of the type
    pub title: Option<String>,

    /// Desired attributes as name=value
    #[arg(value_name = "ATTR=VALUE")]
    pub attributes: Vec<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Print resources as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Device
// ============================================================================

#[derive(Args, Debug)]
pub struct DeviceArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Catalog file to apply (TOML or JSON)
    #[arg(long, value_name = "CATALOG")]
    pub apply: Option<PathBuf>,

    /// Only apply matching resources: "type" or "type.title"
    #[arg(long)]
    pub only: Option<String>,

    /// Number of resources reconciled in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

// ============================================================================
// Facts / Types
// ============================================================================

#[derive(Args, Debug)]
pub struct FactsArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Only describe this type
    pub name: Option<String>,
}
