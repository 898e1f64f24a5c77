//! Command-line interface.

pub mod deploy;
pub mod output;
pub mod overlays;
pub mod provision;
pub mod secrets;
pub mod status;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::layout::Layout;
use crate::core::runner::{DryRunRunner, Runner, SystemRunner};
use crate::core::tools::Tools;
use crate::core::types::ClusterIdentity;
use crate::error::Result;

/// hubops - decrypt cluster secrets and deploy support and hub layers.
#[derive(Parser)]
#[command(
    name = "hubops",
    about = "Decrypt cluster secrets and deploy support and hub layers",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Repository root containing clusters/, hubs/, charts/ and tf/
    #[arg(long, global = true, env = "HUBOPS_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Cluster to operate on
    #[arg(long, global = true, env = constants::CLUSTER_ENV, default_value = constants::DEFAULT_IDENTITY)]
    pub cluster: String,

    /// Hub to operate on
    #[arg(long, global = true, env = constants::HUB_ENV, default_value = constants::DEFAULT_IDENTITY)]
    pub hub: String,

    /// Print external commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run `tofu apply` in tf/clusters/<cluster>/
    Tf {
        /// Extra arguments passed after `apply`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run any tofu command in tf/clusters/<cluster>/
    TfRun {
        /// tofu subcommand and arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// Decrypt every *.enc.* file for the cluster and all hubs
    Decrypt,

    /// Deploy the cluster-wide support chart
    DeploySupport {
        /// Apply the chart's CRDs before upgrading
        #[arg(long)]
        crds: bool,
    },

    /// Apply the support chart's CRDs with a server-side apply
    DeploySupportCrds,

    /// Deploy the hub chart for the selected hub
    DeployHub,

    /// Show the values files a deployment would pass, in precedence order
    Overlays {
        /// Deployment target
        #[arg(value_enum)]
        target: TargetArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved layout and what exists on disk
    Status,
}

/// Deployment target argument.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum TargetArg {
    Support,
    Hub,
}

impl From<TargetArg> for crate::core::types::Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Support => Self::Support,
            TargetArg::Hub => Self::Hub,
        }
    }
}

/// Everything a command needs, resolved once from the global arguments.
pub struct Context {
    pub layout: Layout,
    pub identity: ClusterIdentity,
    pub tools: Tools,
    pub runner: Box<dyn Runner>,
}

impl Context {
    /// Resolve identity, config, and runner.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid cluster or hub name, or an
    /// unreadable `.hubops.toml`.
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let identity = ClusterIdentity::new(&args.cluster, &args.hub)?;
        let config = Config::load(&args.root)?;
        let runner: Box<dyn Runner> = if args.dry_run {
            Box::new(DryRunRunner)
        } else {
            Box::new(SystemRunner)
        };

        Ok(Self {
            layout: Layout::new(&args.root),
            identity,
            tools: config.tools,
            runner,
        })
    }

    pub fn runner(&self) -> &dyn Runner {
        self.runner.as_ref()
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let ctx = Context::from_args(&cli.global)?;
    match cli.command {
        Tf { args } => provision::apply(&ctx, &args),
        TfRun { args } => provision::run(&ctx, &args),
        Decrypt => secrets::decrypt(&ctx),
        DeploySupport { crds } => deploy::support(&ctx, crds),
        DeploySupportCrds => deploy::support_crds(&ctx),
        DeployHub => deploy::hub(&ctx),
        Overlays { target, json } => overlays::execute(&ctx, target.into(), json),
        Status => status::execute(&ctx),
    }
}
