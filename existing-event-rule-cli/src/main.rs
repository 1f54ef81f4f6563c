use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use existing_event_rule_permissions::{
    compile_events, synthesize, CloudFormationTemplate, LogReporter, ServiceDescriptor,
};
use log::{debug, info};
use serde_json::{Map, Value};

#[derive(Parser, Debug)]
#[command(name = "existing-event-rule")]
#[command(version)]
#[command(
    about = "Grant existing EventBridge rules permission to invoke Serverless functions",
    long_about = "Adds an AWS::Lambda::Permission resource to the compiled CloudFormation template for every \
                  function event that references an event rule created outside the deployment \
                  (cloudWatchRule / cloudWatchRuleArn)."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add permissions for every existing-rule event of a service to its compiled template.
    Compile {
        /// Service descriptor as JSON (output of `serverless print --format json`).
        #[arg(long, env = "EXISTING_EVENT_RULE_SERVICE")]
        service: PathBuf,
        /// Compiled CloudFormation template (e.g. .serverless/cloudformation-template-update-stack.json).
        #[arg(long, env = "EXISTING_EVENT_RULE_TEMPLATE")]
        template: PathBuf,
        /// Write the updated template here instead of overwriting --template.
        #[arg(long, conflicts_with = "dry_run")]
        output: Option<PathBuf>,
        /// Print the updated template to stdout without writing any file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the permission resource for a single function and rule reference.
    Synthesize {
        /// Function name as declared in serverless.yml.
        #[arg(long)]
        function: String,
        /// Rule name, namespaced name, ARN, or ANY.
        #[arg(long)]
        rule: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn run_compile(
    service: &Path,
    template_path: &Path,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let descriptor = ServiceDescriptor::from_path(service)
        .with_context(|| format!("Failed to load service descriptor {}", service.display()))?;
    let mut template = CloudFormationTemplate::from_path(template_path)
        .with_context(|| format!("Failed to load template {}", template_path.display()))?;

    if let Some(name) = descriptor.service_name() {
        debug!(
            "Compiling existing event rule permissions for service {}",
            name
        );
    }

    let summary = compile_events(&descriptor, &mut template, &mut LogReporter)
        .context("Failed to compile existing event rule permissions")?;

    if dry_run {
        println!("{}", template.to_json_pretty()?);
        return Ok(());
    }

    let destination = output.unwrap_or(template_path);
    template
        .write_to(destination)
        .with_context(|| format!("Failed to write template {}", destination.display()))?;

    info!(
        "Wrote {} existing event rule permission(s) to {}",
        summary.permissions.len(),
        destination.display()
    );
    Ok(())
}

fn run_synthesize(function: &str, rule: &str) -> Result<()> {
    let permission = synthesize(function, rule).with_context(|| {
        format!(
            "Failed to synthesize permission for rule \"{}\" on function \"{}\"",
            rule, function
        )
    })?;

    let mut resources = Map::new();
    resources.insert(
        permission.logical_name.clone(),
        serde_json::to_value(&permission.definition)?,
    );
    let rendered = serde_json::to_string_pretty(&Value::Object(resources))?;
    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compile {
            service,
            template,
            output,
            dry_run,
        } => run_compile(&service, &template, output.as_deref(), dry_run),
        Commands::Synthesize { function, rule } => run_synthesize(&function, &rule),
    }
}
