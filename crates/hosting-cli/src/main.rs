//! Hosting - desired-state synthesis for an Amplify-hosted Next.js app
//!
//! The `hosting` command assembles the stack from deploy-time configuration
//! and writes the template the provisioning engine applies.
//!
//! ## Commands
//!
//! - `synth`: write `<stack>.template.json` (or print it)
//! - `buildspec`: print the build specification YAML
//! - `validate`: check configuration and report what would be emitted

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use hosting_core::{
    template_file_name, BuildSpecDocument, HostingStack, StackConfiguration, DEFAULT_STACK_NAME,
};

#[derive(Parser)]
#[command(name = "hosting")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthesize the Amplify hosting stack", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the stack and write its template
    Synth {
        #[command(flatten)]
        stack: StackArgs,

        /// Directory the template is written to
        #[arg(short, long, default_value = "cdk.out")]
        out_dir: PathBuf,

        /// Print the template to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print the build specification handed to the build runner
    Buildspec,

    /// Validate configuration and summarize the desired state
    Validate {
        #[command(flatten)]
        stack: StackArgs,
    },
}

/// Deploy-time inputs. Flags override values from `--config`.
#[derive(Args, Debug, Default)]
struct StackArgs {
    /// Configuration file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stack name
    #[arg(long, default_value = DEFAULT_STACK_NAME)]
    stack_name: String,

    /// Repository owner
    #[arg(long, env = "HOSTING_OWNER")]
    owner: Option<String>,

    /// Repository name
    #[arg(long, env = "HOSTING_REPOSITORY")]
    repository: Option<String>,

    /// Name of the secret holding the GitHub OAuth token
    #[arg(long, env = "HOSTING_OAUTH_TOKEN_SECRET")]
    oauth_token_secret: Option<String>,

    /// App environment variable (repeatable)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    hosting_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Synth {
            stack,
            out_dir,
            stdout,
        } => cmd_synth(&stack, &out_dir, stdout).map(|_| ()),
        Commands::Buildspec => cmd_buildspec(),
        Commands::Validate { stack } => cmd_validate(&stack),
    }
}

fn parse_env_pair(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.trim().is_empty() {
        return Err(format!("empty variable name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Merge the config file (if any) with flag overrides.
fn resolve_config(args: &StackArgs) -> Result<StackConfiguration> {
    let mut config = match &args.config {
        Some(path) => StackConfiguration::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => StackConfiguration::new("", "", ""),
    };

    if let Some(owner) = &args.owner {
        config.owner = owner.clone();
    }
    if let Some(repository) = &args.repository {
        config.repository = repository.clone();
    }
    if let Some(secret) = &args.oauth_token_secret {
        config.github_oauth_token_name = secret.clone();
    }
    for (key, value) in &args.env {
        config
            .environment_variables
            .insert(key.clone(), value.clone());
    }

    config.validate().context("Invalid stack configuration")?;
    Ok(config)
}

/// Returns the written path, or `None` when printing to stdout.
fn cmd_synth(args: &StackArgs, out_dir: &Path, stdout: bool) -> Result<Option<PathBuf>> {
    let config = resolve_config(args)?;
    let stack = HostingStack::new(args.stack_name.clone(), &config)
        .context("Failed to assemble stack")?;
    let template = stack.synth().context("Failed to synthesize template")?;
    let json = template.to_json_pretty()?;
    let digest = template.digest()?;

    if stdout {
        println!("{}", json);
        info!(digest = %digest, "Template written to stdout");
        return Ok(None);
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;
    let path = out_dir.join(template_file_name(stack.name()));
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write template to {:?}", path))?;

    println!("Synthesized {} to {:?}", stack.name(), path);
    println!("Template digest: {}", digest);
    Ok(Some(path))
}

fn cmd_buildspec() -> Result<()> {
    let yaml = BuildSpecDocument::nextjs()
        .to_yaml()
        .context("Failed to render build specification")?;
    print!("{}", yaml);
    Ok(())
}

fn cmd_validate(args: &StackArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let stack = HostingStack::new(args.stack_name.clone(), &config)
        .context("Failed to assemble stack")?;
    let template = stack.synth()?;

    println!("Stack:      {}", stack.name());
    println!("Repository: {}", stack.app().source().repository_url());
    println!(
        "Branch:     {} ({})",
        stack.branch().branch_name(),
        stack
            .branch()
            .stage()
            .map(|s| s.as_str())
            .unwrap_or("none")
    );
    println!("Resources:  {}", template.resources.len());
    println!("Outputs:    {}", template.outputs.len());
    println!("Env vars:   {}", config.environment_variables.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> StackArgs {
        StackArgs {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            owner: Some("acme".to_string()),
            repository: Some("site".to_string()),
            oauth_token_secret: Some("gh-token".to_string()),
            ..StackArgs::default()
        }
    }

    #[test]
    fn test_parse_env_pair() {
        assert_eq!(
            parse_env_pair("X=1").expect("pair"),
            ("X".to_string(), "1".to_string())
        );
        assert_eq!(
            parse_env_pair("URL=a=b").expect("pair"),
            ("URL".to_string(), "a=b".to_string())
        );
        assert!(parse_env_pair("novalue").is_err());
        assert!(parse_env_pair("=1").is_err());
    }

    #[test]
    fn test_cli_parses_synth_flags() {
        let cli = Cli::try_parse_from([
            "hosting",
            "synth",
            "--owner",
            "acme",
            "--repository",
            "site",
            "--oauth-token-secret",
            "gh-token",
            "--env",
            "X=1",
            "--stdout",
        ])
        .expect("parse args");

        match cli.command {
            Commands::Synth { stack, stdout, .. } => {
                assert!(stdout);
                assert_eq!(stack.owner.as_deref(), Some("acme"));
                assert_eq!(stack.env, vec![("X".to_string(), "1".to_string())]);
                assert_eq!(stack.stack_name, DEFAULT_STACK_NAME);
            }
            _ => panic!("expected synth"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stack.json");
        std::fs::write(
            &path,
            r#"{"owner":"from-file","repository":"site","github_oauth_token_name":"gh-token","environment_variables":{"A":"1"}}"#,
        )
        .expect("write config");

        let mut args = args();
        args.config = Some(path);
        args.owner = Some("acme".to_string());
        args.repository = None;
        args.oauth_token_secret = None;
        args.env = vec![("B".to_string(), "2".to_string())];

        let config = resolve_config(&args).expect("resolve");
        assert_eq!(config.owner, "acme");
        assert_eq!(config.repository, "site");
        assert_eq!(config.environment_variables.len(), 2);
    }

    #[test]
    fn test_missing_owner_is_rejected() {
        let mut args = args();
        args.owner = None;
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_cmd_synth_writes_template_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let written = cmd_synth(&args(), dir.path(), false)
            .expect("synth")
            .expect("written path");

        assert_eq!(
            written,
            dir.path().join("AmplifyHostingStack.template.json")
        );
        let text = std::fs::read_to_string(&written).expect("read template");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert!(value["Outputs"]["appId"]["Value"]["Fn::GetAtt"].is_array());
    }

    #[test]
    fn test_cmd_buildspec_renders() {
        cmd_buildspec().expect("buildspec");
    }

    #[test]
    fn test_cmd_validate_accepts_complete_config() {
        cmd_validate(&args()).expect("validate");
    }

    #[test]
    fn test_cmd_validate_rejects_missing_secret() {
        let mut args = args();
        args.oauth_token_secret = None;
        assert!(cmd_validate(&args).is_err());
    }

    #[test]
    fn test_cmd_synth_stdout_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out_dir = dir.path().join("cdk.out");
        let written = cmd_synth(&args(), &out_dir, true).expect("synth");
        assert!(written.is_none());
        assert!(!out_dir.exists());
    }
}
