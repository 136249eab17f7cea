//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands. Each connection flag can
//! also be given as a `REEVE_CLI_*` environment variable:
//! - `--config <dir>` / `REEVE_CLI_CONFIG`: Location of client config files
//! - `--url` / `REEVE_CLI_URL`: Reeve server URL
//! - `--insecure[=<bool>]` / `REEVE_CLI_INSECURE`: Skip TLS verification
//! - `--secret` / `REEVE_CLI_SECRET`: CLI secret
//! - `--auth-header` / `REEVE_CLI_AUTH_HEADER`: Credential header name
//! - `--auth-prefix` / `REEVE_CLI_AUTH_PREFIX`: Credential prefix
//! - `--debug`: Enable debug logging

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{ConfigOverrides, TypeHint};

/// Reeve CI / CD - Command Line Tools
#[derive(Parser, Debug)]
#[command(name = "reeve")]
#[command(
    author,
    version,
    about,
    long_about = "Reeve CI / CD - Command Line Tools\n\n\
        Most options can also be specified using environment variables, which need \
        to be prefixed with 'REEVE_CLI_', e.g. 'REEVE_CLI_CONFIG=/path/to/config'."
)]
pub struct Cli {
    /// Location of client config files (default: <user config dir>/reeve)
    #[arg(
        long = "config",
        value_name = "DIR",
        global = true,
        env = "REEVE_CLI_CONFIG"
    )]
    pub config_dir: Option<PathBuf>,

    /// Reeve server URL
    #[arg(long, global = true, env = "REEVE_CLI_URL")]
    pub url: Option<String>,

    /// Allow insecure TLS connections by skipping certificate verification
    #[arg(
        long,
        global = true,
        env = "REEVE_CLI_INSECURE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub insecure: Option<bool>,

    /// CLI secret
    #[arg(long, global = true, env = "REEVE_CLI_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Authorization header (default: "Authorization")
    #[arg(long, global = true, env = "REEVE_CLI_AUTH_HEADER")]
    pub auth_header: Option<String>,

    /// Authorization prefix (default: "Bearer ")
    #[arg(long, global = true, env = "REEVE_CLI_AUTH_PREFIX")]
    pub auth_prefix: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Connection settings supplied by flags or the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            insecure: self.insecure,
            secret: self.secret.clone(),
            auth_header: self.auth_header.clone(),
            auth_prefix: self.auth_prefix.clone(),
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the server to do something
    #[command(
        name = "ask",
        disable_help_flag = true,
        override_usage = "reeve ask -l\n       \
            reeve ask <PLUGIN> [-l]\n       \
            reeve ask <PLUGIN> <COMMAND> [ARGS]...",
        long_about = "Ask the server to do something.\n\n\
            Any Reeve plugin can register commands to be executed by the CLI. \
            Everything after the command name is passed to the plugin unchanged, \
            so global options must come before 'ask'.\n\n\
            Run 'reeve ask -l' to get a list of available commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List every command the server offers
    reeve ask --list

    # List the commands of one plugin
    reeve ask deploy

    # Run a command with arguments
    reeve ask deploy trigger web --force

    # Point at another server for one call
    reeve --url https://ci.example.com ask deploy status"
    )]
    Ask {
        /// -l/--list, a plugin, or a plugin and command followed by its arguments
        #[arg(
            value_name = "ARGS",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },

    /// Manage client configuration files
    #[command(
        name = "config",
        long_about = "Manage client configuration files.\n\n\
            Note that configuration can be overridden using environment variables \
            or flags. This utility only manages the configuration file.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Point the client at a server
    reeve config set url https://reeve.example.com
    reeve config set secret --string 0123456789

    # Use a custom credential header without prefix
    reeve config set auth.header X-Api-Key
    reeve config set auth.prefix ''

    # Inspect the file
    reeve config list
    reeve config get auth.header"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Cryptographic utility functions
    #[command(name = "crypto")]
    Crypto {
        #[command(subcommand)]
        action: CryptoAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    reeve completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    reeve completion zsh >> ~/.zshrc

    # Fish
    reeve completion fish > ~/.config/fish/completions/reeve.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// List configured configuration options
    List,

    /// Get a configuration option
    Get {
        /// Dot separated key, e.g. 'auth.header'
        key: String,
    },

    /// Set a configuration option
    #[command(
        long_about = "Set a configuration option.\n\n\
            The key is a dot separated path, e.g. 'auth.header'.\n\
            By default, the value is parsed as a boolean if it is exactly 'true' or \
            'false', a number if it can be parsed as such, or otherwise as a string."
    )]
    Set {
        #[command(flatten)]
        value_type: ValueTypeArgs,

        /// Dot separated key, e.g. 'auth.header'
        key: String,

        /// Value to set
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Unset a configuration option
    Unset {
        /// Dot separated key, e.g. 'auth.header'
        key: String,
    },
}

/// Type flags for `config set`. At most one may be given.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(multiple = false)]
pub struct ValueTypeArgs {
    /// Force the value to be a string
    #[arg(long)]
    pub string: bool,

    /// Force the value to be a boolean
    #[arg(long)]
    pub boolean: bool,

    /// Force the value to be a number
    #[arg(long)]
    pub number: bool,
}

impl ValueTypeArgs {
    /// The coercion requested by the flags.
    pub fn hint(&self) -> TypeHint {
        if self.string {
            TypeHint::String
        } else if self.boolean {
            TypeHint::Boolean
        } else if self.number {
            TypeHint::Number
        } else {
            TypeHint::Auto
        }
    }
}

/// Crypto subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CryptoAction {
    /// Create a hash of the value provided by stdin
    #[command(
        long_about = "Create a hash of the value provided by stdin.\n\n\
            Note that surrounding whitespace is removed from the input by default. \
            You can disable this behavior by specifying the -T switch."
    )]
    Hash {
        /// Do not remove surrounding whitespace from the input
        #[arg(short = 'T', long)]
        no_trim: bool,
    },

    /// Check the value provided by stdin against a hash
    Verify {
        /// Hash produced by 'reeve crypto hash'
        hash: String,

        /// Do not remove surrounding whitespace from the input
        #[arg(short = 'T', long)]
        no_trim: bool,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
