//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Management API used when neither `--api-url` nor `HOSTCTL_API_URL` is set
pub const DEFAULT_API_URL: &str = "https://api.supabase.com";

/// hostctl - Keep hosted project settings in line with config.toml
#[derive(Parser, Debug)]
#[command(name = "hostctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing hostctl/config.toml
    #[arg(long, global = true, default_value = ".")]
    pub workdir: PathBuf,

    /// Management API origin
    #[arg(long, global = true, env = "HOSTCTL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Personal access token for the management API
    #[arg(long, global = true, env = "HOSTCTL_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Reference of the remote project to manage
    #[arg(long, global = true, env = "HOSTCTL_PROJECT_REF")]
    pub project_ref: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// How command results are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable, coloured text
    Pretty,
    /// JSON for scripting
    Json,
    /// TOML
    Toml,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compare, push or pull the local config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage Postgres config overrides
    #[command(name = "postgres-config")]
    PostgresConfig {
        #[command(subcommand)]
        action: PostgresConfigAction,
    },

    /// Manage SSL enforcement for the database
    #[command(name = "ssl-enforcement")]
    SslEnforcement {
        #[command(subcommand)]
        action: SslEnforcementAction,
    },

    /// Manage network restrictions for the database
    #[command(name = "network-restrictions")]
    NetworkRestrictions {
        #[command(subcommand)]
        action: NetworkRestrictionsAction,
    },

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   hostctl completions bash > ~/.local/share/bash-completion/completions/hostctl
    ///   hostctl completions zsh > ~/.zfunc/_hostctl
    ///   hostctl completions fish > ~/.config/fish/completions/hostctl.fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Reconciliation of the local config file
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show drift between config.toml and the remote project
    Diff,

    /// Update the remote project to match config.toml
    Push {
        /// Show what would be updated without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Refresh config.toml from the remote project
    ///
    /// Only sections the file already manages are refreshed.
    Pull,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PostgresConfigAction {
    /// Show the current Postgres overrides
    Get,

    /// Set Postgres overrides
    ///
    /// Examples:
    ///   hostctl postgres-config update max_connections=100 statement_timeout=30s
    ///   hostctl postgres-config update work_mem=8MB --replace-existing-overrides
    Update {
        /// Overrides in key=value form
        #[arg(required = true, value_name = "KEY=VALUE")]
        config: Vec<String>,

        /// Replace all existing overrides instead of merging with them
        #[arg(long)]
        replace_existing_overrides: bool,

        /// Apply without restarting the database
        #[arg(long)]
        no_restart: bool,
    },

    /// Remove Postgres overrides by key
    Delete {
        /// Keys to remove
        #[arg(long, required = true, value_delimiter = ',')]
        config: Vec<String>,

        /// Apply without restarting the database
        #[arg(long)]
        no_restart: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SslEnforcementAction {
    /// Show whether SSL is enforced
    Get,

    /// Enable or disable SSL enforcement
    #[command(group(
        ArgGroup::new("enforcement")
            .required(true)
            .args(["enable_db_ssl_enforcement", "disable_db_ssl_enforcement"])
    ))]
    Update {
        /// Require SSL for database connections
        #[arg(long)]
        enable_db_ssl_enforcement: bool,

        /// Allow non-SSL database connections
        #[arg(long)]
        disable_db_ssl_enforcement: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum NetworkRestrictionsAction {
    /// Show the database CIDR allow lists
    Get,

    /// Replace the database CIDR allow lists
    Update {
        /// CIDR to allow database connections from
        #[arg(long = "db-allow-cidr", required = true, value_name = "CIDR")]
        db_allow_cidr: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_command() {
        let cli = Cli::parse_from(["hostctl"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.output, OutputFormat::Pretty);
        assert_eq!(cli.workdir, PathBuf::from("."));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "hostctl", "config", "diff", "--verbose", "--output", "json", "--workdir", "/tmp/app",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.workdir, PathBuf::from("/tmp/app"));
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Diff
            })
        ));
    }

    #[test]
    fn parse_config_push_dry_run() {
        let cli = Cli::parse_from(["hostctl", "config", "push", "--dry-run"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Push { dry_run: true }
            })
        ));
    }

    #[test]
    fn parse_postgres_config_update() {
        let cli = Cli::parse_from([
            "hostctl",
            "postgres-config",
            "update",
            "max_connections=100",
            "work_mem=8MB",
            "--no-restart",
        ]);
        match cli.command {
            Some(Commands::PostgresConfig {
                action:
                    PostgresConfigAction::Update {
                        config,
                        replace_existing_overrides,
                        no_restart,
                    },
            }) => {
                assert_eq!(config, vec!["max_connections=100", "work_mem=8MB"]);
                assert!(!replace_existing_overrides);
                assert!(no_restart);
            }
            _ => panic!("Expected PostgresConfig Update command"),
        }
    }

    #[test]
    fn parse_postgres_config_update_requires_values() {
        let result = Cli::try_parse_from(["hostctl", "postgres-config", "update"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_postgres_config_delete() {
        let cli = Cli::parse_from([
            "hostctl",
            "postgres-config",
            "delete",
            "--config",
            "work_mem,shared_buffers",
            "--config",
            "max_connections",
        ]);
        match cli.command {
            Some(Commands::PostgresConfig {
                action: PostgresConfigAction::Delete { config, no_restart },
            }) => {
                assert_eq!(config, vec!["work_mem", "shared_buffers", "max_connections"]);
                assert!(!no_restart);
            }
            _ => panic!("Expected PostgresConfig Delete command"),
        }
    }

    #[test]
    fn parse_ssl_update_requires_a_choice() {
        assert!(Cli::try_parse_from(["hostctl", "ssl-enforcement", "update"]).is_err());
        assert!(
            Cli::try_parse_from([
                "hostctl",
                "ssl-enforcement",
                "update",
                "--enable-db-ssl-enforcement",
                "--disable-db-ssl-enforcement",
            ])
            .is_err()
        );
    }

    #[test]
    fn parse_ssl_update_enable() {
        let cli = Cli::parse_from([
            "hostctl",
            "ssl-enforcement",
            "update",
            "--enable-db-ssl-enforcement",
        ]);
        assert!(matches!(
            cli.command,
            Some(Commands::SslEnforcement {
                action: SslEnforcementAction::Update {
                    enable_db_ssl_enforcement: true,
                    disable_db_ssl_enforcement: false,
                }
            })
        ));
    }

    #[test]
    fn parse_network_restrictions_update() {
        let cli = Cli::parse_from([
            "hostctl",
            "network-restrictions",
            "update",
            "--db-allow-cidr",
            "10.0.0.0/8",
            "--db-allow-cidr",
            "::/0",
        ]);
        match cli.command {
            Some(Commands::NetworkRestrictions {
                action: NetworkRestrictionsAction::Update { db_allow_cidr },
            }) => {
                assert_eq!(db_allow_cidr, vec!["10.0.0.0/8", "::/0"]);
            }
            _ => panic!("Expected NetworkRestrictions Update command"),
        }
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["hostctl", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
