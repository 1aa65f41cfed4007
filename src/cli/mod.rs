use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::caddy::{BcryptHasher, CaddyHasher, PasswordHasher};

#[derive(Parser)]
#[command(
    name = "openclaw-configure",
    version,
    about = "Resolve openclaw.json and the Caddy snippets from the environment",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Defaults to `apply`, taking its flags at the top level.
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub apply: ApplyOpts,
}

impl Cli {
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Apply(self.apply))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve, validate and write every artifact.
    Apply(ApplyOpts),
    /// Print the resolved document to stdout without writing anything.
    Show,
    /// Resolve and validate only.
    Validate,
    Version,
}

#[derive(clap::Args)]
pub struct ApplyOpts {
    /// Directory receiving auth.caddyfile and hooks.caddyfile. Overrides
    /// `OPENCLAW_CADDY_DIR`.
    #[arg(long)]
    pub caddy_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = HasherKind::Caddy)]
    pub hasher: HasherKind,
    /// Caddy executable used by the `caddy` hasher.
    #[arg(long, default_value = "caddy")]
    pub caddy_bin: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum HasherKind {
    /// `caddy hash-password`.
    #[default]
    Caddy,
    /// In-process bcrypt.
    Bcrypt,
}

impl ApplyOpts {
    pub fn hasher(&self) -> Box<dyn PasswordHasher> {
        match self.hasher {
            HasherKind::Caddy => Box::new(CaddyHasher {
                program: self.caddy_bin.clone(),
            }),
            HasherKind::Bcrypt => Box::new(BcryptHasher::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_apply() {
        let cli = Cli::try_parse_from(["openclaw-configure", "--hasher", "bcrypt"]).unwrap();
        let Commands::Apply(opts) = cli.into_command() else {
            panic!("expected apply");
        };
        assert_eq!(opts.hasher, HasherKind::Bcrypt);
    }

    #[test]
    fn apply_flags() {
        let cli = Cli::try_parse_from([
            "openclaw-configure",
            "apply",
            "--caddy-dir",
            "/tmp/caddy",
            "--hasher",
            "bcrypt",
        ])
        .unwrap();
        let Some(Commands::Apply(opts)) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(opts.caddy_dir, Some(PathBuf::from("/tmp/caddy")));
        assert_eq!(opts.hasher, HasherKind::Bcrypt);
        assert_eq!(opts.caddy_bin, "caddy");
    }

    #[test]
    fn unknown_hasher_is_rejected() {
        assert!(Cli::try_parse_from(["openclaw-configure", "apply", "--hasher", "md5"]).is_err());
    }
}
