use clap::Parser;
use openclaw_configure::cli::{Cli, Commands};
use openclaw_configure::config::render_config;
use openclaw_configure::{logging, Configurator, EnvSnapshot, Paths};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let env = EnvSnapshot::from_process();
    let paths = Paths::from_env(&env);

    match cli.into_command() {
        Commands::Apply(opts) => {
            let paths = match &opts.caddy_dir {
                Some(dir) => paths.with_caddy_dir(dir),
                None => paths,
            };
            let hasher = opts.hasher();
            Configurator::new(&env, paths).apply(hasher.as_ref())?;
            info!("configuration complete");
        }
        Commands::Show => {
            let resolution = Configurator::new(&env, paths).resolve()?;
            println!("{}", render_config(&resolution.document)?);
        }
        Commands::Validate => {
            let resolution = Configurator::new(&env, paths).resolve()?;
            info!(
                "configuration is valid ({} explicit providers, {} built-in)",
                resolution.providers.configured.len(),
                resolution.providers.builtins.len()
            );
        }
        Commands::Version => {
            println!("openclaw-configure {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
