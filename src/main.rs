use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cfg = chaos_equations::config::Config::parse();
    if let Err(err) = chaos_equations::app::run(cfg) {
        log::error!("{err:#}");
        return Err(err);
    }
    Ok(())
}
