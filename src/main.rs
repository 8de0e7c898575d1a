use anyhow::Result;
use webship::Config;
use webship::pipeline::deploy_once;

fn main() -> Result<()> {
    let config = Config::from_cli()?;
    deploy_once(&config)
}
