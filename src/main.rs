pub mod config;
pub mod logging;
pub mod options;
pub mod generic_types;
pub mod dataset;
pub mod tokenizer;
pub mod split;
pub mod classifiers;
pub mod evaluation;
pub mod pipeline;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::logging::setup_logger;
use crate::options::Options;

fn main() -> Result<()> {
    let options = Options::parse();
    let config = Config::new()?;
    setup_logger(&config.logging.level);

    pipeline::exec(&config, &options)?;
    Ok(())
}
