mod cli;

use crate::cli::app::App;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    App::parse().run()
}
