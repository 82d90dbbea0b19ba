//! Arena Binary
//!
//! Plays `--total` episodes of a learning player against a random
//! environment, reporting every `--block` episodes.
//!
//! Options: --total, --block, --limit, --play, --evil, --load, --save, --summary

use clap::Parser;
use tdl2048::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 1000, help = "Episodes to play")]
    total: usize,
    #[arg(long, default_value_t = 0, help = "Episodes per report (0 = total)")]
    block: usize,
    #[arg(long, default_value_t = 0, help = "Episodes to retain (0 = total)")]
    limit: usize,
    #[arg(long, default_value = "", help = "Player options, e.g. \"init alpha=0.1 save=w.bin\"")]
    play: String,
    #[arg(long, default_value = "", help = "Environment options, e.g. \"seed=7\"")]
    evil: String,
    #[arg(long, help = "Resume from a saved statistic file")]
    load: Option<std::path::PathBuf>,
    #[arg(long, help = "Save the statistic to this file at the end")]
    save: Option<std::path::PathBuf>,
    #[arg(long, help = "Print a summary over every retained episode")]
    summary: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "More logging (-v debug, -vv trace)")]
    verbose: u8,
}

impl Args {
    fn level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.level());
    log::info!("2048 arena: {}", std::env::args().collect::<Vec<_>>().join(" "));
    let mut stat = Statistic::new(args.total, args.block, args.limit);
    let mut summary = args.summary;
    if let Some(ref path) = args.load {
        stat.load_from(path)?;
        summary |= stat.is_finished();
    }
    let mut arena = Arena::new(Player::new(&args.play)?, Environment::new(&args.evil)?);
    arena.run(&mut stat);
    arena.finish()?;
    if summary {
        println!("{}", stat.summary());
    }
    if let Some(ref path) = args.save {
        stat.save_to(path)?;
    }
    Ok(())
}
