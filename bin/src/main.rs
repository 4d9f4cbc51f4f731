use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::{fs, io, path::PathBuf, time::Instant};
use wm_core::algo::score_words;
use wm_core::config::Config;
use wm_core::data::{self, RecordFormat};
use wm_core::engine::Engine;
use wm_core::evaluate::{evaluate, Histogram};
use wm_core::game::{play, sample_targets, solve};
use wm_core::selectors::{GuessSelector, SearchScope, SelectorKind};
use wm_core::structs::Word;
use wordle_minimax_core as wm_core;

#[derive(Parser)]
#[command(
    name = "wordle-minimax",
    about = "Plays Wordle by minimax search over feedback partitions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Answer list, one word per line
    #[arg(short, long, global = true, default_value = "words1.txt")]
    answers: PathBuf,

    /// Extra allowed guesses that are never the answer
    #[arg(short, long, global = true)]
    guesses: Option<PathBuf>,

    /// JSON file with engine settings, flags below override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// greedy or two-ply
    #[arg(long, global = true)]
    selector: Option<SelectorKind>,

    /// Guess space of the greedy selector: candidates or answers
    #[arg(long, global = true)]
    scope: Option<SearchScope>,

    /// Second ply weight of the two-ply selector
    #[arg(long, global = true)]
    lookahead_weight: Option<usize>,

    /// Worker threads, defaults to all cores
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Word list layout: plain or scored
    #[arg(long, global = true)]
    format: Option<RecordFormat>,
}

#[derive(Subcommand)]
enum Command {
    /// Histogram of guesses needed over every answer
    Bench {
        /// Simulate this many random answers instead of the whole tree
        #[arg(short = 'n', long)]
        sample: Option<usize>,
    },
    /// Interactive game: type the feedback code the game shows, e.g. 02100
    Play,
    /// Show the guesses made against a known answer
    Solve { word: String },
    /// Feedback code of a guess against a target
    Score { target: String, guess: String },
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("unable to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(selector) = self.selector {
            config.selector = selector;
        }
        if let Some(scope) = self.scope {
            config.scope = scope;
        }
        if let Some(weight) = self.lookahead_weight {
            config.lookahead_weight = weight;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        Ok(config)
    }

    fn word_lists(&self) -> String {
        match &self.guesses {
            Some(guesses) => format!("{} and {}", self.answers.display(), guesses.display()),
            None => self.answers.display().to_string(),
        }
    }

    fn engine(&self, config: &Config) -> Result<Engine> {
        let dictionary = data::load_dictionary(&self.answers, self.guesses.as_ref(), config.format)
            .with_context(|| format!("unable to load word lists {}", self.word_lists()))?;

        println!("Hold on. Computing...");
        let engine = Engine::new(dictionary, config.workers())?;
        info!("Engine ready with {} workers", engine.workers());
        Ok(engine)
    }
}

fn bench(engine: &Engine, selector: &dyn GuessSelector, sample: Option<usize>) -> Result<()> {
    let start = Instant::now();
    let histogram = match sample {
        None => evaluate(engine, selector, &engine.answers())?,
        Some(n) => {
            let mut histogram = Histogram::default();
            for target in sample_targets(engine, n, &mut rand::thread_rng()) {
                histogram.record(solve(engine, selector, target)?.len());
            }
            histogram
        }
    };

    print!("{histogram}");
    println!("Average guesses: {:.3}", histogram.mean());
    println!("Total words: {}", histogram.total());
    info!("Benchmark took {}ms", start.elapsed().as_millis());
    Ok(())
}

fn print_trail(engine: &Engine, selector: &dyn GuessSelector, word: &str) -> Result<()> {
    let word = Word::try_from(word)?;
    let target = engine
        .answer_index(&word)
        .ok_or_else(|| anyhow!("\"{word}\" is not in the answer list"))?;

    let trail = solve(engine, selector, target)?;
    for (i, (guess, code)) in trail.iter().enumerate() {
        println!("Guess {}: {} {} {code}", i + 1, engine.word(*guess), code.squares());
    }
    println!("Solved in {} guesses.", trail.len());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Command::Score { target, guess }) = &cli.command {
        let code = score_words(target, guess)?;
        println!("{code} {}", code.squares());
        return Ok(());
    }

    let config = cli.config()?;
    let engine = cli.engine(&config)?;
    let selector = config.selector();

    match &cli.command {
        Some(Command::Bench { sample }) => bench(&engine, selector.as_ref(), *sample)?,
        Some(Command::Play) => {
            play(&engine, selector.as_ref(), io::stdin().lock(), io::stdout().lock())?;
        }
        Some(Command::Solve { word }) => print_trail(&engine, selector.as_ref(), word)?,
        _ => {
            bench(&engine, selector.as_ref(), None)?;
            play(&engine, selector.as_ref(), io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn load_errors_name_every_list() {
        let cli = Cli::parse_from(["wordle-minimax", "-a", "answers.txt", "-g", "guesses.txt"]);
        assert_eq!(cli.word_lists(), "answers.txt and guesses.txt");

        let cli = Cli::parse_from(["wordle-minimax", "play"]);
        assert_eq!(cli.word_lists(), "words1.txt");
    }

    #[test]
    fn missing_guess_list_is_reported() {
        let dir = std::env::temp_dir().join(format!("wordle-minimax-bin-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let answers = dir.join("answers.txt");
        fs::write(&answers, "mount\ncount\n").unwrap();
        let guesses = dir.join("missing.txt");

        let cli = Cli::parse_from([
            OsStr::new("wordle-minimax"),
            OsStr::new("-a"),
            answers.as_os_str(),
            OsStr::new("-g"),
            guesses.as_os_str(),
        ]);
        let err = cli.engine(&Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("missing.txt"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
