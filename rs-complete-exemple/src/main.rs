use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;

use rs_complete_core::{CompletionInput, ModelConfig, SentenceCompleter};

/// Finish your sentences from a text corpus.
#[derive(Parser, Debug)]
#[clap(name = "rs-complete-exemple", version)]
struct Args {
    /// Text file (or folder of .txt files) to learn from
    #[clap(short, long)]
    corpus: PathBuf,

    /// Token inserted after every sentence
    #[clap(short, long, default_value = "[]")]
    boundary: String,

    /// Stop after this many words (0 = until the sentence ends)
    #[clap(short, long, default_value_t = 50)]
    max_words: usize,

    /// Seed the random generator for reproducible completions
    #[clap(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = ModelConfig {
        boundary: args.boundary,
        ..ModelConfig::default()
    };

    // A folder loads every .txt file it contains
    let completer = if args.corpus.is_dir() {
        SentenceCompleter::from_folder(&args.corpus, "txt", config)?
    } else {
        SentenceCompleter::from_file(&args.corpus, config)?
    };

    let stats = completer.stats();
    log::info!("model ready: {} tokens, {} slots", stats.tokens, stats.capacity);

    let mut input = CompletionInput::default();
    input.max_words = args.max_words;
    if let Some(seed) = args.seed {
        input.set_rng_seed(seed);
    }

    let stdin = io::stdin();
    loop {
        println!("Type part of a sentence and press enter to have it finished ('quit' to exit):");

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line == "quit" {
            break;
        }

        let completion = completer.complete(line, &input);
        if completion.seed.is_none() {
            println!("(nothing to complete)");
            continue;
        }
        // Echo the line, then the generated words
        let text = completion.text();
        if text.is_empty() {
            println!("{line}");
        } else {
            println!("{line} {text}");
        }
    }

    Ok(())
}
