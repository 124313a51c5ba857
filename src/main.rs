//! # N-graph Puzzle
//!
//! Generate and play n-graph puzzles. Generation examines every set of
//! fragments of a configuration and writes the uniquely solvable ones to a
//! puzzle file; this is slow, and meant to be run ahead of time. Play picks a
//! puzzle from that file and checks guesses read from standard input.
//!
//! The word list for words of `W` letters is read from `words-W.txt` in the
//! working directory, one uppercase word per line. Puzzle files are written to
//! and read from the working directory as well.

use std::{error::Error, io, process, rc::Rc, time::Instant};

use clap::{Parser, Subcommand};
use log::{debug, error, info, trace};

use ngraph_puzzle::{
	config::PuzzleConfig,
	game::{choose_game, Session},
	generator::Generator,
	lexicon::Lexicon,
	store::PuzzleStore
};

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for generating and playing n-graph puzzles.
#[derive(Clone, Debug, Parser)]
#[command(
	version = "1.0",
	author = "Todd L Smith",
	after_help = "\
Rearrange the fragments so that every pair of neighbors spells a word, \
wrapping around from the last fragment to the first.

Example, with 2-letter fragments and 4-letter words:

    AL ME TO FU

rearranged becomes:

    ME AL TO FU

which spells MEAL, ALTO, TOFU, and FUME."
)]
struct Opts
{
	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Copy, Clone, Debug, Subcommand)]
enum Command
{
	/// Generate every puzzle of the given shape and write them to the puzzle
	/// file. This can take a very long time.
	Generate {
		/// The length of every fragment, in letters.
		fragment_size: usize,

		/// The length of every word, in letters. Must be a multiple of the
		/// fragment size.
		word_size: usize,

		/// The number of fragments in every puzzle.
		num_fragments: usize
	},

	/// Play a puzzle of the given shape, chosen from the puzzle file.
	Play {
		/// The length of every fragment, in letters.
		fragment_size: usize,

		/// The length of every word, in letters. Must be a multiple of the
		/// fragment size.
		word_size: usize,

		/// The number of fragments in every puzzle.
		num_fragments: usize,

		/// The minimum difficulty of the puzzle.
		level: usize
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main()
{
	env_logger::init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Execute the appropriate subcommand.
	let result = match opts.command
	{
		Command::Generate { fragment_size, word_size, num_fragments } =>
			PuzzleConfig::new(fragment_size, word_size, num_fragments)
				.map_err(Into::into)
				.and_then(generate),
		Command::Play { fragment_size, word_size, num_fragments, level } =>
			PuzzleConfig::new(fragment_size, word_size, num_fragments)
				.map_err(Into::into)
				.and_then(|config| play(config, level))
	};
	if let Err(e) = result
	{
		error!("{}", e);
		eprintln!("error: {}", e);
		process::exit(1);
	}
}

/// Generate every puzzle of the configuration and save them.
///
/// # Arguments
///
/// * `config` - The configuration of the puzzles.
///
/// # Errors
///
/// Any error that occurs while reading the word list, or writing the puzzle
/// file.
fn generate(config: PuzzleConfig) -> Result<(), Box<dyn Error>>
{
	let start = Instant::now();
	let lexicon = open_lexicon(&config)?;
	let mut generator = Generator::new(lexicon, config)?;
	let puzzles = generator.run()?;
	let path = PuzzleStore::new(".").save(&puzzles, &config)?;
	println!(
		"Wrote {} puzzles to {} in {:?}",
		puzzles.len(),
		path.display(),
		start.elapsed()
	);
	Ok(())
}

/// Choose a puzzle of the configuration and play it on the terminal.
///
/// # Arguments
///
/// * `config` - The configuration of the puzzles.
/// * `level` - The minimum difficulty of the puzzle.
///
/// # Errors
///
/// Any error that occurs while reading the word list or the puzzle file, if
/// no puzzle is difficult enough, or if standard input ends early.
fn play(config: PuzzleConfig, level: usize) -> Result<(), Box<dyn Error>>
{
	let lexicon = open_lexicon(&config)?;
	let puzzles = PuzzleStore::new(".").load(&config)?;
	let mut rng = rand::thread_rng();
	let puzzle = choose_game(&puzzles, level, &mut rng)?.clone();
	trace!("Chose puzzle: {:?}", puzzle);
	let session = Session::new(lexicon, puzzle);
	let stdin = io::stdin();
	let attempts = session.play(&mut rng, stdin.lock(), io::stdout())?;
	info!("Solved in {} attempts", attempts);
	Ok(())
}

/// Open the lexicon for the configuration from the working directory.
///
/// # Errors
///
/// Any error that occurs while reading the word list.
fn open_lexicon(config: &PuzzleConfig) -> Result<Rc<Lexicon>, Box<dyn Error>>
{
	let lexicon =
		Lexicon::open(".", config.fragment_size(), config.word_size())
			.map_err(|e| {
				format!(
					"failed to open word list for {}-letter words: {}",
					config.word_size(),
					e
				)
			})?;
	info!("Read {} words", lexicon.len());
	Ok(Rc::new(lexicon))
}
