//! # Generator
//!
//! The puzzle generator exhaustively examines every candidate set of fragments
//! of a [`PuzzleConfig`] and collects those that are puzzles. This is an
//! offline batch job: it runs to completion in a single pass, and holds all of
//! its results in memory until the end.

use std::{rc::Rc, time::Instant};

use log::{debug, info, trace};

use crate::{
	combinatorics::{generate_fragments, subsets},
	config::{ConfigError, PuzzleConfig},
	fragment::FragmentError,
	lexicon::Lexicon,
	solver::{Solver, Verdict},
	store::Puzzle
};

/// How many candidates to examine between progress reports.
const PROGRESS_INTERVAL: usize = 1_000_000;

////////////////////////////////////////////////////////////////////////////////
//                                 Generator.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The puzzle generator for a single configuration.
#[derive(Clone, Debug)]
#[must_use]
pub struct Generator
{
	/// The configuration of the puzzles to generate.
	config: PuzzleConfig,

	/// The solver used to vet candidates.
	solver: Solver,

	/// The statistics of the most recent run.
	stats: GeneratorStats
}

impl Generator
{
	/// Construct a generator for the given lexicon and configuration.
	///
	/// # Arguments
	///
	/// * `lexicon` - The lexicon to use for checking words.
	/// * `config` - The configuration of the puzzles to generate.
	///
	/// # Returns
	///
	/// The generator.
	///
	/// # Errors
	///
	/// [`ConfigError::LexiconMismatch`] if the lexicon was built for different
	/// fragment or word sizes than the configuration.
	pub fn new(lexicon: Rc<Lexicon>, config: PuzzleConfig)
		-> Result<Self, ConfigError>
	{
		if lexicon.fragment_size() != config.fragment_size()
			|| lexicon.word_size() != config.word_size()
		{
			return Err(ConfigError::LexiconMismatch {
				fragment_size: lexicon.fragment_size(),
				word_size: lexicon.word_size()
			})
		}
		Ok(Self {
			config,
			solver: Solver::new(lexicon),
			stats: GeneratorStats::default()
		})
	}

	/// The statistics of the most recent run.
	#[inline]
	#[must_use]
	pub fn stats(&self) -> GeneratorStats { self.stats }

	/// Generate every puzzle of the configuration, in candidate order.
	///
	/// # Returns
	///
	/// The puzzles.
	///
	/// # Errors
	///
	/// [`FragmentError::TooLong`] if the fragment universe of the configuration
	/// cannot be generated.
	pub fn run(&mut self) -> Result<Vec<Puzzle>, FragmentError>
	{
		self.stats = GeneratorStats::default();

		let start = Instant::now();
		let universe = generate_fragments(self.config.fragment_size())?;
		info!(
			"Generated {} fragments in {:?}",
			universe.len(),
			start.elapsed()
		);

		let start = Instant::now();
		let mut puzzles = Vec::new();
		for candidate in subsets(&universe, self.config.num_fragments())
		{
			self.stats.examined += 1;
			if self.stats.examined % PROGRESS_INTERVAL == 0
			{
				debug!(
					"examined {} candidates, found {} puzzles",
					self.stats.examined,
					puzzles.len()
				);
			}
			// Every candidate is non-empty and drawn from the universe, so the
			// solver cannot object to it.
			match self.solver.check(&candidate)
			{
				Ok(Verdict::Unique(solution)) =>
				{
					let difficulty = self.solver.difficulty(&solution);
					debug!("found puzzle: {:?} ({})", solution, difficulty);
					puzzles.push(Puzzle { solution, difficulty });
				},
				Ok(Verdict::Infeasible) => self.stats.infeasible += 1,
				Ok(verdict) => trace!("rejected: {:?}", verdict),
				Err(e) => trace!("invalid candidate: {}", e)
			}
		}
		self.stats.accepted = puzzles.len();
		info!(
			"Found {} puzzles among {} candidates ({} infeasible) in {:?}",
			self.stats.accepted,
			self.stats.examined,
			self.stats.infeasible,
			start.elapsed()
		);
		Ok(puzzles)
	}
}

/// The statistics of a generator run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneratorStats
{
	/// The number of candidates examined.
	pub examined: usize,

	/// The number of candidates rejected by the feasibility test.
	pub infeasible: usize,

	/// The number of puzzles found.
	pub accepted: usize
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::rc::Rc;

	use crate::{
		config::{ConfigError, PuzzleConfig},
		fragment::Fragment,
		generator::Generator,
		lexicon::Lexicon,
		solver::derive_words
	};

	/// Make fragments from the given strings.
	fn fragments(texts: &[&str]) -> Vec<Fragment>
	{
		texts.iter().map(|t| Fragment::new(t).unwrap()).collect()
	}

	/// Make a lexicon of the given words.
	fn lexicon(fragment_size: usize, word_size: usize, words: &[&str])
		-> Rc<Lexicon>
	{
		let mut lexicon = Lexicon::new(fragment_size, word_size).unwrap();
		assert_eq!(lexicon.populate(words), 0);
		Rc::new(lexicon)
	}

	/// Ensure that exactly the uniquely solvable candidates of the universe
	/// become puzzles, in candidate order.
	#[test]
	fn test_run()
	{
		let lexicon = lexicon(
			1,
			2,
			&[
				// A unique cycle.
				"AB", "BC", "CA",
				// A cycle that also reads in reverse.
				"XY", "YZ", "ZX", "YX", "ZY", "XZ",
				// A unique cycle with a red herring.
				"MN", "NO", "OM", "MO"
			]
		);
		let config = PuzzleConfig::new(1, 2, 3).unwrap();
		let mut generator = Generator::new(Rc::clone(&lexicon), config).unwrap();
		let puzzles = generator.run().unwrap();
		assert_eq!(puzzles.len(), 2);
		assert_eq!(puzzles[0].solution, fragments(&["A", "B", "C"]));
		assert_eq!(puzzles[0].difficulty, 1);
		assert_eq!(puzzles[1].solution, fragments(&["M", "N", "O"]));
		assert_eq!(puzzles[1].difficulty, 4 / 3);
		for puzzle in puzzles.iter()
		{
			assert!(
				derive_words(&puzzle.solution, 2)
					.iter()
					.all(|w| lexicon.contains(w.as_str()))
			);
		}
		let stats = generator.stats();
		assert_eq!(stats.examined, 26 * 25 * 24 / 6);
		assert_eq!(stats.accepted, 2);
		assert!(stats.infeasible > 0);
	}

	/// Ensure that a lexicon of the wrong shape is refused.
	#[test]
	fn test_mismatch()
	{
		let lexicon = lexicon(2, 4, &["MEAL"]);
		let config = PuzzleConfig::new(1, 2, 3).unwrap();
		assert!(matches!(
			Generator::new(lexicon, config),
			Err(ConfigError::LexiconMismatch { fragment_size: 2, word_size: 4 })
		));
	}
}
