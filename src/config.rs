//! # Configuration
//!
//! A puzzle universe is identified by its [`PuzzleConfig`]: the fragment size,
//! the word size, and the number of fragments per puzzle. The configuration
//! also determines the names of every file that the program reads or writes.

use std::{
	error::Error,
	fmt::{self, Display, Formatter}
};

use crate::fragment::{MAX_FRAGMENT_SIZE, MAX_WORD_SIZE};

////////////////////////////////////////////////////////////////////////////////
//                               Configuration.                               //
////////////////////////////////////////////////////////////////////////////////

/// The validated configuration key of a puzzle universe. All puzzles of one
/// collection share a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct PuzzleConfig
{
	/// The length of every fragment, in letters.
	fragment_size: usize,

	/// The length of every word, in letters. Always a multiple of
	/// `fragment_size`.
	word_size: usize,

	/// The number of fragments in every puzzle.
	num_fragments: usize
}

impl PuzzleConfig
{
	/// Construct a configuration, validating it before any generation or
	/// search can begin.
	///
	/// # Arguments
	///
	/// * `fragment_size` - The length of every fragment, in letters.
	/// * `word_size` - The length of every word, in letters.
	/// * `num_fragments` - The number of fragments in every puzzle.
	///
	/// # Returns
	///
	/// The configuration.
	///
	/// # Errors
	///
	/// * Any error of [`check_sizes`].
	/// * [`ConfigError::FragmentCount`] if `num_fragments` is zero or exceeds
	///   the number of distinct fragments of `fragment_size`.
	pub fn new(
		fragment_size: usize,
		word_size: usize,
		num_fragments: usize
	) -> Result<Self, ConfigError>
	{
		check_sizes(fragment_size, word_size)?;
		// A universe too large for `usize` admits any count.
		let too_many = 26usize.checked_pow(fragment_size as u32)
			.map_or(false, |universe| num_fragments > universe);
		if num_fragments == 0 || too_many
		{
			return Err(ConfigError::FragmentCount(num_fragments))
		}
		Ok(Self { fragment_size, word_size, num_fragments })
	}

	/// The length of every fragment, in letters.
	#[inline]
	#[must_use]
	pub fn fragment_size(&self) -> usize { self.fragment_size }

	/// The length of every word, in letters.
	#[inline]
	#[must_use]
	pub fn word_size(&self) -> usize { self.word_size }

	/// The number of fragments in every puzzle.
	#[inline]
	#[must_use]
	pub fn num_fragments(&self) -> usize { self.num_fragments }

	/// The number of fragments that make up a single word.
	#[inline]
	#[must_use]
	pub fn span(&self) -> usize { self.word_size / self.fragment_size }

	/// The name of the file that holds the puzzle collection.
	#[must_use]
	pub fn puzzle_file_name(&self) -> String
	{
		format!(
			"puzzles-{}-{}-{}.jsonl",
			self.fragment_size,
			self.word_size,
			self.num_fragments
		)
	}
}

impl Display for PuzzleConfig
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(
			f,
			"{}-{}-{}",
			self.fragment_size,
			self.word_size,
			self.num_fragments
		)
	}
}

/// The name of the word list for the given word size.
#[inline]
#[must_use]
pub fn word_list_name(word_size: usize) -> String
{
	format!("words-{}.txt", word_size)
}

/// The name of the raw, whitespace-delimited word list for the given word
/// size.
#[inline]
#[must_use]
pub fn raw_word_list_name(word_size: usize) -> String
{
	format!("words-raw-{}.txt", word_size)
}

/// The name of the binary lexicon cache for the given sizes.
#[inline]
#[must_use]
pub fn lexicon_cache_name(fragment_size: usize, word_size: usize) -> String
{
	format!("words-{}-{}.lex", word_size, fragment_size)
}

/// Validate a fragment size and word size pair.
///
/// # Arguments
///
/// * `fragment_size` - The length of every fragment, in letters.
/// * `word_size` - The length of every word, in letters.
///
/// # Errors
///
/// * [`ConfigError::FragmentSize`] if `fragment_size` is zero or too large.
/// * [`ConfigError::WordSize`] if `word_size` is shorter than a fragment or
///   too large.
/// * [`ConfigError::NotMultiple`] if `word_size` is not a multiple of
///   `fragment_size`.
pub fn check_sizes(
	fragment_size: usize,
	word_size: usize
) -> Result<(), ConfigError>
{
	if fragment_size == 0 || fragment_size > MAX_FRAGMENT_SIZE
	{
		return Err(ConfigError::FragmentSize(fragment_size))
	}
	if word_size < fragment_size || word_size > MAX_WORD_SIZE
	{
		return Err(ConfigError::WordSize(word_size))
	}
	if word_size % fragment_size != 0
	{
		return Err(ConfigError::NotMultiple { fragment_size, word_size })
	}
	Ok(())
}

/// The complete enumeration of configuration errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError
{
	/// The fragment size is zero or exceeds the supported maximum.
	FragmentSize(usize),

	/// The word size is shorter than a fragment or exceeds the supported
	/// maximum.
	WordSize(usize),

	/// The word size is not a multiple of the fragment size.
	NotMultiple
	{
		fragment_size: usize,
		word_size: usize
	},

	/// The fragment count is zero or exceeds the fragment universe.
	FragmentCount(usize),

	/// A lexicon was built for different sizes than the configuration.
	LexiconMismatch
	{
		fragment_size: usize,
		word_size: usize
	}
}

impl Display for ConfigError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::FragmentSize(size) => write!(
				f,
				"fragment size must be between 1 and {}: {}",
				MAX_FRAGMENT_SIZE,
				size
			),
			Self::WordSize(size) => write!(
				f,
				"word size must be between the fragment size and {}: {}",
				MAX_WORD_SIZE,
				size
			),
			Self::NotMultiple { fragment_size, word_size } => write!(
				f,
				"word size {} is not a multiple of fragment size {}",
				word_size,
				fragment_size
			),
			Self::FragmentCount(count) =>
				write!(f, "invalid number of fragments: {}", count),
			Self::LexiconMismatch { fragment_size, word_size } => write!(
				f,
				"lexicon was built for fragment size {} and word size {}",
				fragment_size,
				word_size
			)
		}
	}
}

impl Error for ConfigError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::config::{ConfigError, PuzzleConfig};

	/// Ensure that valid configurations are accepted and derive the expected
	/// values.
	#[test]
	fn test_valid()
	{
		let config = PuzzleConfig::new(2, 4, 4).unwrap();
		assert_eq!(config.span(), 2);
		assert_eq!(config.puzzle_file_name(), "puzzles-2-4-4.jsonl");
		assert_eq!(config.to_string(), "2-4-4");
		let config = PuzzleConfig::new(3, 9, 6).unwrap();
		assert_eq!(config.span(), 3);
	}

	/// Ensure that every kind of invalid configuration is rejected.
	#[test]
	fn test_invalid()
	{
		assert_eq!(
			PuzzleConfig::new(0, 4, 4),
			Err(ConfigError::FragmentSize(0))
		);
		assert_eq!(
			PuzzleConfig::new(8, 16, 4),
			Err(ConfigError::FragmentSize(8))
		);
		assert_eq!(PuzzleConfig::new(3, 2, 4), Err(ConfigError::WordSize(2)));
		assert_eq!(
			PuzzleConfig::new(2, 32, 4),
			Err(ConfigError::WordSize(32))
		);
		assert_eq!(
			PuzzleConfig::new(2, 5, 4),
			Err(ConfigError::NotMultiple { fragment_size: 2, word_size: 5 })
		);
		assert_eq!(
			PuzzleConfig::new(2, 4, 0),
			Err(ConfigError::FragmentCount(0))
		);
		assert_eq!(
			PuzzleConfig::new(1, 2, 27),
			Err(ConfigError::FragmentCount(27))
		);
	}

	/// Ensure that the fragment count is bounded by the number of distinct
	/// fragments, even for the largest fragment size.
	#[test]
	fn test_fragment_count_bound()
	{
		assert!(PuzzleConfig::new(1, 2, 26).is_ok());
		assert!(PuzzleConfig::new(2, 4, 676).is_ok());
		assert_eq!(
			PuzzleConfig::new(2, 4, 677),
			Err(ConfigError::FragmentCount(677))
		);
		assert!(PuzzleConfig::new(7, 14, 4).is_ok());
		assert_eq!(
			PuzzleConfig::new(7, 14, 0),
			Err(ConfigError::FragmentCount(0))
		);
		match 26usize.checked_pow(7)
		{
			Some(universe) =>
			{
				assert!(PuzzleConfig::new(7, 14, universe).is_ok());
				assert_eq!(
					PuzzleConfig::new(7, 14, universe + 1),
					Err(ConfigError::FragmentCount(universe + 1))
				);
			},
			None => assert!(PuzzleConfig::new(7, 14, usize::MAX).is_ok())
		}
	}
}
