//! # Puzzle store
//!
//! Generated puzzles are persisted as line-delimited JSON, one [`Puzzle`] per
//! line, in a file named after the [`PuzzleConfig`] of the collection. A
//! collection is validated against its configuration when it is loaded, and
//! any malformed record fails the whole load.

use std::{
	collections::HashSet,
	error::Error,
	fmt::{self, Display, Formatter},
	fs::File,
	io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write},
	path::{Path, PathBuf}
};

use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::{config::PuzzleConfig, fragment::Fragment};

////////////////////////////////////////////////////////////////////////////////
//                                  Puzzles.                                  //
////////////////////////////////////////////////////////////////////////////////

/// A puzzle: its fragments, arranged in the canonical cyclic solution, and its
/// difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Puzzle
{
	/// The fragments, in solution order.
	pub solution: Vec<Fragment>,

	/// The difficulty of the puzzle. Higher is harder.
	pub difficulty: usize
}

impl Puzzle
{
	/// Check that the puzzle belongs to the given configuration.
	///
	/// # Arguments
	///
	/// * `config` - The configuration of the collection.
	///
	/// # Errors
	///
	/// A description of the first discrepancy found.
	fn validate(&self, config: &PuzzleConfig) -> Result<(), String>
	{
		if self.solution.len() != config.num_fragments()
		{
			return Err(format!(
				"expected {} fragments, found {}",
				config.num_fragments(),
				self.solution.len()
			))
		}
		if let Some(fragment) = self.solution.iter()
			.find(|f| f.len() != config.fragment_size())
		{
			return Err(format!(
				"fragment {} does not have {} letters",
				fragment,
				config.fragment_size()
			))
		}
		let distinct = self.solution.iter().collect::<HashSet<_>>();
		if distinct.len() != self.solution.len()
		{
			return Err("fragments are not distinct".to_string())
		}
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Store.                                   //
////////////////////////////////////////////////////////////////////////////////

/// A directory of puzzle collections, one file per configuration.
#[derive(Clone, Debug)]
#[must_use]
pub struct PuzzleStore
{
	/// The directory that holds the collections.
	dir: PathBuf
}

impl PuzzleStore
{
	/// Construct a store over the given directory.
	pub fn new<T: AsRef<Path>>(dir: T) -> Self
	{
		Self { dir: dir.as_ref().to_path_buf() }
	}

	/// The path of the collection for the given configuration.
	#[inline]
	#[must_use]
	pub fn path(&self, config: &PuzzleConfig) -> PathBuf
	{
		self.dir.join(config.puzzle_file_name())
	}

	/// Save a collection, replacing any previous collection for the same
	/// configuration.
	///
	/// # Arguments
	///
	/// * `puzzles` - The puzzles to save.
	/// * `config` - The configuration of the collection.
	///
	/// # Returns
	///
	/// The path of the file written.
	///
	/// # Errors
	///
	/// [`StoreError::Io`] if the file cannot be created or written.
	pub fn save(&self, puzzles: &[Puzzle], config: &PuzzleConfig)
		-> Result<PathBuf, StoreError>
	{
		let path = self.path(config);
		let mut writer = BufWriter::new(File::create(&path)?);
		for puzzle in puzzles
		{
			serde_json::to_writer(&mut writer, puzzle)
				.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
			writeln!(writer)?;
		}
		writer.flush()?;
		info!("Wrote {} puzzles: {}", puzzles.len(), path.display());
		Ok(path)
	}

	/// Load the collection for the given configuration. Blank lines are
	/// ignored; every other line must be a well-formed record of a puzzle that
	/// belongs to the configuration.
	///
	/// # Arguments
	///
	/// * `config` - The configuration of the collection.
	///
	/// # Returns
	///
	/// The puzzles, in file order.
	///
	/// # Errors
	///
	/// * [`StoreError::Missing`] if there is no collection for the
	///   configuration.
	/// * [`StoreError::Malformed`] if a record cannot be parsed.
	/// * [`StoreError::Mismatch`] if a record does not belong to the
	///   configuration.
	/// * [`StoreError::Io`] if the file cannot be read.
	pub fn load(&self, config: &PuzzleConfig) -> Result<Vec<Puzzle>, StoreError>
	{
		let path = self.path(config);
		let file = match File::open(&path)
		{
			Ok(file) => file,
			Err(e) if e.kind() == ErrorKind::NotFound =>
				return Err(StoreError::Missing(path)),
			Err(e) => return Err(e.into())
		};
		let mut puzzles = Vec::new();
		for (index, line) in BufReader::new(file).lines().enumerate()
		{
			let line = line?;
			if line.trim().is_empty()
			{
				continue
			}
			let puzzle = serde_json::from_str::<Puzzle>(&line)
				.map_err(|e| StoreError::Malformed {
					line: index + 1,
					reason: e.to_string()
				})?;
			puzzle.validate(config)
				.map_err(|reason| StoreError::Mismatch {
					line: index + 1,
					reason
				})?;
			puzzles.push(puzzle);
		}
		trace!("Read {} puzzles: {}", puzzles.len(), path.display());
		Ok(puzzles)
	}
}

/// The complete enumeration of [`PuzzleStore`] errors.
#[derive(Debug)]
pub enum StoreError
{
	/// The collection could not be read or written.
	Io(io::Error),

	/// There is no collection at the given path.
	Missing(PathBuf),

	/// A record could not be parsed.
	Malformed
	{
		/// The line number of the record, starting from 1.
		line: usize,

		/// What went wrong.
		reason: String
	},

	/// A record does not belong to the configuration of the collection.
	Mismatch
	{
		/// The line number of the record, starting from 1.
		line: usize,

		/// What went wrong.
		reason: String
	}
}

impl From<io::Error> for StoreError
{
	fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl Display for StoreError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Io(e) => write!(f, "puzzle store: {}", e),
			Self::Missing(path) => write!(
				f,
				"no puzzles have been generated: {}",
				path.display()
			),
			Self::Malformed { line, reason } =>
				write!(f, "malformed puzzle on line {}: {}", line, reason),
			Self::Mismatch { line, reason } =>
				write!(f, "wrong kind of puzzle on line {}: {}", line, reason)
		}
	}
}

impl Error for StoreError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::Io(e) => Some(e),
			_ => None
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
