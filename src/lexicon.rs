//! # Lexicon
//!
//! Herein is support for lexicon construction and querying. All runtime
//! operations are performed against a [`Lexicon`], which is a prefix tree of
//! words keyed on fragments rather than letters. Every word of a lexicon has
//! the same length, so every path from the root to a terminal node has the
//! same number of fragments.

use std::{
	collections::HashMap,
	fs::File,
	io::{self, BufRead, BufReader, BufWriter, ErrorKind, Read, Write},
	path::Path
};

use log::{info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
	config::{
		check_sizes, lexicon_cache_name, raw_word_list_name, word_list_name,
		ConfigError
	},
	fragment::{split, Fragment, FragmentError}
};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// A lexicon is a prefix tree of fixed-length words, where each edge is
/// labeled by a fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Lexicon
{
	/// The length of every fragment, in letters.
	fragment_size: usize,

	/// The length of every word, in letters.
	word_size: usize,

	/// The number of distinct words in the lexicon.
	len: usize,

	/// The root of the prefix tree.
	root: Node
}

/// A node of the prefix tree. Whether a node is terminal is decided by its
/// depth, so no end marker is needed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Node
{
	/// The children of the node, keyed by the fragment on the connecting edge.
	children: HashMap<Fragment, Node>
}

impl Node
{
	/// Check whether some path of exactly `remaining` further fragments, each
	/// drawn from `pool`, leads from this node to a terminal node.
	fn completes(&self, pool: &[Fragment], remaining: usize) -> bool
	{
		if remaining == 0
		{
			return true
		}
		pool.iter().any(|fragment| {
			self.children
				.get(fragment)
				.map_or(false, |child| child.completes(pool, remaining - 1))
		})
	}
}

impl Lexicon
{
	/// Construct an empty lexicon for words of `word_size` letters, each
	/// decomposed into fragments of `fragment_size` letters.
	///
	/// # Arguments
	///
	/// * `fragment_size` - The length of every fragment, in letters.
	/// * `word_size` - The length of every word, in letters.
	///
	/// # Returns
	///
	/// An empty lexicon.
	///
	/// # Errors
	///
	/// Any error of [`check_sizes`].
	pub fn new(fragment_size: usize, word_size: usize)
		-> Result<Self, ConfigError>
	{
		check_sizes(fragment_size, word_size)?;
		Ok(Self { fragment_size, word_size, len: 0, root: Node::default() })
	}

	/// The length of every fragment, in letters.
	#[inline]
	#[must_use]
	pub fn fragment_size(&self) -> usize { self.fragment_size }

	/// The length of every word, in letters.
	#[inline]
	#[must_use]
	pub fn word_size(&self) -> usize { self.word_size }

	/// The number of fragments per word, which is also the depth of the tree.
	#[inline]
	#[must_use]
	pub fn span(&self) -> usize { self.word_size / self.fragment_size }

	/// The number of distinct words in the lexicon.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.len }

	/// Check if the lexicon is empty.
	///
	/// # Returns
	///
	/// `true` if the lexicon is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.len == 0 }

	/// Insert a word into the lexicon.
	///
	/// # Arguments
	///
	/// * `word` - The word to insert.
	///
	/// # Returns
	///
	/// `true` if the word was not already present, `false` otherwise.
	///
	/// # Errors
	///
	/// * [`FragmentError::WrongLength`] if the word does not have exactly
	///   [`word_size`](Self::word_size) letters.
	/// * [`FragmentError::InvalidChar`] if the word contains anything other
	///   than uppercase ASCII letters.
	pub fn insert(&mut self, word: &str) -> Result<bool, FragmentError>
	{
		let fragments = self.decompose(word)?;
		let mut node = &mut self.root;
		let mut added = false;
		for fragment in fragments
		{
			node = node.children.entry(fragment).or_insert_with(|| {
				added = true;
				Node::default()
			});
		}
		if added
		{
			self.len += 1;
		}
		Ok(added)
	}

	/// Check if the lexicon contains the given word. Malformed input is never
	/// a member.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the lexicon contains the word, `false` otherwise.
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		match self.decompose(word)
		{
			Ok(fragments) => self.contains_path(&fragments),
			Err(e) =>
			{
				trace!("rejected lookup: {}", e);
				false
			}
		}
	}

	/// Check if the lexicon contains the word spelled by the given fragment
	/// path. The path must comprise exactly [`span`](Self::span) fragments.
	///
	/// # Arguments
	///
	/// * `path` - The fragments, in reading order.
	///
	/// # Returns
	///
	/// `true` if the lexicon contains the word, `false` otherwise.
	#[must_use]
	pub fn contains_path<'a, I>(&self, path: I) -> bool
		where I: IntoIterator<Item = &'a Fragment>
	{
		let mut node = &self.root;
		let mut depth = 0;
		for fragment in path
		{
			match node.children.get(fragment)
			{
				Some(child) => node = child,
				None => return false
			}
			depth += 1;
		}
		depth == self.span()
	}

	/// Check if some word of the lexicon begins with `first` and continues
	/// only with fragments drawn from `pool`. Fragments may recur.
	///
	/// # Arguments
	///
	/// * `first` - The leading fragment.
	/// * `pool` - The fragments available for the remainder of the word.
	///
	/// # Returns
	///
	/// `true` if such a word exists, `false` otherwise.
	#[must_use]
	pub fn begins_chain(&self, first: &Fragment, pool: &[Fragment]) -> bool
	{
		self.root
			.children
			.get(first)
			.map_or(false, |node| node.completes(pool, self.span() - 1))
	}

	/// Populate the lexicon with the given words. Malformed words are skipped.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the lexicon.
	///
	/// # Returns
	///
	/// The number of words skipped because they were malformed.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T]) -> usize
	{
		let mut skipped = 0;
		for word in words
		{
			if let Err(e) = self.insert(word.as_ref())
			{
				warn!("Skipping word: {}", e);
				skipped += 1;
			}
		}
		skipped
	}

	/// Split a word into the fragments of this lexicon, validating its shape.
	fn decompose(&self, word: &str) -> Result<Vec<Fragment>, FragmentError>
	{
		if word.len() != self.word_size
		{
			return Err(FragmentError::WrongLength {
				text: word.to_string(),
				expected: self.word_size
			})
		}
		split(word, self.fragment_size)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                Persistence.                                //
////////////////////////////////////////////////////////////////////////////////

impl Lexicon
{
	/// Open the lexicon for the given sizes. Only the specified directory will
	/// be searched. If a binary lexicon (`words-<w>-<f>.lex`) exists, is newer
	/// than the word list (`words-<w>.txt`), and was built for the same sizes,
	/// it will be read; otherwise, the word list will be read and a binary
	/// lexicon will be created (to optimize future reads). If the word list
	/// is absent but a raw word list (`words-raw-<w>.txt`) is present, the raw
	/// list is first reflowed into a word list.
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `fragment_size` - The length of every fragment, in letters.
	/// * `word_size` - The length of every word, in letters.
	///
	/// # Returns
	///
	/// A lexicon containing the words from the file.
	///
	/// # Errors
	///
	/// * If the word list cannot be found, opened, or read, an error is
	///   returned.
	/// * If the sizes are invalid, an [`ErrorKind::InvalidInput`] is returned.
	pub fn open<T: AsRef<Path>>(
		dir: T,
		fragment_size: usize,
		word_size: usize
	) -> Result<Self, io::Error>
	{
		let dir = dir.as_ref();
		let lex_path = dir.join(lexicon_cache_name(fragment_size, word_size));
		let txt_path = dir.join(word_list_name(word_size));
		let raw_path = dir.join(raw_word_list_name(word_size));
		if !txt_path.exists() && raw_path.exists()
		{
			let count = reflow_raw_file(&raw_path, &txt_path)?;
			info!(
				"Reflowed {} words: {} => {}",
				count,
				raw_path.display(),
				txt_path.display()
			);
		}
		// Use the binary lexicon only if it's newer than the word list. If
		// anything goes wrong, fall back to reading the word list. The
		// `metadata` call fails if the binary lexicon doesn't exist.
		let fresh = lex_path
			.metadata()
			.and_then(|m| m.modified())
			.and_then(|lex_time| {
				txt_path
					.metadata()
					.and_then(|n| n.modified())
					.map(|txt_time| lex_time > txt_time)
			})
			.unwrap_or(false);
		if fresh
		{
			match Self::deserialize_from_file(&lex_path)
			{
				Ok(lexicon)
					if lexicon.fragment_size == fragment_size
						&& lexicon.word_size == word_size =>
				{
					trace!("Read binary lexicon: {}", lex_path.display());
					return Ok(lexicon)
				},
				Ok(_) => warn!(
					"Ignoring binary lexicon built for other sizes: {}",
					lex_path.display()
				),
				Err(e) => warn!(
					"Ignoring unreadable binary lexicon: {}: {}",
					lex_path.display(),
					e
				)
			}
		}
		let lexicon = Self::read_from_file(&txt_path, fragment_size, word_size)?;
		trace!("Read word list: {}", txt_path.display());
		match lexicon.serialize_to_file(&lex_path)
		{
			Ok(_) => trace!("Wrote binary lexicon: {}", lex_path.display()),
			Err(e) => warn!(
				"Failed to write binary lexicon: {}: {}",
				lex_path.display(),
				e
			)
		}
		Ok(lexicon)
	}

	/// Construct a lexicon from the contents of the given file. Each line in
	/// the file is considered a single word. Blank lines are ignored, and
	/// malformed words are skipped with a warning.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	/// * `fragment_size` - The length of every fragment, in letters.
	/// * `word_size` - The length of every word, in letters.
	///
	/// # Returns
	///
	/// A lexicon containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the sizes are invalid, an [`ErrorKind::InvalidInput`] is returned.
	pub fn read_from_file<T: AsRef<Path>>(
		path: T,
		fragment_size: usize,
		word_size: usize
	) -> Result<Self, io::Error>
	{
		let mut lexicon = Self::new(fragment_size, word_size)
			.map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let mut words = Vec::new();
		for line in reader.lines()
		{
			let line = line?;
			let word = line.trim();
			if !word.is_empty()
			{
				words.push(word.to_string());
			}
		}
		let skipped = lexicon.populate(&words);
		if skipped > 0
		{
			warn!("Skipped {} malformed words", skipped);
		}
		Ok(lexicon)
	}

	/// Deserialize a lexicon from the given file. The file must contain a
	/// serialized lexicon in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A lexicon deserialized from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		let lexicon = bincode::deserialize(&content)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		Ok(lexicon)
	}

	/// Serialize the lexicon to the given file. The lexicon is serialized in
	/// [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or written, an error is returned.
	/// * If the lexicon cannot be encoded, an [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let mut file = File::create(path)?;
		let content = bincode::serialize(self)
			.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
		file.write_all(&content)?;
		Ok(())
	}
}

/// Reflow a raw word list, in which words are separated by arbitrary
/// whitespace, into one uppercase word per line.
///
/// # Arguments
///
/// * `raw` - The raw word list.
/// * `out` - The destination of the reflowed word list.
///
/// # Returns
///
/// The number of words written.
///
/// # Errors
///
/// Any error that occurs while reading or writing.
pub fn reflow_raw<R: BufRead, W: Write>(raw: R, mut out: W)
	-> Result<usize, io::Error>
{
	let mut count = 0;
	for line in raw.lines()
	{
		for word in line?.split_whitespace()
		{
			writeln!(out, "{}", word.to_uppercase())?;
			count += 1;
		}
	}
	out.flush()?;
	Ok(count)
}

/// Reflow the raw word list at `src` into a word list at `dst`.
///
/// # Errors
///
/// Any error that occurs while reading or writing.
pub fn reflow_raw_file<S, D>(src: S, dst: D) -> Result<usize, io::Error>
	where S: AsRef<Path>, D: AsRef<Path>
{
	let raw = BufReader::new(File::open(src)?);
	let out = BufWriter::new(File::create(dst)?);
	reflow_raw(raw, out)
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
