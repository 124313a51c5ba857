//! # Fragments
//!
//! The value types of the puzzle: a [`Fragment`] is a short run of uppercase
//! letters (an _n-graph_), and a [`Word`] is the concatenation of one or more
//! fragments. Both are stored inline, so neither ever allocates.

use std::{
	error::Error,
	fmt::{self, Display, Formatter}
};

use fixedstr::{str32, str8};
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                 Fragments.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The longest supported fragment, in letters.
pub const MAX_FRAGMENT_SIZE: usize = 7;

/// The longest supported word, in letters.
pub const MAX_WORD_SIZE: usize = 31;

/// A word assembled from fragments.
pub type Word = str32;

/// A fragment is a short, immutable string of uppercase ASCII letters. Every
/// fragment of a given puzzle has the same length. Fragments serialize as
/// plain strings, and are validated on the way back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[must_use]
pub struct Fragment(str8);

impl Fragment
{
	/// Construct a fragment from the given text.
	///
	/// # Arguments
	///
	/// * `text` - The letters of the fragment.
	///
	/// # Returns
	///
	/// The fragment.
	///
	/// # Errors
	///
	/// * [`FragmentError::TooLong`] if `text` exceeds [`MAX_FRAGMENT_SIZE`].
	/// * [`FragmentError::InvalidChar`] if `text` contains anything other than
	///   uppercase ASCII letters.
	pub fn new(text: &str) -> Result<Self, FragmentError>
	{
		if text.len() > MAX_FRAGMENT_SIZE
		{
			return Err(FragmentError::TooLong(text.len()))
		}
		check_letters(text)?;
		Ok(Self(str8::from(text)))
	}

	/// Construct a fragment of exactly the given length.
	///
	/// # Arguments
	///
	/// * `text` - The letters of the fragment.
	/// * `size` - The required length.
	///
	/// # Returns
	///
	/// The fragment.
	///
	/// # Errors
	///
	/// * [`FragmentError::WrongLength`] if `text` is not `size` letters long.
	/// * Any error of [`Fragment::new`].
	pub fn with_size(text: &str, size: usize) -> Result<Self, FragmentError>
	{
		if text.len() != size
		{
			return Err(FragmentError::WrongLength {
				text: text.to_string(),
				expected: size
			})
		}
		Self::new(text)
	}

	/// Get the letters of the fragment.
	#[inline]
	#[must_use]
	pub fn as_str(&self) -> &str { self.0.as_str() }

	/// Get the length of the fragment, in letters.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	/// Check if the fragment is empty. Only the sole fragment of size zero is
	/// empty.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.len() == 0 }
}

impl Display for Fragment
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{}", self.as_str())
	}
}

impl TryFrom<String> for Fragment
{
	type Error = FragmentError;

	#[inline]
	fn try_from(value: String) -> Result<Self, Self::Error>
	{
		Self::new(&value)
	}
}

impl From<Fragment> for String
{
	#[inline]
	fn from(value: Fragment) -> Self { value.as_str().to_string() }
}

/// Concatenate the given fragments into a word.
///
/// # Arguments
///
/// * `fragments` - The fragments, in reading order.
///
/// # Returns
///
/// The word.
#[must_use]
pub fn concat<'a, I>(fragments: I) -> Word
	where I: IntoIterator<Item = &'a Fragment>
{
	let mut word = Word::new();
	for fragment in fragments
	{
		word.push(fragment.as_str());
	}
	word
}

/// Split a word into fragments of the given size.
///
/// # Arguments
///
/// * `word` - The word to split.
/// * `size` - The fragment size.
///
/// # Returns
///
/// The fragments of the word, in reading order.
///
/// # Errors
///
/// * [`FragmentError::WrongLength`] if the word is empty or its length is not
///   a multiple of `size`.
/// * [`FragmentError::InvalidChar`] if the word contains anything other than
///   uppercase ASCII letters.
pub fn split(word: &str, size: usize) -> Result<Vec<Fragment>, FragmentError>
{
	if size == 0 || word.is_empty() || word.len() % size != 0
	{
		return Err(FragmentError::WrongLength {
			text: word.to_string(),
			expected: size
		})
	}
	check_letters(word)?;
	// Only ASCII survives the check above, so every byte offset is a char
	// boundary.
	(0..word.len())
		.step_by(size)
		.map(|start| Fragment::new(&word[start..start + size]))
		.collect()
}

/// Ensure that the text comprises only uppercase ASCII letters.
fn check_letters(text: &str) -> Result<(), FragmentError>
{
	match text.chars().find(|c| !c.is_ascii_uppercase())
	{
		Some(c) => Err(FragmentError::InvalidChar(c)),
		None => Ok(())
	}
}

/// The complete enumeration of [`Fragment`] errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentError
{
	/// The text is longer than any fragment may be.
	TooLong(usize),

	/// The text does not have the required length.
	WrongLength
	{
		/// The offending text.
		text: String,

		/// The required length, or the unit it must be a multiple of.
		expected: usize
	},

	/// The text contains a character other than an uppercase ASCII letter.
	InvalidChar(char)
}

impl Display for FragmentError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::TooLong(len) => write!(
				f,
				"fragment of {} letters exceeds the maximum of {}",
				len,
				MAX_FRAGMENT_SIZE
			),
			Self::WrongLength { text, expected } => write!(
				f,
				"{:?} does not have the expected length ({})",
				text,
				expected
			),
			Self::InvalidChar(c) =>
				write!(f, "{:?} is not an uppercase letter", c)
		}
	}
}

impl Error for FragmentError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
