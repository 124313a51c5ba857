//! # Game
//!
//! Herein is the interactive game: choose a puzzle from a collection, show its
//! fragments in a random order, and check the player's guesses until one of
//! them closes the cycle.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	io::{self, BufRead, ErrorKind, Write},
	rc::Rc
};

use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

use crate::{
	fragment::{Fragment, FragmentError, Word},
	lexicon::Lexicon,
	solver::derive_words,
	store::Puzzle
};

////////////////////////////////////////////////////////////////////////////////
//                              Choosing a game.                              //
////////////////////////////////////////////////////////////////////////////////

/// Choose a puzzle uniformly at random from those at least as difficult as
/// `min_difficulty`.
///
/// # Arguments
///
/// * `puzzles` - The collection to choose from.
/// * `min_difficulty` - The minimum acceptable difficulty.
/// * `rng` - The source of randomness.
///
/// # Returns
///
/// The chosen puzzle.
///
/// # Errors
///
/// [`GameError::NoQualifyingPuzzle`] if no puzzle is difficult enough.
pub fn choose_game<'a, R: Rng + ?Sized>(
	puzzles: &'a [Puzzle],
	min_difficulty: usize,
	rng: &mut R
) -> Result<&'a Puzzle, GameError>
{
	let qualifying = puzzles.iter()
		.filter(|p| p.difficulty >= min_difficulty)
		.collect::<Vec<_>>();
	debug!(
		"{} of {} puzzles have difficulty {} or more",
		qualifying.len(),
		puzzles.len(),
		min_difficulty
	);
	qualifying.choose(rng).copied().ok_or(GameError::NoQualifyingPuzzle {
		min_difficulty,
		available: puzzles.len()
	})
}

/// Shuffle the fragments of a puzzle for presentation. The puzzle itself is
/// left intact, so that guesses can still be checked against it.
///
/// # Arguments
///
/// * `puzzle` - The puzzle to present.
/// * `rng` - The source of randomness.
///
/// # Returns
///
/// The fragments of the puzzle, in random order.
#[must_use]
pub fn present<R: Rng + ?Sized>(puzzle: &Puzzle, rng: &mut R) -> Vec<Fragment>
{
	let mut fragments = puzzle.solution.clone();
	fragments.shuffle(rng);
	fragments
}

////////////////////////////////////////////////////////////////////////////////
//                                  Guesses.                                  //
////////////////////////////////////////////////////////////////////////////////

/// Parse a guess: fragments separated by whitespace, in any case.
///
/// # Arguments
///
/// * `line` - The line entered by the player.
/// * `fragment_size` - The length of every fragment, in letters.
///
/// # Returns
///
/// The fragments of the guess, in order.
///
/// # Errors
///
/// Any error of [`Fragment::with_size`], for the first malformed fragment.
pub fn parse_guess(line: &str, fragment_size: usize)
	-> Result<Vec<Fragment>, FragmentError>
{
	line.split_whitespace()
		.map(|text| Fragment::with_size(&text.to_uppercase(), fragment_size))
		.collect()
}

/// Check a guess against a puzzle. The guess must use exactly the fragments
/// of the puzzle, and every word that it derives must be in the lexicon. Any
/// such arrangement wins, whether or not it is the stored solution.
///
/// # Arguments
///
/// * `guess` - The fragments of the guess, in cyclic order.
/// * `puzzle` - The puzzle being played.
/// * `lexicon` - The lexicon to use for checking words.
///
/// # Returns
///
/// The outcome of the guess.
pub fn check_guess(guess: &[Fragment], puzzle: &Puzzle, lexicon: &Lexicon)
	-> GuessOutcome
{
	let mut given = guess.to_vec();
	let mut expected = puzzle.solution.clone();
	given.sort_by(|a, b| a.as_str().cmp(b.as_str()));
	expected.sort_by(|a, b| a.as_str().cmp(b.as_str()));
	if given != expected
	{
		return GuessOutcome::WrongFragments
	}
	match derive_words(guess, lexicon.span())
		.into_iter()
		.find(|word| !lexicon.contains(word.as_str()))
	{
		Some(word) => GuessOutcome::InvalidWord(word),
		None => GuessOutcome::Solved
	}
}

/// The outcome of checking a guess. The [`Display`] implementation gives the
/// message for the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum GuessOutcome
{
	/// The guess closes the cycle.
	Solved,

	/// The guess does not use exactly the fragments of the puzzle.
	WrongFragments,

	/// The guess derives a word that is not in the lexicon. This is the
	/// first such word.
	InvalidWord(Word)
}

impl GuessOutcome
{
	/// Check if the guess solved the puzzle.
	#[inline]
	#[must_use]
	pub fn is_solved(&self) -> bool { matches!(self, Self::Solved) }
}

impl Display for GuessOutcome
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Solved => write!(f, "Solved! Every word checks out."),
			Self::WrongFragments =>
				write!(f, "Those aren't the fragments of this puzzle."),
			Self::InvalidWord(word) =>
				write!(f, "Sorry, {} isn't a word.", word)
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Sessions.                                  //
////////////////////////////////////////////////////////////////////////////////

/// A single game: one puzzle, played until solved.
#[derive(Clone, Debug)]
#[must_use]
pub struct Session
{
	/// The lexicon to use for checking words.
	lexicon: Rc<Lexicon>,

	/// The puzzle being played.
	puzzle: Puzzle
}

impl Session
{
	/// Start a session for the given puzzle.
	///
	/// # Arguments
	///
	/// * `lexicon` - The lexicon to use for checking words.
	/// * `puzzle` - The puzzle to play.
	///
	/// # Returns
	///
	/// The session.
	pub fn new(lexicon: Rc<Lexicon>, puzzle: Puzzle) -> Self
	{
		Self { lexicon, puzzle }
	}

	/// Play the session: show the shuffled fragments, then prompt for guesses
	/// until one solves the puzzle. Malformed and incorrect guesses are
	/// reported and the player is prompted again.
	///
	/// # Arguments
	///
	/// * `rng` - The source of randomness, for shuffling.
	/// * `input` - The source of guesses, one per line.
	/// * `output` - The destination of prompts and messages.
	///
	/// # Returns
	///
	/// The number of guesses made, including the winning one.
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnexpectedEof`] if the input ends before the puzzle is
	///   solved.
	/// * Any error that occurs while reading or writing.
	pub fn play<G, R, W>(&self, rng: &mut G, mut input: R, mut output: W)
		-> Result<usize, io::Error>
		where G: Rng + ?Sized, R: BufRead, W: Write
	{
		let shown = present(&self.puzzle, rng)
			.iter()
			.map(|f| f.as_str())
			.collect::<Vec<_>>()
			.join(" ");
		writeln!(output, "{}", shown)?;
		let mut attempts = 0;
		loop
		{
			write!(output, "Solution: ")?;
			output.flush()?;
			// Undecodable bytes become replacement characters, which the
			// parser rejects like any other malformed guess.
			let mut buf = Vec::new();
			if input.read_until(b'\n', &mut buf)? == 0
			{
				return Err(io::Error::new(
					ErrorKind::UnexpectedEof,
					"input ended before the puzzle was solved"
				))
			}
			attempts += 1;
			let fragment_size = self.lexicon.fragment_size();
			let line = String::from_utf8_lossy(&buf);
			match parse_guess(&line, fragment_size)
			{
				Ok(guess) =>
				{
					let outcome = check_guess(&guess, &self.puzzle, &self.lexicon);
					trace!("guess {:?}: {:?}", guess, outcome);
					writeln!(output, "{}", outcome)?;
					if outcome.is_solved()
					{
						return Ok(attempts)
					}
				},
				Err(e) => writeln!(output, "Couldn't read that guess: {}", e)?
			}
		}
	}
}

/// The complete enumeration of game errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError
{
	/// No puzzle of the collection meets the minimum difficulty.
	NoQualifyingPuzzle
	{
		/// The minimum difficulty requested.
		min_difficulty: usize,

		/// The number of puzzles in the collection.
		available: usize
	}
}

impl Display for GameError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::NoQualifyingPuzzle { min_difficulty, available } => write!(
				f,
				"none of the {} puzzles has difficulty {} or more",
				available,
				min_difficulty
			)
		}
	}
}

impl Error for GameError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{io::{Cursor, ErrorKind}, rc::Rc};

	use rand::{rngs::StdRng, SeedableRng};

	use crate::{
		fragment::{Fragment, Word},
		game::{
			check_guess, choose_game, parse_guess, present, GameError,
			GuessOutcome, Session
		},
		lexicon::Lexicon,
		store::Puzzle
	};

	/// Make fragments from the given strings.
	fn fragments(texts: &[&str]) -> Vec<Fragment>
	{
		texts.iter().map(|t| Fragment::new(t).unwrap()).collect()
	}

	/// The lexicon of the canonical example.
	fn lexicon() -> Rc<Lexicon>
	{
		let mut lexicon = Lexicon::new(2, 4).unwrap();
		lexicon.populate(&["MEAL", "ALTO", "TOFU", "FUME"]);
		Rc::new(lexicon)
	}

	/// The canonical example.
	fn puzzle() -> Puzzle
	{
		Puzzle { solution: fragments(&["ME", "AL", "TO", "FU"]), difficulty: 1 }
	}

	/// Ensure that only sufficiently difficult puzzles are chosen, and that an
	/// unsatisfiable request fails instead of looping.
	#[test]
	fn test_choose_game()
	{
		let mut rng = StdRng::seed_from_u64(7);
		let puzzles = (0..10)
			.map(|difficulty| Puzzle { difficulty, ..puzzle() })
			.collect::<Vec<_>>();
		for _ in 0..100
		{
			let chosen = choose_game(&puzzles, 7, &mut rng).unwrap();
			assert!(chosen.difficulty >= 7);
		}
		assert_eq!(
			choose_game(&puzzles, 10, &mut rng),
			Err(GameError::NoQualifyingPuzzle {
				min_difficulty: 10,
				available: 10
			})
		);
		assert!(choose_game(&[], 0, &mut rng).is_err());
	}

	/// Ensure that presentation shuffles a copy, not the puzzle.
	#[test]
	fn test_present()
	{
		let mut rng = StdRng::seed_from_u64(42);
		let puzzle = puzzle();
		let mut shown = present(&puzzle, &mut rng);
		assert_eq!(puzzle, self::puzzle());
		shown.sort_by(|a, b| a.as_str().cmp(b.as_str()));
		assert_eq!(shown, fragments(&["AL", "FU", "ME", "TO"]));
	}

	/// Ensure that guesses are parsed case-insensitively and validated.
	#[test]
	fn test_parse_guess()
	{
		assert_eq!(
			parse_guess("al to  Fu ME\n", 2).unwrap(),
			fragments(&["AL", "TO", "FU", "ME"])
		);
		assert!(parse_guess("al tof fu me", 2).is_err());
		assert!(parse_guess("al t0 fu me", 2).is_err());
	}

	/// Ensure that guesses are judged correctly.
	#[test]
	fn test_check_guess()
	{
		let lexicon = lexicon();
		let puzzle = puzzle();
		// Any rotation of the solution wins.
		let outcome = check_guess(
			&fragments(&["AL", "TO", "FU", "ME"]),
			&puzzle,
			&lexicon
		);
		assert!(outcome.is_solved());
		assert_eq!(
			check_guess(&fragments(&["ME", "TO", "AL", "FU"]), &puzzle, &lexicon),
			GuessOutcome::InvalidWord(Word::from("METO"))
		);
		assert_eq!(
			check_guess(&fragments(&["ME", "AL", "TO"]), &puzzle, &lexicon),
			GuessOutcome::WrongFragments
		);
		assert_eq!(
			check_guess(
				&fragments(&["ME", "AL", "TO", "TO"]),
				&puzzle,
				&lexicon
			),
			GuessOutcome::WrongFragments
		);
		assert_eq!(
			check_guess(
				&fragments(&["ME", "AL", "TO", "FU", "ME"]),
				&puzzle,
				&lexicon
			),
			GuessOutcome::WrongFragments
		);
	}

	/// Ensure that a session prompts until the puzzle is solved.
	#[test]
	fn test_play()
	{
		let mut rng = StdRng::seed_from_u64(1);
		let session = Session::new(lexicon(), puzzle());
		let input = Cursor::new("me to al fu\nme al\nm e a l\nfu me al to\n");
		let mut output = Vec::new();
		let attempts = session.play(&mut rng, input, &mut output).unwrap();
		assert_eq!(attempts, 4);
		let output = String::from_utf8(output).unwrap();
		let mut lines = output.lines();
		let mut shown = lines.next().unwrap().split(' ').collect::<Vec<_>>();
		shown.sort();
		assert_eq!(shown, vec!["AL", "FU", "ME", "TO"]);
		assert!(output.contains("METO isn't a word"));
		assert!(output.contains("aren't the fragments"));
		assert!(output.contains("Couldn't read that guess"));
		assert!(output.ends_with("Solution: Solved! Every word checks out.\n"));
	}

	/// Ensure that a guess that isn't valid UTF-8 is reported, and the player
	/// is prompted again.
	#[test]
	fn test_play_invalid_utf8()
	{
		let mut rng = StdRng::seed_from_u64(1);
		let session = Session::new(lexicon(), puzzle());
		let input = Cursor::new(&b"me \xff to\nme al to fu\n"[..]);
		let mut output = Vec::new();
		let attempts = session.play(&mut rng, input, &mut output).unwrap();
		assert_eq!(attempts, 2);
		let output = String::from_utf8(output).unwrap();
		assert!(output.contains("Couldn't read that guess"));
		assert!(output.ends_with("Solution: Solved! Every word checks out.\n"));
	}

	/// Ensure that running out of input is an error, not a hang.
	#[test]
	fn test_play_eof()
	{
		let mut rng = StdRng::seed_from_u64(1);
		let session = Session::new(lexicon(), puzzle());
		let input = Cursor::new("me to al fu\n");
		let result = session.play(&mut rng, input, Vec::<u8>::new());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::UnexpectedEof);
	}
}
