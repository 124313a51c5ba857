//! # Solver
//!
//! Herein is the solvability checker and difficulty scorer for n-graph
//! puzzles. A candidate set of fragments is a puzzle only if it can be
//! arranged in exactly one cycle such that every window of consecutive
//! fragments spells a word.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	rc::Rc
};

use log::trace;

use crate::{
	combinatorics::permutations,
	fragment::{concat, Fragment, Word},
	lexicon::Lexicon
};

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The solvability checker. It holds nothing but the lexicon, so a single
/// solver can check any number of candidates.
#[derive(Clone, Debug)]
#[must_use]
pub struct Solver
{
	/// The lexicon against which words are checked.
	lexicon: Rc<Lexicon>
}

impl Solver
{
	/// Construct a new solver for the given lexicon.
	///
	/// # Arguments
	///
	/// * `lexicon` - The lexicon to use for checking words.
	///
	/// # Returns
	///
	/// A new solver for the given lexicon.
	pub fn new(lexicon: Rc<Lexicon>) -> Self { Self { lexicon } }

	/// Get the lexicon.
	#[inline]
	#[must_use]
	pub fn lexicon(&self) -> &Lexicon { &self.lexicon }

	/// Check the given candidate. The cheap feasibility test runs first; only
	/// if every fragment passes it are the permutations of the candidate
	/// enumerated.
	///
	/// # Arguments
	///
	/// * `candidate` - The fragments of the prospective puzzle.
	///
	/// # Returns
	///
	/// The verdict on the candidate.
	///
	/// # Errors
	///
	/// * [`SolverError::EmptyCandidate`] if the candidate is empty.
	/// * [`SolverError::FragmentSize`] if any fragment has the wrong length
	///   for the lexicon.
	pub fn check(&self, candidate: &[Fragment]) -> Result<Verdict, SolverError>
	{
		if candidate.is_empty()
		{
			return Err(SolverError::EmptyCandidate)
		}
		if let Some(fragment) = candidate.iter()
			.find(|f| f.len() != self.lexicon.fragment_size())
		{
			return Err(SolverError::FragmentSize {
				fragment: *fragment,
				expected: self.lexicon.fragment_size()
			})
		}
		if !self.is_feasible(candidate)
		{
			trace!("infeasible: {:?}", candidate);
			return Ok(Verdict::Infeasible)
		}
		let (solutions, first) = self.count_solutions(candidate);
		trace!("{} valid arrangements: {:?}", solutions, candidate);
		Ok(match (solutions, first)
		{
			(0, _) => Verdict::NoSolution,
			(n, Some(arrangement)) if n == candidate.len() =>
				Verdict::Unique(arrangement),
			(n, _) => Verdict::Ambiguous { solutions: n }
		})
	}

	/// Check whether every fragment of the candidate begins some word whose
	/// remaining fragments all come from the candidate. A fragment that fails
	/// this test cannot take part in any cyclic solution, so the candidate can
	/// be rejected without enumerating its permutations. Passing the test does
	/// not imply that a solution exists.
	///
	/// # Arguments
	///
	/// * `candidate` - The fragments of the prospective puzzle.
	///
	/// # Returns
	///
	/// `false` if the candidate certainly has no solution, `true` otherwise.
	#[must_use]
	pub fn is_feasible(&self, candidate: &[Fragment]) -> bool
	{
		candidate.iter()
			.all(|fragment| self.lexicon.begins_chain(fragment, candidate))
	}

	/// Count the valid arrangements of the candidate. Every rotation of a
	/// cycle is a distinct arrangement, and so is every reflection.
	///
	/// # Arguments
	///
	/// * `candidate` - The fragments of the prospective puzzle.
	///
	/// # Returns
	///
	/// A 2-tuple comprising the number of valid arrangements and the first
	/// valid arrangement found, respectively.
	pub fn count_solutions(&self, candidate: &[Fragment])
		-> (usize, Option<Vec<Fragment>>)
	{
		let mut count = 0;
		let mut first = None;
		for arrangement in permutations(candidate, candidate.len())
		{
			if self.is_valid(&arrangement)
			{
				count += 1;
				if first.is_none()
				{
					first = Some(arrangement);
				}
			}
		}
		(count, first)
	}

	/// Check whether the candidate has exactly one cyclic solution. A single
	/// cycle of `n` fragments shows up as `n` valid arrangements, one per
	/// rotation, so exactly `n` valid arrangements means exactly one cycle.
	/// Reflections are not folded: a cycle that also reads correctly in
	/// reverse counts as two solutions.
	///
	/// # Arguments
	///
	/// * `candidate` - The fragments of the prospective puzzle.
	///
	/// # Returns
	///
	/// `true` if the solution is unique, `false` otherwise.
	#[must_use]
	pub fn unique_solution(&self, candidate: &[Fragment]) -> bool
	{
		!candidate.is_empty()
			&& self.count_solutions(candidate).0 == candidate.len()
	}

	/// Check whether the candidate is a puzzle, i.e., whether it passes the
	/// feasibility test and has a unique solution.
	///
	/// # Arguments
	///
	/// * `candidate` - The fragments of the prospective puzzle.
	///
	/// # Returns
	///
	/// `true` if the candidate is a puzzle, `false` otherwise.
	#[must_use]
	pub fn exists_solution(&self, candidate: &[Fragment]) -> bool
	{
		matches!(self.check(candidate), Ok(Verdict::Unique(_)))
	}

	/// Check whether every cyclic window of the arrangement spells a word.
	///
	/// # Arguments
	///
	/// * `arrangement` - The fragments, in cyclic order.
	///
	/// # Returns
	///
	/// `true` if the arrangement is a solution, `false` otherwise.
	#[must_use]
	pub fn is_valid(&self, arrangement: &[Fragment]) -> bool
	{
		let span = self.lexicon.span();
		let n = arrangement.len();
		(0..n).all(|start| {
			self.lexicon.contains_path(
				(0..span).map(|offset| &arrangement[(start + offset) % n])
			)
		})
	}

	/// Compute the difficulty of the candidate: the number of ordered
	/// selections of its fragments that spell a word, divided by the number of
	/// fragments. Every incidental word is a red herring, so higher is harder.
	///
	/// # Arguments
	///
	/// * `candidate` - The fragments of the puzzle.
	///
	/// # Returns
	///
	/// The difficulty. An empty candidate has difficulty zero.
	#[must_use]
	pub fn difficulty(&self, candidate: &[Fragment]) -> usize
	{
		if candidate.is_empty()
		{
			return 0
		}
		let words = permutations(candidate, self.lexicon.span())
			.iter()
			.filter(|selection| self.lexicon.contains_path(selection.iter()))
			.count();
		words / candidate.len()
	}
}

/// Derive the words spelled by an arrangement: for each starting position,
/// the concatenation of `span` consecutive fragments, wrapping around the end.
///
/// # Arguments
///
/// * `arrangement` - The fragments, in cyclic order.
/// * `span` - The number of fragments per word.
///
/// # Returns
///
/// One word per fragment, in order of starting position.
#[must_use]
pub fn derive_words(arrangement: &[Fragment], span: usize) -> Vec<Word>
{
	let n = arrangement.len();
	(0..n)
		.map(|start| {
			concat((0..span).map(|offset| &arrangement[(start + offset) % n]))
		})
		.collect()
}

/// The outcome of checking a candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Verdict
{
	/// Some fragment cannot begin any word, so there is no solution.
	Infeasible,

	/// The candidate passed the feasibility test but has no solution.
	NoSolution,

	/// The candidate has exactly one cyclic solution, given here as the first
	/// valid arrangement found.
	Unique(Vec<Fragment>),

	/// The candidate has several cyclic solutions.
	Ambiguous
	{
		/// The number of valid arrangements, counting rotations separately.
		solutions: usize
	}
}

/// The complete enumeration of [`Solver`] errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverError
{
	/// The candidate has no fragments.
	EmptyCandidate,

	/// A fragment does not have the lexicon's fragment size.
	FragmentSize
	{
		/// The offending fragment.
		fragment: Fragment,

		/// The lexicon's fragment size.
		expected: usize
	}
}

impl Display for SolverError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::EmptyCandidate => write!(f, "candidate has no fragments"),
			Self::FragmentSize { fragment, expected } => write!(
				f,
				"fragment {} does not have {} letters",
				fragment,
				expected
			)
		}
	}
}

impl Error for SolverError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::rc::Rc;

	use crate::{
		fragment::{Fragment, Word},
		lexicon::Lexicon,
		solver::{derive_words, Solver, SolverError, Verdict}
	};

	/// Make fragments from the given strings.
	fn fragments(texts: &[&str]) -> Vec<Fragment>
	{
		texts.iter().map(|t| Fragment::new(t).unwrap()).collect()
	}

	/// Make a solver over a lexicon of the given words.
	fn solver(fragment_size: usize, word_size: usize, words: &[&str]) -> Solver
	{
		let mut lexicon = Lexicon::new(fragment_size, word_size).unwrap();
		assert_eq!(lexicon.populate(words), 0);
		Solver::new(Rc::new(lexicon))
	}

	/// The canonical example: four digraphs that close a cycle of four
	/// words.
	fn meal_solver() -> Solver
	{
		solver(2, 4, &["MEAL", "ALTO", "TOFU", "FUME"])
	}

	/// Ensure that words are derived from cyclic windows.
	#[test]
	fn test_derive_words()
	{
		let words = derive_words(&fragments(&["ME", "AL", "TO", "FU"]), 2);
		assert_eq!(
			words,
			vec![
				Word::from("MEAL"),
				Word::from("ALTO"),
				Word::from("TOFU"),
				Word::from("FUME")
			]
		);
		let words = derive_words(&fragments(&["A", "B", "C"]), 3);
		assert_eq!(
			words,
			vec![Word::from("ABC"), Word::from("BCA"), Word::from("CAB")]
		);
	}

	/// Ensure that the canonical example is accepted as a unique puzzle, and
	/// that its solution survives every rotation.
	#[test]
	fn test_unique()
	{
		let solver = meal_solver();
		let candidate = fragments(&["AL", "FU", "ME", "TO"]);
		assert!(solver.is_feasible(&candidate));
		assert_eq!(solver.count_solutions(&candidate).0, 4);
		assert!(solver.unique_solution(&candidate));
		assert!(solver.exists_solution(&candidate));
		let arrangement = match solver.check(&candidate).unwrap()
		{
			Verdict::Unique(arrangement) => arrangement,
			other => panic!("unexpected verdict: {:?}", other)
		};
		// The first valid arrangement begins with the first fragment.
		assert_eq!(arrangement, fragments(&["AL", "TO", "FU", "ME"]));
		for shift in 0..arrangement.len()
		{
			let mut rotated = arrangement.clone();
			rotated.rotate_left(shift);
			assert!(solver.is_valid(&rotated), "shift {}", shift);
			assert!(
				derive_words(&rotated, 2)
					.iter()
					.all(|w| solver.lexicon().contains(w.as_str()))
			);
		}
		assert!(!solver.is_valid(&fragments(&["ME", "TO", "AL", "FU"])));
	}

	/// Ensure that two independent cycles over the same fragments are
	/// rejected.
	#[test]
	fn test_ambiguous()
	{
		let solver =
			solver(1, 2, &["AB", "BC", "CD", "DA", "AC", "CB", "BD"]);
		let candidate = fragments(&["A", "B", "C", "D"]);
		assert!(solver.is_feasible(&candidate));
		assert!(!solver.unique_solution(&candidate));
		assert!(!solver.exists_solution(&candidate));
		assert_eq!(
			solver.check(&candidate),
			Ok(Verdict::Ambiguous { solutions: 8 })
		);
	}

	/// Ensure that a cycle that also reads in reverse counts as two
	/// solutions.
	#[test]
	fn test_reflection()
	{
		let solver = solver(1, 2, &["AB", "BC", "CA", "BA", "CB", "AC"]);
		let candidate = fragments(&["A", "B", "C"]);
		assert_eq!(
			solver.check(&candidate),
			Ok(Verdict::Ambiguous { solutions: 6 })
		);
	}

	/// Ensure that feasible candidates without a solution, and infeasible
	/// candidates, are both rejected.
	#[test]
	fn test_rejected()
	{
		let solver = solver(1, 2, &["AB", "BA", "CA", "AC"]);
		let candidate = fragments(&["A", "B", "C"]);
		assert!(solver.is_feasible(&candidate));
		assert_eq!(solver.check(&candidate), Ok(Verdict::NoSolution));
		assert!(!solver.exists_solution(&candidate));

		let solver = meal_solver();
		let candidate = fragments(&["ME", "AL", "TO", "XX"]);
		assert!(!solver.is_feasible(&candidate));
		assert_eq!(solver.check(&candidate), Ok(Verdict::Infeasible));
	}

	/// Ensure that malformed candidates are rejected before any search.
	#[test]
	fn test_invalid_candidate()
	{
		let solver = meal_solver();
		assert_eq!(solver.check(&[]), Err(SolverError::EmptyCandidate));
		assert!(!solver.unique_solution(&[]));
		assert!(matches!(
			solver.check(&fragments(&["ME", "ALT"])),
			Err(SolverError::FragmentSize { expected: 2, .. })
		));
	}

	/// Ensure that deeper words, spanning three fragments, work end to end.
	#[test]
	fn test_three_fragment_words()
	{
		let solver = solver(1, 3, &["ABC", "BCD", "CDA", "DAB"]);
		let candidate = fragments(&["D", "C", "B", "A"]);
		assert_eq!(
			solver.check(&candidate),
			Ok(Verdict::Unique(fragments(&["D", "A", "B", "C"])))
		);
	}

	/// Ensure that red herrings raise the difficulty without spoiling the
	/// uniqueness of the solution.
	#[test]
	fn test_difficulty()
	{
		let candidate = fragments(&["ME", "AL", "TO", "FU"]);
		assert_eq!(meal_solver().difficulty(&candidate), 1);
		let solver = solver(
			2,
			4,
			&["MEAL", "ALTO", "TOFU", "FUME", "TOME", "METO", "ALME", "TOAL"]
		);
		assert!(solver.exists_solution(&candidate));
		assert_eq!(solver.difficulty(&candidate), 2);
		assert_eq!(solver.difficulty(&[]), 0);
	}
}
