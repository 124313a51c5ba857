//! # Combinatorics
//!
//! Pure generators for the search: every fragment of a given size, every
//! subset of a given size, and every permutation of a given length. None of
//! these know anything about words. All of them produce their output in a
//! deterministic order, so that generated puzzle collections are reproducible.

use crate::fragment::{Fragment, FragmentError, MAX_FRAGMENT_SIZE};

////////////////////////////////////////////////////////////////////////////////
//                                 Fragments.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Generate every fragment of the given size over the letters `A` through `Z`,
/// in lexicographic order. There are `26^size` such fragments; for size zero,
/// the result is the single empty fragment.
///
/// # Arguments
///
/// * `size` - The length of every fragment, in letters.
///
/// # Returns
///
/// The fragments.
///
/// # Errors
///
/// [`FragmentError::TooLong`] if `size` exceeds
/// [`MAX_FRAGMENT_SIZE`].
pub fn generate_fragments(size: usize) -> Result<Vec<Fragment>, FragmentError>
{
	if size > MAX_FRAGMENT_SIZE
	{
		return Err(FragmentError::TooLong(size))
	}
	let mut texts = vec![String::new()];
	for _ in 0..size
	{
		// Prepend each letter to every fragment of the previous size.
		texts = ('A'..='Z')
			.flat_map(|letter| {
				texts.iter().map(move |suffix| format!("{}{}", letter, suffix))
			})
			.collect();
	}
	texts.iter().map(|text| Fragment::new(text)).collect()
}

////////////////////////////////////////////////////////////////////////////////
//                                  Subsets.                                  //
////////////////////////////////////////////////////////////////////////////////

/// Iterate over every subset of the given size of `universe`. Each subset is
/// yielded once, as a sequence in universe order, and subsets are yielded in
/// lexicographic order of their indices. The iteration is lazy, since the
/// number of subsets is routinely far too large to hold in memory.
///
/// # Arguments
///
/// * `universe` - The elements to choose from.
/// * `size` - The size of every subset.
///
/// # Returns
///
/// An iterator over the subsets.
pub fn subsets<T: Clone>(universe: &[T], size: usize) -> Subsets<'_, T>
{
	let indices = if size <= universe.len()
	{
		Some((0..size).collect())
	}
	else
	{
		None
	};
	Subsets { universe, indices }
}

/// The iterator answered by [`subsets`].
#[derive(Clone, Debug)]
#[must_use]
pub struct Subsets<'a, T>
{
	/// The elements to choose from.
	universe: &'a [T],

	/// The indices of the next subset, or `None` once the subsets are
	/// exhausted.
	indices: Option<Vec<usize>>
}

impl<'a, T: Clone> Iterator for Subsets<'a, T>
{
	type Item = Vec<T>;

	fn next(&mut self) -> Option<Self::Item>
	{
		let indices = self.indices.as_mut()?;
		let subset = indices.iter()
			.map(|&i| self.universe[i].clone())
			.collect();
		// Advance to the next combination: find the rightmost index that can
		// still move right, bump it, and reset everything after it.
		let n = self.universe.len();
		let k = indices.len();
		match (0..k).rev().find(|&i| indices[i] < n - k + i)
		{
			Some(i) =>
			{
				indices[i] += 1;
				for j in i + 1..k
				{
					indices[j] = indices[j - 1] + 1;
				}
			},
			None => self.indices = None
		}
		Some(subset)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Permutations.                                //
////////////////////////////////////////////////////////////////////////////////

/// Generate every injective ordering of `choose` elements drawn from `items`.
/// When `choose` equals the number of items, this is every full permutation.
/// For each item in turn, that item is followed by every ordering of the
/// remaining items, so the output order is fully determined by the input
/// order.
///
/// # Arguments
///
/// * `items` - The elements to arrange.
/// * `choose` - The length of every ordering.
///
/// # Returns
///
/// The orderings. If `choose` is zero, this is a single empty ordering; if
/// `choose` exceeds the number of items, there are none.
#[must_use]
pub fn permutations<T: Clone>(items: &[T], choose: usize) -> Vec<Vec<T>>
{
	if choose == 0
	{
		return vec![Vec::new()]
	}
	let mut result = Vec::new();
	for (index, item) in items.iter().enumerate()
	{
		let mut rest = items.to_vec();
		rest.remove(index);
		for tail in permutations(&rest, choose - 1)
		{
			let mut ordering = Vec::with_capacity(choose);
			ordering.push(item.clone());
			ordering.extend(tail);
			result.push(ordering);
		}
	}
	result
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::collections::HashSet;

	use crate::{
		combinatorics::{generate_fragments, permutations, subsets},
		fragment::{FragmentError, MAX_FRAGMENT_SIZE}
	};

	/// Compute `n` choose `k`.
	fn binomial(n: usize, k: usize) -> usize
	{
		(0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
	}

	/// Ensure that the fragment universe has the right size and shape for
	/// small sizes.
	#[test]
	fn test_generate_fragments()
	{
		let empty = generate_fragments(0).unwrap();
		assert_eq!(empty.len(), 1);
		assert!(empty[0].is_empty());
		for size in 1..=2
		{
			let fragments = generate_fragments(size).unwrap();
			assert_eq!(fragments.len(), 26usize.pow(size as u32));
			assert!(fragments.iter().all(|f| f.len() == size));
			let unique = fragments.iter().collect::<HashSet<_>>();
			assert_eq!(unique.len(), fragments.len());
		}
		let pairs = generate_fragments(2).unwrap();
		assert_eq!(pairs[0].as_str(), "AA");
		assert_eq!(pairs[1].as_str(), "AB");
		assert_eq!(pairs[26].as_str(), "BA");
		assert_eq!(pairs[675].as_str(), "ZZ");
		assert_eq!(
			generate_fragments(MAX_FRAGMENT_SIZE + 1),
			Err(FragmentError::TooLong(MAX_FRAGMENT_SIZE + 1))
		);
	}

	/// Ensure that subsets are counted, sized, and ordered correctly.
	#[test]
	fn test_subsets()
	{
		let universe = (0..7).collect::<Vec<u32>>();
		for k in 0..=7
		{
			let all = subsets(&universe, k).collect::<Vec<_>>();
			assert_eq!(all.len(), binomial(7, k), "k = {}", k);
			assert!(all.iter().all(|s| s.len() == k));
			let unique = all.iter()
				.map(|s| s.iter().copied().collect::<Vec<_>>())
				.collect::<HashSet<_>>();
			assert_eq!(unique.len(), all.len());
			assert!(all.iter().all(|s| s.windows(2).all(|w| w[0] < w[1])));
		}
		assert_eq!(subsets(&universe, 8).count(), 0);
		let abc = ['A', 'B', 'C', 'D'];
		assert_eq!(
			subsets(&abc, 2).collect::<Vec<_>>(),
			vec![
				vec!['A', 'B'], vec!['A', 'C'], vec!['A', 'D'],
				vec!['B', 'C'], vec!['B', 'D'], vec!['C', 'D']
			]
		);
	}

	/// Ensure that permutations are counted, sized, and ordered correctly.
	#[test]
	fn test_permutations()
	{
		let items = ['A', 'B', 'C', 'D'];
		let expected = [1, 4, 12, 24, 24];
		for (k, &count) in expected.iter().enumerate()
		{
			let all = permutations(&items, k);
			assert_eq!(all.len(), count, "k = {}", k);
			assert!(all.iter().all(|p| p.len() == k));
			let unique = all.iter().collect::<HashSet<_>>();
			assert_eq!(unique.len(), all.len());
		}
		assert!(permutations(&items, 5).is_empty());
		// Full permutations are bijections onto the items.
		for p in permutations(&items, 4)
		{
			let mut sorted = p.clone();
			sorted.sort();
			assert_eq!(sorted, items);
		}
		assert_eq!(
			permutations(&['A', 'B', 'C'], 3),
			vec![
				vec!['A', 'B', 'C'], vec!['A', 'C', 'B'],
				vec!['B', 'A', 'C'], vec!['B', 'C', 'A'],
				vec!['C', 'A', 'B'], vec!['C', 'B', 'A']
			]
		);
	}
}
