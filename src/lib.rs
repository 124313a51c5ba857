//! # N-graph puzzles
//!
//! An n-graph puzzle is a handful of letter fragments (_n-graphs_) that, read
//! in the right cyclic order, spell a closed chain of words: each window of
//! consecutive fragments is a word, and the last fragment wraps around to the
//! first. For example, the digraphs `AL ME TO FU` rearrange into
//! `ME AL TO FU`, which spells `MEAL`, `ALTO`, `TOFU`, and `FUME`.
//!
//! This crate generates such puzzles exhaustively, keeping only those with a
//! unique solution, scores their difficulty, stores them, and plays them.

pub mod combinatorics;
pub mod config;
pub mod fragment;
pub mod game;
pub mod generator;
pub mod lexicon;
pub mod solver;
pub mod store;
