//! The symbol bound shared by every automaton type in this crate.
//!
//! Spec'd as "an opaque parameter type with equality and a total order and
//! hashability" (see the data model section of the design notes this crate
//! is built from). Every container in `skein` is keyed by `Ord` (so that
//! iteration order is deterministic and canonical, which the enumeration
//! and minimization algorithms rely on); the `Hash` bound is kept too so
//! call sites that prefer a `HashMap` (e.g. the catalog importer's reverse
//! map) aren't forced into `BTreeMap`.
use std::fmt::Debug;
use std::hash::Hash;

pub trait Symbol: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Symbol for T {}
