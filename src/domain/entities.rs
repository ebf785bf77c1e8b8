//! Domain entities: species catalog, trees, and forests

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::domain::DomainError;

/// Closed catalog of recognized tree species.
///
/// Source files identify species by the uppercase name (`OAK`, `MAPLE`, ...),
/// matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeSpecies {
    Birch,
    Maple,
    Fir,
    Oak,
    Pine,
    Willow,
}

impl TreeSpecies {
    /// Every species, in catalog order. The order is part of the snapshot
    /// wire format (species are encoded as their position here).
    pub const ALL: [TreeSpecies; 6] = [
        TreeSpecies::Birch,
        TreeSpecies::Maple,
        TreeSpecies::Fir,
        TreeSpecies::Oak,
        TreeSpecies::Pine,
        TreeSpecies::Willow,
    ];

    /// The identifier used in source files and display output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeSpecies::Birch => "BIRCH",
            TreeSpecies::Maple => "MAPLE",
            TreeSpecies::Fir => "FIR",
            TreeSpecies::Oak => "OAK",
            TreeSpecies::Pine => "PINE",
            TreeSpecies::Willow => "WILLOW",
        }
    }
}

impl fmt::Display for TreeSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width specifiers in summary lines apply
        f.pad(self.as_str())
    }
}

impl FromStr for TreeSpecies {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeSpecies::ALL
            .iter()
            .find(|species| species.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::UnknownSpecies(s.to_string()))
    }
}

/// One simulated tree.
///
/// Height changes only through [`Tree::grow`]; every other field is fixed at
/// construction. Construction performs no validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    species: TreeSpecies,
    planting_year: i32,
    height: f64,
    growth_rate: f64,
}

impl Tree {
    pub fn new(species: TreeSpecies, planting_year: i32, height: f64, growth_rate: f64) -> Self {
        Self {
            species,
            planting_year,
            height,
            growth_rate,
        }
    }

    pub fn species(&self) -> TreeSpecies {
        self.species
    }

    pub fn planting_year(&self) -> i32 {
        self.planting_year
    }

    /// Current height in feet.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Growth rate in percent per year.
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// Advance one simulated year: height compounds by the growth rate.
    pub fn grow(&mut self) {
        self.height *= 1.0 + self.growth_rate / 100.0;
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}   {:.1}'  {:.1}%",
            self.planting_year, self.species, self.height, self.growth_rate
        )
    }
}

/// A named, ordered collection of trees.
///
/// Insertion order is display order; indices shown by the summary are live
/// 0-based positions and shift when earlier trees are removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    name: String,
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trees: Vec::new(),
        }
    }

    /// Name of the forest, also used as the snapshot filename stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Append a tree at the end of the sequence.
    pub fn add_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Remove the tree at `index`, shifting later trees down.
    ///
    /// The aggregate validates the index itself: negative or out-of-range
    /// input yields [`DomainError::TreeNotFound`], callers need not pre-check.
    pub fn remove_tree(&mut self, index: i64) -> Result<Tree, DomainError> {
        let idx = usize::try_from(index)
            .ok()
            .filter(|&i| i < self.trees.len())
            .ok_or(DomainError::TreeNotFound(index))?;
        Ok(self.trees.remove(idx))
    }

    /// Advance every tree by one simulated year, in sequence order.
    pub fn grow_all(&mut self) {
        for tree in &mut self.trees {
            tree.grow();
        }
    }

    /// Remove every tree strictly taller than `threshold` feet in a single
    /// in-place filter pass, preserving survivor order.
    ///
    /// Returns the number of trees removed. The predicate is "strictly
    /// greater", so a NaN threshold (or a NaN height) removes nothing.
    pub fn reap_above(&mut self, threshold: f64) -> usize {
        let before = self.trees.len();
        self.trees.retain(|tree| !(tree.height() > threshold));
        before - self.trees.len()
    }

    /// Arithmetic mean of tree heights; `0.0` for an empty forest.
    pub fn average_height(&self) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(Tree::height).sum();
        total / self.trees.len() as f64
    }

    /// Write the human-readable forest summary: name, one line per tree
    /// (or an empty notice), and a count/average footer.
    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Forest name: {}", self.name)?;
        if self.trees.is_empty() {
            writeln!(out, "The forest is empty.")?;
            return Ok(());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            writeln!(
                out,
                "     {} {:<7} {} {:>7.2}' {:>5.1}%",
                i,
                tree.species(),
                tree.planting_year(),
                tree.height(),
                tree.growth_rate()
            )?;
        }
        writeln!(
            out,
            "There are {} trees, with an average height of {:.2}",
            self.trees.len(),
            self.average_height()
        )
    }
}
