use forensic::{Profile, ProfileTree, StrRecord};

use quickcheck::{Arbitrary, Gen};

mod profile_tree;

/// An enum for the various kinds of "things" to do to
/// a profile tree in a quicktest.
#[derive(Clone, Debug)]
pub enum Op {
    /// Insert a profile with the given STRs under the name
    Insert(String, Vec<(String, i64)>),
    /// Remove the name from the tree
    Remove(String),
    /// Flag profiles of interest
    Flag,
}

impl Op {
    pub fn apply(&self, tree: &mut ProfileTree) {
        match self {
            Op::Insert(name, strs) => {
                let strs = strs
                    .iter()
                    .map(|(unit, count)| StrRecord::new(unit.as_str(), *count))
                    .collect();
                tree.insert(name.as_str(), Profile::new(strs));
            }
            Op::Remove(name) => tree.remove(name),
            Op::Flag => tree.flag_profiles_of_interest(),
        }
    }
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 2]).unwrap() {
            0 => {
                let len = usize::arbitrary(g) % 3;
                let strs = (0..len)
                    .map(|_| (unit(g), i64::from(u8::arbitrary(g) % 3)))
                    .collect();
                Op::Insert(name(g), strs)
            }
            1 => Op::Remove(name(g)),
            2 => Op::Flag,
            _ => unreachable!(),
        }
    }
}

/// A name that is likely to already be in a tree built from random [`Op`]s.
#[derive(Clone, Debug)]
pub struct Name(pub String);

impl Arbitrary for Name {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(name(g))
    }
}

/// Single letter names so lots of operations hit the same node.
fn name(g: &mut Gen) -> String {
    let letter = *g.choose(&['A', 'b', 'C', 'd', 'E', 'f', 'G', 'h', 'I', 'j']).unwrap();
    letter.to_string()
}

fn unit(g: &mut Gen) -> String {
    g.choose(&["AG", "GA", "T", "CC"]).unwrap().to_string()
}

/// Builds a tree with a fixed pair of sequences by applying `ops`.
pub fn build(ops: &[Op]) -> ProfileTree {
    let mut tree = ProfileTree::with_sequences("AGAGTT", "CCGA");
    for op in ops {
        op.apply(&mut tree);
    }

    tree
}
