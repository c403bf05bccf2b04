use forensic::{Node, Profile};

use std::collections::BTreeSet;

use crate::{build, Name, Op};

/// Every node's children, by name, in level order.
fn shape(tree: &forensic::ProfileTree) -> Vec<(String, Option<String>, Option<String>)> {
    tree.level_order()
        .map(|node| {
            (
                node.name().to_string(),
                node.left().map(|n| n.name().to_string()),
                node.right().map(|n| n.name().to_string()),
            )
        })
        .collect()
}

quickcheck::quickcheck! {
    fn in_order_is_strictly_ascending(ops: Vec<Op>) -> bool {
        let tree = build(&ops);
        let names: Vec<&str> = tree.in_order().map(Node::name).collect();

        names.windows(2).all(|pair| pair[0] < pair[1])
    }
}

quickcheck::quickcheck! {
    fn holds_exactly_the_surviving_names(ops: Vec<Op>) -> bool {
        let tree = build(&ops);
        let mut expected = BTreeSet::new();
        for op in &ops {
            match op {
                Op::Insert(name, _) => {
                    expected.insert(name.as_str());
                }
                Op::Remove(name) => {
                    expected.remove(name.as_str());
                }
                Op::Flag => {}
            }
        }

        tree.in_order().map(Node::name).eq(expected.into_iter())
            && tree.len() == tree.in_order().count()
    }
}

quickcheck::quickcheck! {
    fn counts_partition_the_tree(ops: Vec<Op>) -> bool {
        let tree = build(&ops);

        tree.count_matching(true) + tree.count_matching(false) == tree.len()
    }
}

quickcheck::quickcheck! {
    fn reinsert_keeps_shape(ops: Vec<Op>) -> bool {
        let mut tree = build(&ops);
        let before = shape(&tree);
        let names: Vec<String> = tree.in_order().map(|n| n.name().to_string()).collect();
        for name in &names {
            tree.insert(name.as_str(), Profile::default());
        }

        shape(&tree) == before
    }
}

quickcheck::quickcheck! {
    fn remove_is_idempotent(ops: Vec<Op>, name: Name) -> bool {
        let name = name.0;
        let mut tree = build(&ops);
        tree.remove(&name);
        let once = shape(&tree);
        tree.remove(&name);

        tree.find(&name).is_none() && shape(&tree) == once
    }
}

quickcheck::quickcheck! {
    fn cleanup_keeps_only_flagged(ops: Vec<Op>) -> bool {
        let mut tree = build(&ops);
        tree.flag_profiles_of_interest();
        let flagged: Vec<String> = tree
            .in_order()
            .filter(|n| n.profile().is_of_interest())
            .map(|n| n.name().to_string())
            .collect();
        tree.cleanup();

        tree.count_matching(false) == 0
            && tree.in_order().map(|n| n.name().to_string()).eq(flagged.into_iter())
    }
}
