//! Randomized structural edits must keep parent and child links consistent.

use blendint::prelude::*;
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone, Copy)]
enum Edit {
    PushBack,
    InsertAt(usize),
    InsertBefore,
    Remove,
    MoveToFirst,
    Destroy,
    Create,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => Just(Edit::PushBack),
        1 => (0usize..4).prop_map(Edit::InsertAt),
        1 => Just(Edit::InsertBefore),
        1 => Just(Edit::Remove),
        1 => Just(Edit::MoveToFirst),
        1 => Just(Edit::Destroy),
        2 => Just(Edit::Create),
    ]
}

fn check_links(tree: &ViewTree, ids: &[ViewId]) -> Result<(), TestCaseError> {
    for &id in ids.iter().filter(|&&id| tree.contains(id)) {
        let children: Vec<ViewId> = tree.children(id).collect();
        prop_assert_eq!(children.len(), tree.child_count(id));
        for (index, &child) in children.iter().enumerate() {
            prop_assert_eq!(
                tree.parent(child),
                Some(id),
                "child {:?} of {:?} points elsewhere",
                child,
                id
            );
            prop_assert_eq!(tree.index_of(child), Some(index));
        }
        let reversed: Vec<ViewId> = tree.children(id).rev().collect();
        prop_assert!(reversed.iter().eq(children.iter().rev()));

        if let Some(parent) = tree.parent(id) {
            prop_assert!(tree.contains(parent));
            prop_assert!(tree.children(parent).any(|c| c == id));
            prop_assert!(!tree.is_ancestor_of(id, parent), "cycle through {:?}", id);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_random_edits_keep_links_consistent(
        edits in prop::collection::vec((edit_strategy(), any::<Index>(), any::<Index>()), 1..300),
    ) {
        let mut tree = ViewTree::new();
        let mut ids: Vec<ViewId> = (0..8)
            .map(|_| tree.create(Spacer::fixed(Size::new(10, 10))))
            .collect();

        for (edit, a, b) in edits {
            let live: Vec<ViewId> = ids.iter().copied().filter(|&id| tree.contains(id)).collect();
            if live.len() < 2 {
                ids.push(tree.create(Spacer::expanding()));
                continue;
            }
            let a = *a.get(&live);
            let b = *b.get(&live);

            match edit {
                Edit::PushBack => {
                    let rejected = a == b || tree.is_ancestor_of(b, a);
                    let result = tree.push_back(a, b);
                    if rejected {
                        prop_assert!(result.is_err());
                    }
                }
                Edit::InsertAt(index) => {
                    let _ = tree.insert_at(a, index, b);
                }
                Edit::InsertBefore => {
                    let _ = tree.insert_before(a, b);
                }
                Edit::Remove => {
                    let had_parent = tree.parent(a).is_some();
                    let _ = tree.remove(a);
                    // Unreferenced managed views do not outlive removal.
                    prop_assert_eq!(tree.contains(a), !had_parent);
                    prop_assert_eq!(tree.parent(a), None);
                }
                Edit::MoveToFirst => {
                    let _ = tree.move_to_first(a);
                }
                Edit::Destroy => {
                    prop_assert!(tree.destroy(a).is_ok());
                    prop_assert!(!tree.contains(a));
                }
                Edit::Create => {
                    ids.push(tree.create(Spacer::fixed(Size::new(5, 5))));
                }
            }
            check_links(&tree, &ids)?;
        }
    }
}

#[test]
fn test_destroyed_subtree_is_fully_gone() {
    let mut tree = ViewTree::new();
    let root = tree.create(Spacer::expanding());
    let mut chain = vec![root];
    for _ in 0..5 {
        let child = tree.create(Spacer::expanding());
        tree.push_back(*chain.last().unwrap(), child).unwrap();
        chain.push(child);
    }

    tree.destroy(chain[2]).unwrap();

    assert!(tree.contains(chain[1]));
    assert_eq!(tree.child_count(chain[1]), 0);
    assert!(chain[2..].iter().all(|&id| !tree.contains(id)));
    assert_eq!(tree.len(), 2);
}
