//! Load order over the node map.
//!
//! A depth-first walk that places every item after the items it requires.
//! Items start with fewer dependencies first, which keeps the output close to
//! the input order for flat inputs. Cycles do not loop: an item already
//! placed (or being placed) is not visited again, so for `a ⇄ b` the item
//! reached second ends up first. Items with no entry in the node map are
//! leaves.

use crate::core::{Item, NodeMap};

/// An item being placed and how far through its dependencies the walk is.
struct Frame<'a> {
    item: &'a Item,
    /// Slot reserved in the output when the walk entered this item.
    slot: usize,
    next: usize,
}

/// Orders `requires` so that dependencies come before their dependents.
///
/// Every input item appears in the output exactly once, together with any
/// item reachable from it through `nodes`.
///
/// # Examples
///
/// ```rust
/// use deparse_cli::core::{Item, NodeMap};
/// use deparse_cli::tracker::sort_requires;
///
/// let app = Item::new("js:module", "app");
/// let lodash = Item::new("js:module", "lodash");
/// let mut nodes = NodeMap::new();
/// nodes.merge(&app, &[lodash.clone()]);
///
/// assert_eq!(sort_requires(&nodes, &[app.clone()]), vec![lodash, app]);
/// ```
pub fn sort_requires(nodes: &NodeMap, requires: &[Item]) -> Vec<Item> {
    let dependency_count = |item: &Item| nodes.get(item).map_or(0, <[Item]>::len);
    let mut roots: Vec<&Item> = requires.iter().collect();
    roots.sort_by_key(|item| dependency_count(item));

    let mut loaded: Vec<Item> = Vec::with_capacity(requires.len());
    for root in roots {
        if loaded.contains(root) {
            continue;
        }
        let mut stack = vec![Frame {
            item: root,
            slot: loaded.len(),
            next: 0,
        }];
        loaded.push(root.clone());

        while let Some(frame) = stack.last_mut() {
            let dependencies = nodes.get(frame.item).unwrap_or_default();
            if let Some(dependency) = dependencies.get(frame.next) {
                frame.next += 1;
                if dependency == frame.item || loaded.contains(dependency) {
                    continue;
                }
                stack.push(Frame {
                    item: dependency,
                    slot: loaded.len(),
                    next: 0,
                });
                loaded.push(dependency.clone());
            } else if let Some(done) = stack.pop() {
                // Move the placeholder behind everything loaded meanwhile.
                let item = loaded.remove(done.slot);
                loaded.push(item);
            }
        }
    }
    loaded
}
