use crate::scene::{Marker, NodeId, SceneGraph};

/// Ancestor name that anchors marker-less product hierarchies.
pub const REQUIRED_ROOT_NAME: &str = "Products";

/// Resolve the reporting key for a hit object from the current scene snapshot.
///
/// Precedence:
/// 1. The object itself is tagged `Category` -> its own name.
/// 2. Its parent is tagged `Product` -> the first `Category` child of that
///    parent names the key; no such sibling falls through.
/// 3. Walking ancestors upward, the first `Category` ancestor names the key;
///    meeting an ancestor named `"Products"` instead keys on the object itself.
/// 4. Marker-less fallback: grandparent named `"Products"` keys on the parent.
///
/// `None` means the hierarchy is invalid and the object's look time must be
/// discarded. Pure over the snapshot: no caching, safe to call every tick.
pub fn resolve_object_key<S: SceneGraph + ?Sized>(scene: &S, node: NodeId) -> Option<String> {
    // Rule 1: the object is itself a product category.
    if scene.has_marker(node, Marker::Category) {
        return scene.name(node).map(str::to_owned);
    }

    // Rule 2: parent is a tagged product, look for a category sibling.
    if let Some(parent) = scene.parent(node) {
        if scene.has_marker(parent, Marker::Product) {
            for sibling in scene.children(parent) {
                if scene.has_marker(sibling, Marker::Category) {
                    return scene.name(sibling).map(str::to_owned);
                }
            }
        }
    }

    // Rule 3: scan ancestors for a category marker or the products root.
    let mut current = scene.parent(node);
    while let Some(ancestor) = current {
        if scene.has_marker(ancestor, Marker::Category) {
            return scene.name(ancestor).map(str::to_owned);
        }
        if scene.name(ancestor) == Some(REQUIRED_ROOT_NAME) {
            return scene.name(node).map(str::to_owned);
        }
        current = scene.parent(ancestor);
    }

    // Rule 4: no markers anywhere, require the parent/grandparent shape.
    resolve_unmarked(scene, node)
}

fn resolve_unmarked<S: SceneGraph + ?Sized>(scene: &S, node: NodeId) -> Option<String> {
    let parent = scene.parent(node)?;
    let grandparent = scene.parent(parent)?;

    if scene.name(grandparent) == Some(REQUIRED_ROOT_NAME) {
        scene.name(parent).map(str::to_owned)
    } else {
        None
    }
}
