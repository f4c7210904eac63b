//! Per-tick collision pass
//!
//! A tick runs in three phases so no update can disturb another object's
//! collision test within the same tick:
//! 1. test every unordered pair against start-of-tick bounds and record
//!    contacts on both sides
//! 2. update every object once, in list order
//! 3. clear every contact list

use super::geometry::collision;
use super::objects::GameObject;
use crate::input::Controllers;

/// Record contacts for every colliding pair. Returns the colliding pairs.
pub fn collect_collisions(objects: &mut [GameObject]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..objects.len() {
        for j in (i + 1)..objects.len() {
            if collision(&objects[i].bounds, &objects[j].bounds) {
                pairs.push((i, j));
            }
        }
    }

    // Snapshot contacts only after every pair is known
    for &(i, j) in &pairs {
        let a = objects[i].contact();
        let b = objects[j].contact();
        objects[i].collisions.push(b);
        objects[j].collisions.push(a);
    }

    pairs
}

pub fn clear_collisions(objects: &mut [GameObject]) {
    for obj in objects.iter_mut() {
        obj.collisions.clear();
    }
}

/// Run a full tick over `objects`
pub fn step(objects: &mut [GameObject], controllers: &Controllers) -> Vec<(usize, usize)> {
    step_with(objects, controllers, |_, _| {})
}

/// Run a full tick, calling `after_update(objects, index)` right after each
/// object has updated
///
/// The hook may mutate any object (the game screen uses it to reset the scene
/// when the ball leaves play). Contact lists are cleared once every object has
/// updated, regardless of what the hook did.
pub fn step_with<F>(
    objects: &mut [GameObject],
    controllers: &Controllers,
    mut after_update: F,
) -> Vec<(usize, usize)>
where
    F: FnMut(&mut [GameObject], usize),
{
    let pairs = collect_collisions(objects);

    for index in 0..objects.len() {
        objects[index].update(controllers);
        after_update(objects, index);
    }

    clear_collisions(objects);
    pairs
}
