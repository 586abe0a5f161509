/*!
 * Shared test fixtures
 */

use std::cell::Cell;
use std::rc::Rc;

/// Counts its own destructions into a shared cell
pub struct Resource {
    pub id: u32,
    drops: Rc<Cell<usize>>,
}

impl Resource {
    pub fn new(id: u32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for Resource {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

pub fn drop_counter() -> Rc<Cell<usize>> {
    Rc::new(Cell::new(0))
}
