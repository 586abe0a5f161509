/*!
 * Ownership Core - Demo Entry Point
 *
 * Walks through the lifecycle of each handle type:
 * - Shared counting across clones
 * - Weak observers outliving the payload
 * - Locking a weak observer back into a strong handle
 * - Parent/child tree whose back-references are weak
 */

use miette::IntoDiagnostic;
use ownership_core::monitoring::stats;
use ownership_core::{init_tracing, ExclusiveOwner, RefCounted, SharedOwner, WeakObserver};
use std::cell::RefCell;
use tracing::info;

struct Resource {
    name: &'static str,
}

impl Resource {
    fn new(name: &'static str) -> Self {
        info!(resource = name, "resource acquired");
        Self { name }
    }
}

impl Drop for Resource {
    fn drop(&mut self) {
        info!(resource = self.name, "resource destroyed");
    }
}

struct Node {
    name: &'static str,
    parent: RefCell<WeakObserver<Node>>,
    children: RefCell<Vec<SharedOwner<Node>>>,
}

impl Node {
    fn new(name: &'static str) -> SharedOwner<Node> {
        SharedOwner::new(Node {
            name,
            parent: RefCell::new(WeakObserver::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    fn adopt(parent: &SharedOwner<Node>, child: SharedOwner<Node>) {
        *child.parent.borrow_mut() = parent.get_weak();
        parent.children.borrow_mut().push(child);
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        info!(node = self.name, "node destroyed");
    }
}

fn shared_counting() {
    info!("--- shared counting ---");
    let a = SharedOwner::new(Resource::new("shared"));
    info!(use_count = a.use_count(), "after construction");
    {
        let b = a.clone();
        info!(use_count = b.use_count(), "after clone");
    }
    info!(use_count = a.use_count(), "after clone dropped");
}

fn weak_expiry() {
    info!("--- weak expiry ---");
    let a = SharedOwner::new(Resource::new("observed"));
    let w = WeakObserver::from(&a);
    info!(expired = w.expired(), "observer created");
    drop(a);
    info!(
        expired = w.expired(),
        lock_empty = w.lock().is_empty(),
        "owner dropped"
    );
}

fn weak_lock() {
    info!("--- weak lock ---");
    let a = SharedOwner::new(Resource::new("locked"));
    let w = a.get_weak();
    let locked = w.lock();
    info!(
        resource = locked.name,
        use_count = locked.use_count(),
        "lock succeeded"
    );
    drop(a);
    drop(locked);
    info!(state = ?w.block_state(), "strong handles dropped");
}

fn exclusive_transfer() -> miette::Result<()> {
    info!("--- exclusive transfer ---");
    let mut first = ExclusiveOwner::new(Resource::new("exclusive"));
    let second = first.take();
    info!(
        first_empty = first.is_empty(),
        second_empty = second.is_empty(),
        "ownership moved"
    );
    let shared = second.into_shared()?;
    info!(use_count = shared.use_count(), "converted to shared");
    Ok(())
}

fn tree_without_cycle() {
    info!("--- parent/child tree ---");
    let root = Node::new("root");
    let leaf = Node::new("leaf");
    Node::adopt(&root, leaf.clone());

    let parent = leaf.parent.borrow().lock();
    info!(
        leaf = leaf.name,
        parent = parent.get().map(|p| p.name),
        root_strong = root.use_count(),
        root_weak = root.weak_count(),
        "tree linked"
    );
    drop(parent);
    drop(root);
    info!(
        parent_expired = leaf.parent.borrow().expired(),
        "root dropped while leaf still alive"
    );
}

fn main() -> miette::Result<()> {
    init_tracing();

    info!("Ownership core demo starting...");

    shared_counting();
    weak_expiry();
    weak_lock();
    exclusive_transfer()?;
    tree_without_cycle();

    let snapshot = stats::snapshot();
    info!(
        live_blocks = snapshot.live_control_blocks(),
        "all handles released"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot).into_diagnostic()?);

    Ok(())
}
