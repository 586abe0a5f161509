/*!
 * Ownership Handles
 *
 * Pointer types that track who owns a heap payload.
 *
 * ## Handle Types
 *
 * - **ExclusiveOwner**: sole owner, move-only, no control block
 * - **SharedOwner**: reference-counted owner over a control block
 * - **WeakObserver**: non-owning observer that can be locked back into a SharedOwner
 *
 * ## Lifecycle
 *
 * A `SharedOwner` built from a payload allocates a control block with
 * strong=1, weak=0. The payload is destroyed when strong reaches 0; the block
 * itself is freed once both counts reach 0, in either order.
 *
 * ```text
 * Live (strong > 0) --last SharedOwner dropped--> PayloadDestroyed (weak > 0)
 *        |                                               |
 *        +--last SharedOwner dropped, weak == 0--> Freed <--last WeakObserver dropped
 * ```
 *
 * `SharedOwner` and `WeakObserver` are single-threaded: neither is `Send`
 * or `Sync`. `ExclusiveOwner` has no count to share and is `Send` when `T` is.
 */

mod alloc;
mod control;
mod exclusive;
mod shared;
mod traits;
mod weak;

pub use control::BlockState;
pub use exclusive::ExclusiveOwner;
pub use shared::SharedOwner;
pub use traits::{Handle, RefCounted};
pub use weak::WeakObserver;
