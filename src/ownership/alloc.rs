/*!
 * Fallible Boxing
 *
 * Heap placement that reports allocator refusal instead of aborting
 */

use crate::core::errors::{OwnershipError, OwnershipResult};
use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Move `value` onto the heap, returning the allocator failure as an error
///
/// On failure `value` is dropped before returning. Zero-sized types never
/// touch the allocator.
pub(crate) fn try_box<T>(value: T) -> OwnershipResult<Box<T>> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(Box::new(value));
    }

    // SAFETY: layout has non-zero size
    let raw = unsafe { alloc::alloc(layout) }.cast::<T>();
    let Some(ptr) = NonNull::new(raw) else {
        tracing::warn!(
            size = layout.size(),
            align = layout.align(),
            type_name = std::any::type_name::<T>(),
            "allocation refused"
        );
        return Err(OwnershipError::allocation_failed(layout));
    };

    // SAFETY: ptr is freshly allocated with T's layout, so writing a T and
    // handing it to Box (which frees with the same layout) is sound
    unsafe {
        ptr.as_ptr().write(value);
        Ok(Box::from_raw(ptr.as_ptr()))
    }
}

/// Infallible form used by `new` constructors
///
/// Allocation failure goes to `handle_alloc_error`, the same route `Box::new` takes.
pub(crate) fn boxed<T>(value: T) -> Box<T> {
    match try_box(value) {
        Ok(b) => b,
        Err(_) => alloc::handle_alloc_error(Layout::new::<T>()),
    }
}
