use erasable::{erase, ErasablePtr, ErasedPtr};
use std::{any::TypeId, marker::PhantomData, ptr::NonNull, slice};

/// A `&'a mut [U]` argument with its element type erased
///
/// ```
/// use erased_delegate::AnySliceMut;
///
/// let mut levels = [1_u8, 2, 3];
/// let mut any = AnySliceMut::erase(&mut levels[..]);
///
/// if let Some(levels) = any.downcast_mut::<u8>() {
///     levels.fill(0);
/// }
///
/// assert_eq!(levels, [0, 0, 0]);
/// ```
#[derive(Debug)]
pub struct AnySliceMut<'a> {
    ptr: ErasedPtr,
    len: usize,
    type_id: TypeId,
    borrow: PhantomData<&'a mut ()>,
}

impl<'a> AnySliceMut<'a> {
    /// Erase the element type of a mutable slice
    pub fn erase<U: 'static>(slice: &'a mut [U]) -> Self {
        let len = slice.len();

        Self {
            ptr: erase(NonNull::from(slice).cast::<U>()),
            len,
            type_id: TypeId::of::<[U]>(),
            borrow: PhantomData,
        }
    }

    /// Read-only view of the slice, if it was erased from a `&mut [U]`
    pub fn downcast_ref<U: 'static>(&self) -> Option<&[U]> {
        if self.type_id != TypeId::of::<[U]>() {
            return None;
        }

        // SAFETY: the type ids match, and pointer and length were taken from a `&'a mut [U]`
        Some(unsafe { slice::from_raw_parts(<NonNull<U>>::unerase(self.ptr).as_ptr(), self.len) })
    }

    /// Recover the mutable slice, if it was erased from a `&mut [U]`
    pub fn downcast_mut<U: 'static>(&mut self) -> Option<&mut [U]> {
        if self.type_id != TypeId::of::<[U]>() {
            return None;
        }

        // SAFETY: as in `downcast_ref`, and `&mut self` hands out one borrow at a time
        Some(unsafe {
            slice::from_raw_parts_mut(<NonNull<U>>::unerase(self.ptr).as_ptr(), self.len)
        })
    }

    /// The [`TypeId`] of the erased slice type `[U]`
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a, U: 'static> From<&'a mut [U]> for AnySliceMut<'a> {
    fn from(slice: &'a mut [U]) -> Self {
        Self::erase(slice)
    }
}
