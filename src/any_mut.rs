use erasable::{erase, ErasablePtr, ErasedPtr};
use std::{any::TypeId, marker::PhantomData, ptr::NonNull};

/// A `&'a mut T` argument with its type erased
///
/// Writes made through [`downcast_mut`](Self::downcast_mut) land in the caller's storage.
///
/// ```
/// use erased_delegate::AnyMut;
///
/// let mut hits = 0_u32;
/// let mut any = AnyMut::erase(&mut hits);
///
/// if let Some(hits) = any.downcast_mut::<u32>() {
///     *hits += 1;
/// }
///
/// assert_eq!(hits, 1);
/// ```
#[derive(Debug)]
pub struct AnyMut<'a> {
    ptr: ErasedPtr,
    type_id: TypeId,
    borrow: PhantomData<&'a mut ()>,
}

impl<'a> AnyMut<'a> {
    /// Erase the type of a mutable reference
    pub fn erase<T: 'static>(reference: &'a mut T) -> Self {
        Self {
            ptr: erase(NonNull::from(reference)),
            type_id: TypeId::of::<T>(),
            borrow: PhantomData,
        }
    }

    /// Read-only view of the reference, if it was erased from a `&mut T`
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }

        // SAFETY: the type ids match, and `&self` keeps the unique borrow from being used mutably
        Some(unsafe { <NonNull<T>>::unerase(self.ptr).as_ref() })
    }

    /// Recover the mutable reference, if it was erased from a `&mut T`
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        if !self.is::<T>() {
            return None;
        }

        // SAFETY: the type ids match, and `&mut self` hands out one borrow at a time
        Some(unsafe { <NonNull<T>>::unerase(self.ptr).as_mut() })
    }

    /// Was the reference erased from a `&mut T`?
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The [`TypeId`] of the referenced type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl<'a, T: 'static> From<&'a mut T> for AnyMut<'a> {
    fn from(reference: &'a mut T) -> Self {
        Self::erase(reference)
    }
}
