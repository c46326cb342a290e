use erasable::{erase, ErasablePtr, ErasedPtr};
use std::{any::TypeId, marker::PhantomData, ptr::NonNull};

/// A `&'a T` argument with its type erased
///
/// The pointer keeps referring to the caller's storage, so whoever downcasts it sees the
/// caller's value and not a copy.
///
/// ```
/// use erased_delegate::AnyRef;
///
/// let name = String::from("ferris");
/// let any = AnyRef::erase(&name);
///
/// assert_eq!(any.downcast::<String>(), Some(&name));
/// assert_eq!(any.downcast::<&str>(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AnyRef<'a> {
    ptr: ErasedPtr,

    // Checked before every downcast
    type_id: TypeId,

    borrow: PhantomData<&'a ()>,
}

impl<'a> AnyRef<'a> {
    /// Erase the type of a shared reference
    pub fn erase<T: 'static>(reference: &'a T) -> Self {
        Self {
            ptr: erase(NonNull::from(reference)),
            type_id: TypeId::of::<T>(),
            borrow: PhantomData,
        }
    }

    /// Recover the reference, if it was erased from a `&T`
    ///
    /// The result borrows from the caller for as long as the erased reference did.
    pub fn downcast<T: 'static>(self) -> Option<&'a T> {
        if !self.is::<T>() {
            return None;
        }

        // SAFETY: the type ids match, and the pointer was made from a `&'a T`
        Some(unsafe { <NonNull<T>>::unerase(self.ptr).as_ref() })
    }

    /// Was the reference erased from a `&T`?
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The [`TypeId`] of the referenced type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl<'a, T: 'static> From<&'a T> for AnyRef<'a> {
    fn from(reference: &'a T) -> Self {
        Self::erase(reference)
    }
}
