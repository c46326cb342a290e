use erasable::{erase, ErasablePtr, ErasedPtr};
use std::{any::TypeId, marker::PhantomData, ptr::NonNull, slice, str};

/// A `&'a [U]` or `&'a str` argument with its type erased
///
/// The length travels next to the pointer to the first element, so the slice can be rebuilt
/// after the checked downcast. A string slice only downcasts back to `str`, never to `[u8]`.
///
/// ```
/// use erased_delegate::AnySliceRef;
///
/// let any = AnySliceRef::erase_str("ferris");
///
/// assert_eq!(any.downcast_str(), Some("ferris"));
/// assert_eq!(any.downcast::<u8>(), None);
/// assert_eq!(any.len(), 6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AnySliceRef<'a> {
    ptr: ErasedPtr,
    len: usize,

    // Of the unsized type, `[U]` or `str`
    type_id: TypeId,

    borrow: PhantomData<&'a ()>,
}

impl<'a> AnySliceRef<'a> {
    /// Erase the element type of a slice
    pub fn erase<U: 'static>(slice: &'a [U]) -> Self {
        Self {
            ptr: erase(NonNull::from(slice).cast::<U>()),
            len: slice.len(),
            type_id: TypeId::of::<[U]>(),
            borrow: PhantomData,
        }
    }

    /// Erase a string slice
    pub fn erase_str(text: &'a str) -> Self {
        Self {
            type_id: TypeId::of::<str>(),
            ..Self::erase(text.as_bytes())
        }
    }

    /// Recover the slice, if it was erased from a `&[U]`
    pub fn downcast<U: 'static>(self) -> Option<&'a [U]> {
        if self.type_id != TypeId::of::<[U]>() {
            return None;
        }

        // SAFETY: the type ids match, and pointer and length were taken from a `&'a [U]`
        Some(unsafe { slice::from_raw_parts(<NonNull<U>>::unerase(self.ptr).as_ptr(), self.len) })
    }

    /// Recover the string slice, if it was erased from a `&str`
    pub fn downcast_str(self) -> Option<&'a str> {
        if self.type_id != TypeId::of::<str>() {
            return None;
        }

        // SAFETY: pointer and length were taken from the bytes of a `&'a str`, so they are
        // valid UTF-8
        Some(unsafe {
            let bytes = slice::from_raw_parts(<NonNull<u8>>::unerase(self.ptr).as_ptr(), self.len);
            str::from_utf8_unchecked(bytes)
        })
    }

    /// The [`TypeId`] of the erased unsized type, `[U]` or `str`
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Number of elements, or bytes for a string slice
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a, U: 'static> From<&'a [U]> for AnySliceRef<'a> {
    fn from(slice: &'a [U]) -> Self {
        Self::erase(slice)
    }
}

impl<'a> From<&'a str> for AnySliceRef<'a> {
    fn from(text: &'a str) -> Self {
        Self::erase_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_keep_their_length() {
        let samples = [0.5_f32, 1.5, 2.5, 3.5];
        let any = AnySliceRef::from(&samples[1..3]);

        assert_eq!(any.downcast::<f32>(), Some(&[1.5_f32, 2.5][..]));
        assert_eq!(any.downcast::<f64>(), None);
        assert_eq!(any.downcast_str(), None);
        assert_eq!(any.len(), 2);
    }

    #[test]
    fn strings_and_bytes_stay_apart() {
        let bytes = b"bytes".to_vec();
        let any = AnySliceRef::erase(bytes.as_slice());

        assert_eq!(any.downcast_str(), None);
        assert_eq!(any.downcast::<u8>(), Some(&b"bytes"[..]));

        let any = AnySliceRef::from("text");
        assert_eq!(any.downcast::<u8>(), None);
        assert_eq!(any.type_id(), TypeId::of::<str>());
    }

    #[test]
    fn empty_slices() {
        let any = AnySliceRef::erase_str("");

        assert!(any.is_empty());
        assert_eq!(any.downcast_str(), Some(""));

        let nothing: &[String] = &[];
        let any = AnySliceRef::erase(nothing);
        assert_eq!(any.downcast::<String>().map(<[String]>::len), Some(0));
    }
}
