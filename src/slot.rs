use crate::{AnyMut, AnyRef, AnySliceMut, AnySliceRef};
use std::{
    any::{type_name, Any, TypeId},
    fmt,
};

/// How an argument was handed over to the delegate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Moved into the bundle
    Owned,

    /// Borrowed from the caller, read-only
    Ref,

    /// Borrowed from the caller, mutably
    Mut,
}

impl Category {
    /// Can an argument of this category fill a parameter of category `param`?
    ///
    /// Anything can be read through a shared reference, owned values and mutable borrows can be
    /// written through a mutable one, and only owned values can be moved out.
    pub fn can_fill(self, param: Category) -> bool {
        match param {
            Category::Owned => self == Category::Owned,
            Category::Ref => true,
            Category::Mut => self != Category::Ref,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Category::Owned => "",
            Category::Ref => "&",
            Category::Mut => "&mut ",
        }
    }
}

/// The type key of a single argument slot
///
/// Two slot types are the same when they share the category and the decayed (`'static`,
/// reference-stripped) type. The type name only serves diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotType {
    category: Category,
    type_id: TypeId,
    type_name: &'static str,
}

impl SlotType {
    /// The slot type for a decayed type `T` passed with `category`
    pub fn of<T: ?Sized + 'static>(category: Category) -> Self {
        Self {
            category,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Can an argument of this slot type fill a parameter of slot type `param`?
    pub fn can_fill(&self, param: &SlotType) -> bool {
        self.type_id == param.type_id && self.category.can_fill(param.category)
    }

    /// How the argument is handed over
    pub fn category(&self) -> Category {
        self.category
    }

    /// The [`TypeId`] of the decayed type
    pub fn type_id(&self) -> &TypeId {
        &self.type_id
    }

    /// Name of the decayed type, for diagnostics only
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.prefix(), self.type_name)
    }
}

/// A single argument of one invocation
///
/// Owned values live in the slot itself, borrowed ones point back into the caller's storage.
#[derive(Debug)]
pub struct Slot<'a> {
    ty: SlotType,
    value: SlotValue<'a>,
}

#[derive(Debug)]
enum SlotValue<'a> {
    // `None` once the value has been moved out to the receiver
    Owned(Option<Box<dyn Any>>),
    Ref(AnyRef<'a>),
    Mut(AnyMut<'a>),
    RefSlice(AnySliceRef<'a>),
    MutSlice(AnySliceMut<'a>),
}

impl<'a> Slot<'a> {
    /// A slot that owns `value`
    pub fn owned<T: 'static>(value: T) -> Self {
        Self {
            ty: SlotType::of::<T>(Category::Owned),
            value: SlotValue::Owned(Some(Box::new(value) as Box<dyn Any>)),
        }
    }

    /// A slot that borrows `reference` read-only
    pub fn by_ref<T: 'static>(reference: &'a T) -> Self {
        Self {
            ty: SlotType::of::<T>(Category::Ref),
            value: SlotValue::Ref(AnyRef::erase(reference)),
        }
    }

    /// A slot that borrows `reference` mutably
    pub fn by_mut<T: 'static>(reference: &'a mut T) -> Self {
        Self {
            ty: SlotType::of::<T>(Category::Mut),
            value: SlotValue::Mut(AnyMut::erase(reference)),
        }
    }

    /// A slot that borrows the slice `slice` read-only
    pub fn by_ref_slice<U: 'static>(slice: &'a [U]) -> Self {
        Self {
            ty: SlotType::of::<[U]>(Category::Ref),
            value: SlotValue::RefSlice(AnySliceRef::erase(slice)),
        }
    }

    /// A slot that borrows the string slice `text`
    pub fn by_ref_str(text: &'a str) -> Self {
        Self {
            ty: SlotType::of::<str>(Category::Ref),
            value: SlotValue::RefSlice(AnySliceRef::erase_str(text)),
        }
    }

    /// A slot that borrows the slice `slice` mutably
    pub fn by_mut_slice<U: 'static>(slice: &'a mut [U]) -> Self {
        Self {
            ty: SlotType::of::<[U]>(Category::Mut),
            value: SlotValue::MutSlice(AnySliceMut::erase(slice)),
        }
    }

    /// The slot type the argument was passed with
    pub fn ty(&self) -> &SlotType {
        &self.ty
    }

    /// Move the value out, if the slot owns a `T` that hasn't been taken yet
    pub fn take<T: 'static>(&mut self) -> Option<T> {
        match &mut self.value {
            SlotValue::Owned(value) => {
                if !value.as_deref().is_some_and(|value| value.is::<T>()) {
                    return None;
                }

                value.take()?.downcast::<T>().ok().map(|value| *value)
            }
            _ => None,
        }
    }

    /// Read the value as a `T`, whatever the category
    pub fn get<T: 'static>(&self) -> Option<&T> {
        match &self.value {
            SlotValue::Owned(value) => value.as_deref()?.downcast_ref::<T>(),
            SlotValue::Ref(any) => any.downcast::<T>(),
            SlotValue::Mut(any) => any.downcast_ref::<T>(),
            SlotValue::RefSlice(_) | SlotValue::MutSlice(_) => None,
        }
    }

    /// Write access to the value as a `T`; read-only borrows refuse
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        match &mut self.value {
            SlotValue::Owned(value) => value.as_deref_mut()?.downcast_mut::<T>(),
            SlotValue::Mut(any) => any.downcast_mut::<T>(),
            _ => None,
        }
    }

    /// Read the borrowed slice as a `[U]`
    pub fn get_slice<U: 'static>(&self) -> Option<&[U]> {
        match &self.value {
            SlotValue::RefSlice(any) => any.downcast::<U>(),
            SlotValue::MutSlice(any) => any.downcast_ref::<U>(),
            _ => None,
        }
    }

    /// Write access to a mutably borrowed slice of `U`
    pub fn get_slice_mut<U: 'static>(&mut self) -> Option<&mut [U]> {
        match &mut self.value {
            SlotValue::MutSlice(any) => any.downcast_mut::<U>(),
            _ => None,
        }
    }

    /// Read the borrowed string slice
    pub fn get_str(&self) -> Option<&str> {
        match &self.value {
            SlotValue::RefSlice(any) => any.downcast_str(),
            _ => None,
        }
    }
}
