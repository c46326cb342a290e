use crate::{Category, Slot, SlotType};
use std::{marker::PhantomData, rc::Rc, sync::Arc};

/// One parameter of a bound method's signature
///
/// The implementing type is a `'static` key naming both the decayed type and the category the
/// method expects, while [`Value`](Param::Value) is what the method actually receives for a
/// bundle borrowed for `'b`.
pub trait Param: 'static {
    type Value<'b>;

    fn slot_type() -> SlotType;

    /// Recover the value from a slot, or `None` if the slot can't provide it
    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<Self::Value<'b>>;
}

/// One element of an argument pack at the call site
pub trait Arg<'a> {
    fn into_slot(self) -> Slot<'a>;
}

/// A value passed by move
///
/// As a [`Param`] it makes the method receive a `T`; as an [`Arg`] it moves any `'static` value
/// into the bundle, also for types that don't implement [`Arg`] by themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Own<T>(pub T);

/// A parameter receiving `&T`, `&str` or `&[T]`
pub struct Ref<T: ?Sized>(PhantomData<fn() -> T>);

/// A parameter receiving `&mut T` or `&mut [T]`
pub struct Mut<T: ?Sized>(PhantomData<fn() -> T>);

impl<T: 'static> Param for Own<T> {
    type Value<'b> = T;

    fn slot_type() -> SlotType {
        SlotType::of::<T>(Category::Owned)
    }

    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<T> {
        slot.take::<T>()
    }
}

impl<T: 'static> Param for Ref<T> {
    type Value<'b> = &'b T;

    fn slot_type() -> SlotType {
        SlotType::of::<T>(Category::Ref)
    }

    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<&'b T> {
        slot.get::<T>()
    }
}

impl<T: 'static> Param for Mut<T> {
    type Value<'b> = &'b mut T;

    fn slot_type() -> SlotType {
        SlotType::of::<T>(Category::Mut)
    }

    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<&'b mut T> {
        slot.get_mut::<T>()
    }
}

impl Param for Ref<str> {
    type Value<'b> = &'b str;

    fn slot_type() -> SlotType {
        SlotType::of::<str>(Category::Ref)
    }

    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<&'b str> {
        slot.get_str()
    }
}

impl<T: 'static> Param for Ref<[T]> {
    type Value<'b> = &'b [T];

    fn slot_type() -> SlotType {
        SlotType::of::<[T]>(Category::Ref)
    }

    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<&'b [T]> {
        slot.get_slice::<T>()
    }
}

impl<T: 'static> Param for Mut<[T]> {
    type Value<'b> = &'b mut [T];

    fn slot_type() -> SlotType {
        SlotType::of::<[T]>(Category::Mut)
    }

    fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<&'b mut [T]> {
        slot.get_slice_mut::<T>()
    }
}

impl<'a, T: 'static> Arg<'a> for Own<T> {
    fn into_slot(self) -> Slot<'a> {
        Slot::owned(self.0)
    }
}

impl<'a, T: 'static> Arg<'a> for &'a T {
    fn into_slot(self) -> Slot<'a> {
        Slot::by_ref(self)
    }
}

impl<'a, T: 'static> Arg<'a> for &'a mut T {
    fn into_slot(self) -> Slot<'a> {
        Slot::by_mut(self)
    }
}

impl<'a> Arg<'a> for &'a str {
    fn into_slot(self) -> Slot<'a> {
        Slot::by_ref_str(self)
    }
}

impl<'a, T: 'static> Arg<'a> for &'a [T] {
    fn into_slot(self) -> Slot<'a> {
        Slot::by_ref_slice(self)
    }
}

impl<'a, T: 'static> Arg<'a> for &'a mut [T] {
    fn into_slot(self) -> Slot<'a> {
        Slot::by_mut_slice(self)
    }
}

// Owned types that can be used as-is, both as parameter and as argument
macro_rules! impl_owned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Param for $ty {
                type Value<'b> = $ty;

                fn slot_type() -> SlotType {
                    SlotType::of::<$ty>(Category::Owned)
                }

                fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<$ty> {
                    slot.take::<$ty>()
                }
            }

            impl<'a> Arg<'a> for $ty {
                fn into_slot(self) -> Slot<'a> {
                    Slot::owned(self)
                }
            }
        )*
    };
}

macro_rules! impl_owned_generic {
    ($($ty:ident<T $(: ?$unsized:ident)?>),* $(,)?) => {
        $(
            impl<T: 'static $(+ ?$unsized)?> Param for $ty<T> {
                type Value<'b> = $ty<T>;

                fn slot_type() -> SlotType {
                    SlotType::of::<$ty<T>>(Category::Owned)
                }

                fn extract<'b>(slot: &'b mut Slot<'_>) -> Option<$ty<T>> {
                    slot.take::<$ty<T>>()
                }
            }

            impl<'a, T: 'static $(+ ?$unsized)?> Arg<'a> for $ty<T> {
                fn into_slot(self) -> Slot<'a> {
                    Slot::owned(self)
                }
            }
        )*
    };
}

impl_owned!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);

impl_owned_generic!(Box<T: ?Sized>, Vec<T>, Option<T>, Rc<T: ?Sized>, Arc<T: ?Sized>);
