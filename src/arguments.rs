use crate::{Arg, Param, Slot, SlotType};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// The ordered slot types of a parameter list or an argument pack
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(SmallVec<[SlotType; 4]>);

impl Signature {
    /// Can an argument pack with signature `found` be delivered to parameters of this signature?
    pub fn accepts(&self, found: &Signature) -> bool {
        self.len() == found.len()
            && self
                .iter()
                .zip(found.iter())
                .all(|(param, arg)| arg.can_fill(param))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotType> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SlotType> for Signature {
    fn from_iter<I: IntoIterator<Item = SlotType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, ty) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        f.write_str(")")
    }
}

/// The arguments of one invocation, with their types erased
///
/// A bundle is built once per call, its arity and slot types never change afterwards, and it is
/// consumed by a single dispatch. The only way back to typed values is [`Params::recover`],
/// which checks every slot before handing anything out.
#[derive(Debug, Default)]
pub struct Arguments<'a> {
    slots: SmallVec<[Slot<'a>; 4]>,
}

impl<'a> Arguments<'a> {
    pub fn from_slots(slots: impl IntoIterator<Item = Slot<'a>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    /// The slot types of the arguments, in order
    pub fn signature(&self) -> Signature {
        self.slots.iter().map(|slot| *slot.ty()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// An argument pack that can be erased into [`Arguments`]
///
/// Implemented for tuples of up to twelve [`Arg`]s.
pub trait IntoArguments<'a> {
    fn into_arguments(self) -> Arguments<'a>;
}

impl<'a> IntoArguments<'a> for Arguments<'a> {
    fn into_arguments(self) -> Arguments<'a> {
        self
    }
}

/// A parameter list, i.e. a tuple of up to twelve [`Param`]s
pub trait Params: 'static {
    /// The typed values a method receives from a bundle borrowed for `'b`
    type Values<'b>;

    const ARITY: usize;

    fn signature() -> Signature;

    /// Recover the typed values from an erased bundle
    ///
    /// Returns `None` if the arity differs or any slot can't provide its parameter.
    fn recover<'b>(args: &'b mut Arguments<'_>) -> Option<Self::Values<'b>>;
}

macro_rules! one {
    ($_:ident) => {
        1
    };
}

macro_rules! impl_tuples {
    ($($P:ident),*) => {
        impl<$($P: Param),*> Params for ($($P,)*) {
            type Values<'b> = ($(<$P as Param>::Value<'b>,)*);

            const ARITY: usize = 0 $(+ one!($P))*;

            fn signature() -> Signature {
                Signature(smallvec![$(<$P as Param>::slot_type()),*])
            }

            #[allow(unused_mut, unused_variables)]
            fn recover<'b>(args: &'b mut Arguments<'_>) -> Option<Self::Values<'b>> {
                if args.len() != Self::ARITY {
                    return None;
                }

                let mut slots = args.slots.iter_mut();

                Some(($(<$P as Param>::extract(slots.next()?)?,)*))
            }
        }

        impl<'a, $($P: Arg<'a>),*> IntoArguments<'a> for ($($P,)*) {
            #[allow(non_snake_case)]
            fn into_arguments(self) -> Arguments<'a> {
                let ($($P,)*) = self;

                Arguments {
                    slots: smallvec![$($P.into_slot()),*],
                }
            }
        }
    };
}

impl_tuples!();
impl_tuples!(A);
impl_tuples!(A, B);
impl_tuples!(A, B, C);
impl_tuples!(A, B, C, D);
impl_tuples!(A, B, C, D, E);
impl_tuples!(A, B, C, D, E, F);
impl_tuples!(A, B, C, D, E, F, G);
impl_tuples!(A, B, C, D, E, F, G, H);
impl_tuples!(A, B, C, D, E, F, G, H, I);
impl_tuples!(A, B, C, D, E, F, G, H, I, J);
impl_tuples!(A, B, C, D, E, F, G, H, I, J, K);
impl_tuples!(A, B, C, D, E, F, G, H, I, J, K, L);
