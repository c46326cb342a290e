use crate::{Arguments, DispatchError, Mismatch, Param, Params, Signature, WeakHandle};
use std::{
    fmt,
    marker::PhantomData,
    panic::{self, AssertUnwindSafe},
};

/// What happened to an invocation that passed the type check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The receiver's method ran to completion
    Delivered,

    /// The receiver is gone, nothing was called
    ReceiverDropped,
}

/// A receiver/method pair with its parameter types erased
pub trait ErasedCallback {
    /// Check `args` against the bound parameters and, if they fit and the receiver is still
    /// alive, call the method
    ///
    /// Never unwinds: errors returned or panics raised by the method come back as
    /// [`DispatchError`].
    fn invoke(&self, args: Arguments<'_>) -> Result<Dispatch, DispatchError>;

    /// The parameters the method was bound with
    fn signature(&self) -> Signature;
}

/// What a bound method may return
pub trait Outcome {
    fn into_result(self) -> anyhow::Result<()>;
}

impl Outcome for () {
    fn into_result(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> Outcome for Result<(), E> {
    fn into_result(self) -> anyhow::Result<()> {
        self.map_err(Into::into)
    }
}

/// A method of `R` taking the parameter list `P`
///
/// Implemented for every `Fn(&R, P1::Value<'_>, ..)` returning an [`Outcome`], which covers plain
/// methods like `Receiver::on_event` as well as closures with annotated parameters.
pub trait Method<R: ?Sized, P: Params>: 'static {
    type Output: Outcome;

    fn call_with(&self, receiver: &R, values: P::Values<'_>) -> Self::Output;
}

macro_rules! impl_method {
    ($($P:ident),*) => {
        impl<R, Func, Out, $($P),*> Method<R, ($($P,)*)> for Func
        where
            R: ?Sized,
            Func: 'static + for<'b> Fn(&R, $(<$P as Param>::Value<'b>),*) -> Out,
            Out: Outcome,
            $($P: Param,)*
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn call_with(&self, receiver: &R, values: <($($P,)*) as Params>::Values<'_>) -> Out {
                let ($($P,)*) = values;

                self(receiver, $($P),*)
            }
        }
    };
}

impl_method!();
impl_method!(A);
impl_method!(A, B);
impl_method!(A, B, C);
impl_method!(A, B, C, D);
impl_method!(A, B, C, D, E);
impl_method!(A, B, C, D, E, F);
impl_method!(A, B, C, D, E, F, G);
impl_method!(A, B, C, D, E, F, G, H);
impl_method!(A, B, C, D, E, F, G, H, I);
impl_method!(A, B, C, D, E, F, G, H, I, J);
impl_method!(A, B, C, D, E, F, G, H, I, J, K);
impl_method!(A, B, C, D, E, F, G, H, I, J, K, L);

/// A method bound to a weakly held receiver, with the parameter list `P`
pub struct BoundCallback<W, P, M> {
    receiver: W,
    method: M,
    _params: PhantomData<fn() -> P>,
}

impl<W, P, M> BoundCallback<W, P, M>
where
    W: WeakHandle,
    P: Params,
    M: Method<W::Target, P>,
{
    pub fn new(receiver: W, method: M) -> Self {
        Self {
            receiver,
            method,
            _params: PhantomData,
        }
    }
}

impl<W, P, M> ErasedCallback for BoundCallback<W, P, M>
where
    W: WeakHandle,
    P: Params,
    M: Method<W::Target, P>,
{
    fn invoke(&self, mut args: Arguments<'_>) -> Result<Dispatch, DispatchError> {
        let expected = P::signature();
        let found = args.signature();

        if !expected.accepts(&found) {
            return Err(Mismatch { expected, found }.into());
        }

        let Some(values) = P::recover(&mut args) else {
            return Err(Mismatch { expected, found }.into());
        };

        // The strong handle is released inside the guard as well: the method may have dropped
        // every other owner, which makes this the receiver's destructor
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let receiver = self.receiver.upgrade()?;

            Some(self.method.call_with(&*receiver, values).into_result())
        }))
        .map_err(DispatchError::from_panic)?;

        match outcome {
            Some(result) => result
                .map(|()| Dispatch::Delivered)
                .map_err(DispatchError::Failed),
            None => Ok(Dispatch::ReceiverDropped),
        }
    }

    fn signature(&self) -> Signature {
        P::signature()
    }
}

impl<W, P: Params, M> fmt::Debug for BoundCallback<W, P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCallback")
            .field("signature", &format_args!("{}", P::signature()))
            .finish_non_exhaustive()
    }
}
