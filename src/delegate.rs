use crate::{
    BoundCallback, Dispatch, DispatchError, ErasedCallback, IntoArguments, Method, Params,
    SharedHandle, Signature, WeakHandle,
};
use std::fmt;

/// A single-slot connector between an emitter and one receiver method
///
/// The receiver is only held weakly, so the delegate never keeps it alive. Arguments are checked
/// against the bound method's parameters at every call; a call that doesn't fit, that finds the
/// receiver gone, or whose method fails, has no effect on the emitter's side. Those outcomes are
/// reported through the [`log`] facade.
///
/// `Delegate` is meant for single-threaded use; see [`SyncDelegate`](crate::SyncDelegate) for a
/// version that can be shared between threads.
///
/// # Example
///
/// ```
/// use erased_delegate::{Delegate, Mut};
/// use std::rc::Rc;
///
/// struct Scoreboard;
///
/// impl Scoreboard {
///     fn award(&self, points: u32, total: &mut u32) {
///         *total += points;
///     }
/// }
///
/// let board = Rc::new(Scoreboard);
/// let mut delegate = Delegate::new();
/// delegate.connect::<(u32, Mut<u32>), _, _>(&board, Scoreboard::award);
///
/// let mut total = 0_u32;
/// delegate.call((5_u32, &mut total));
/// assert_eq!(total, 5);
///
/// // Arguments of the wrong type never reach the receiver
/// delegate.call((5_i64, &mut total));
/// assert_eq!(total, 5);
/// ```
#[derive(Default)]
pub struct Delegate {
    callback: Option<Box<dyn ErasedCallback>>,
}

impl Delegate {
    /// Create an unbound delegate
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `method` on `receiver`, replacing the current binding
    ///
    /// `P` is the method's parameter list, e.g. `(i32, Ref<str>, Mut<[u8]>)`.
    pub fn connect<P, S, M>(&mut self, receiver: &S, method: M)
    where
        P: Params,
        S: SharedHandle,
        M: Method<<S::Weak as WeakHandle>::Target, P>,
    {
        self.connect_weak::<P, _, _>(receiver.downgrade(), method);
    }

    /// Bind `method` on an already weak `receiver`, replacing the current binding
    ///
    /// If the receiver is already gone the current binding is kept.
    pub fn connect_weak<P, W, M>(&mut self, receiver: W, method: M)
    where
        P: Params,
        W: WeakHandle,
        M: Method<W::Target, P>,
    {
        if receiver.is_dangling() {
            log::debug!("ignoring connect to a dropped receiver");
            return;
        }

        self.callback = Some(Box::new(BoundCallback::<W, P, M>::new(receiver, method)));
    }

    /// Drop the current binding, if any
    pub fn disconnect(&mut self) {
        self.callback = None;
    }

    /// Is a method bound? Stays `true` after the receiver is dropped
    pub fn is_connected(&self) -> bool {
        self.callback.is_some()
    }

    /// The parameter list of the current binding
    pub fn signature(&self) -> Option<Signature> {
        self.callback.as_ref().map(|callback| callback.signature())
    }

    /// Invoke the bound method with `args`, a tuple of arguments
    ///
    /// Owned values are moved into the call, `&T` and `&mut T` are passed through as
    /// references to the caller's data. Does nothing if the delegate is unbound.
    ///
    /// Borrowed arguments are never copied. A `&T` doesn't fill a parameter taking `T` or
    /// `&mut T`, and such a call is dropped as a mismatch; pass the value itself (e.g.
    /// `value.clone()`) instead. An owned value does fill `&T` and `&mut T` parameters, and
    /// writes through the latter only reach the call's own copy.
    pub fn call<'a>(&self, args: impl IntoArguments<'a>) {
        if let Some(callback) = &self.callback {
            report(callback.invoke(args.into_arguments()));
        }
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Delegate");

        match self.signature() {
            Some(signature) => debug.field("signature", &format_args!("Some({signature})")),
            None => debug.field("signature", &format_args!("None")),
        };

        debug.finish()
    }
}

/// Feed the outcome of a dispatch into the diagnostic channel
pub(crate) fn report(result: Result<Dispatch, DispatchError>) {
    match result {
        Ok(Dispatch::Delivered) => {}
        Ok(Dispatch::ReceiverDropped) => log::trace!("delegate receiver has been dropped"),
        Err(error) => log::warn!("delegate call dropped: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mut, Own, Ref};
    use std::{
        cell::{Cell, RefCell},
        rc::{self, Rc},
    };

    #[derive(Default)]
    struct Receiver {
        name: &'static str,
        calls: RefCell<Vec<String>>,
    }

    impl Receiver {
        fn named(name: &'static str) -> Rc<Self> {
            Rc::new(Self {
                name,
                ..Self::default()
            })
        }

        fn pair(&self, a: i32, b: f32) {
            self.calls
                .borrow_mut()
                .push(format!("{}.pair({a}, {b})", self.name));
        }

        fn text(&self, text: String) {
            self.calls
                .borrow_mut()
                .push(format!("{}.text({text})", self.name));
        }

        fn count(&self, counter: &mut i32) {
            *counter += 1;
        }

        fn take_cell(&self, cell: &Cell<u8>) {
            cell.set(cell.get() + 1);
        }
    }

    #[test]
    fn unbound_call_is_a_no_op() {
        let delegate = Delegate::new();

        delegate.call((1_i32, 2.5_f32));

        assert!(!delegate.is_connected());
        assert_eq!(delegate.signature(), None);
    }

    #[test]
    fn last_connect_wins() {
        let first = Receiver::named("first");
        let second = Receiver::named("second");
        let third = Receiver::named("third");
        let mut delegate = Delegate::new();

        delegate.connect::<(i32, f32), _, _>(&first, Receiver::pair);
        delegate.connect::<(i32, f32), _, _>(&second, Receiver::pair);
        delegate.connect::<(i32, f32), _, _>(&third, Receiver::pair);
        delegate.call((1_i32, 2.5_f32));

        assert!(first.calls.borrow().is_empty());
        assert!(second.calls.borrow().is_empty());
        assert_eq!(*third.calls.borrow(), ["third.pair(1, 2.5)"]);
    }

    #[test]
    fn rebinding_changes_the_signature() {
        let receiver = Receiver::named("r");
        let mut delegate = Delegate::new();

        delegate.connect::<(i32, f32), _, _>(&receiver, Receiver::pair);
        assert_eq!(delegate.signature(), Some(<(i32, f32)>::signature()));

        delegate.connect::<(Own<String>,), _, _>(&receiver, Receiver::text);
        assert_eq!(delegate.signature(), Some(<(String,)>::signature()));

        delegate.call((1_i32, 2.5_f32));
        delegate.call((String::from("hi"),));

        assert_eq!(*receiver.calls.borrow(), ["r.text(hi)"]);
    }

    #[test]
    fn connect_to_dropped_receiver_keeps_binding() {
        let kept = Receiver::named("kept");
        let gone = Receiver::named("gone");
        let gone_weak = Rc::downgrade(&gone);
        drop(gone);

        let mut delegate = Delegate::new();
        delegate.connect::<(i32, f32), _, _>(&kept, Receiver::pair);
        delegate.connect_weak::<(String,), _, _>(gone_weak, Receiver::text);
        delegate.connect_weak::<(String,), _, _>(rc::Weak::<Receiver>::new(), Receiver::text);

        delegate.call((3_i32, 0.5_f32));

        assert_eq!(*kept.calls.borrow(), ["kept.pair(3, 0.5)"]);
    }

    #[test]
    fn delegate_does_not_keep_receiver_alive() {
        let receiver = Receiver::named("r");
        let weak = Rc::downgrade(&receiver);
        let mut delegate = Delegate::new();

        delegate.connect::<(i32, f32), _, _>(&receiver, Receiver::pair);
        assert_eq!(Rc::strong_count(&receiver), 1);

        drop(receiver);
        delegate.call((1_i32, 2.5_f32));

        assert!(weak.upgrade().is_none());
        assert!(delegate.is_connected());
    }

    #[test]
    fn mutations_through_references_reach_the_caller() {
        let receiver = Receiver::named("r");
        let mut delegate = Delegate::new();
        delegate.connect::<(Mut<i32>,), _, _>(&receiver, Receiver::count);

        let mut counter = 0_i32;
        delegate.call((&mut counter,));
        delegate.call((&mut counter,));
        assert_eq!(counter, 2);

        delegate.call((counter,));
        assert_eq!(counter, 2);
    }

    #[test]
    fn interior_mutability_through_shared_reference() {
        let receiver = Receiver::named("r");
        let mut delegate = Delegate::new();
        delegate.connect::<(Ref<Cell<u8>>,), _, _>(&receiver, Receiver::take_cell);

        let cell = Cell::new(0_u8);
        delegate.call((&cell,));

        assert_eq!(cell.get(), 1);
    }

    #[test]
    fn disconnect_returns_to_unbound() {
        let receiver = Receiver::named("r");
        let mut delegate = Delegate::new();

        delegate.connect::<(i32, f32), _, _>(&receiver, Receiver::pair);
        delegate.disconnect();
        delegate.call((1_i32, 2.5_f32));

        assert!(!delegate.is_connected());
        assert!(receiver.calls.borrow().is_empty());
    }

    #[test]
    fn debug_shows_binding() {
        let receiver = Receiver::named("r");
        let mut delegate = Delegate::new();
        assert_eq!(format!("{delegate:?}"), "Delegate { signature: None }");

        delegate.connect::<(i32, f32), _, _>(&receiver, Receiver::pair);
        assert_eq!(
            format!("{delegate:?}"),
            "Delegate { signature: Some((i32, f32)) }"
        );
    }
}
