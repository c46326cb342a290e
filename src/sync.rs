use crate::{
    delegate::report, BoundCallback, ErasedCallback, IntoArguments, Method, Params, SharedHandle,
    Signature, WeakHandle,
};
use parking_lot::Mutex;
use std::{fmt, sync::Arc};

type SharedCallback = Arc<dyn ErasedCallback + Send + Sync>;

/// A [`Delegate`](crate::Delegate) that can be shared between threads
///
/// The binding is swapped as a whole: a call takes a snapshot of the current binding and
/// dispatches outside the lock, so receivers may reconnect or disconnect the delegate from
/// within their own method, and a concurrent `connect` only affects later calls.
///
/// Receivers are held through [`std::sync::Weak`].
#[derive(Default)]
pub struct SyncDelegate {
    slot: Mutex<Option<SharedCallback>>,
}

impl SyncDelegate {
    /// Create an unbound delegate
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `method` on `receiver`, replacing the current binding
    pub fn connect<P, S, M>(&self, receiver: &S, method: M)
    where
        P: Params,
        S: SharedHandle,
        S::Weak: Send + Sync,
        M: Method<<S::Weak as WeakHandle>::Target, P> + Send + Sync,
    {
        self.connect_weak::<P, _, _>(receiver.downgrade(), method);
    }

    /// Bind `method` on an already weak `receiver`, replacing the current binding
    ///
    /// If the receiver is already gone the current binding is kept.
    pub fn connect_weak<P, W, M>(&self, receiver: W, method: M)
    where
        P: Params,
        W: WeakHandle + Send + Sync,
        M: Method<W::Target, P> + Send + Sync,
    {
        if receiver.is_dangling() {
            log::debug!("ignoring connect to a dropped receiver");
            return;
        }

        let callback: SharedCallback = Arc::new(BoundCallback::<W, P, M>::new(receiver, method));

        // The replaced binding is dropped outside the lock
        let old = self.slot.lock().replace(callback);
        drop(old);
    }

    /// Drop the current binding, if any
    pub fn disconnect(&self) {
        let old = self.slot.lock().take();
        drop(old);
    }

    pub fn is_connected(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// The parameter list of the current binding
    pub fn signature(&self) -> Option<Signature> {
        self.current().map(|callback| callback.signature())
    }

    /// Invoke the bound method with `args` on the calling thread
    ///
    /// Arguments are matched as in [`Delegate::call`](crate::Delegate::call): a `&T` never
    /// fills a parameter taking `T` or `&mut T`.
    pub fn call<'a>(&self, args: impl IntoArguments<'a>) {
        if let Some(callback) = self.current() {
            report(callback.invoke(args.into_arguments()));
        }
    }

    fn current(&self) -> Option<SharedCallback> {
        self.slot.lock().clone()
    }
}

impl fmt::Debug for SyncDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("SyncDelegate");

        match self.signature() {
            Some(signature) => debug.field("signature", &format_args!("Some({signature})")),
            None => debug.field("signature", &format_args!("None")),
        };

        debug.finish()
    }
}
