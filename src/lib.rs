//! # Erased Delegate
//!
//! A single-slot delegate: one emitter, one receiver method, and nothing in between that needs to
//! know both sides' types at compile time.
//!
//! * The receiver is held through a `Weak`, so connecting never keeps it alive.
//! * Arguments are erased into an [`Arguments`] bundle at the call site, and recovered at the
//!   receiver's side with a checked downcast against the parameters the method was bound with.
//! * Every argument keeps its category: values are moved, `&T` and `&mut T` stay references to
//!   the caller's data, so mutations made by the receiver are visible to the caller.
//!
//! A call whose arguments don't fit, whose receiver is gone, or whose method fails or panics,
//! simply has no effect for the emitter. Mismatches and failures are reported through the
//! [`log`] facade; install any logger to see them.
//!
//! Parameter lists are tuples of [`Param`]s. Common owned types (integers, floats, `bool`,
//! `char`, `String`, `Vec<T>`, `Box<T>`, ...) can be named directly, anything else is named with
//! [`Own<T>`], and references with [`Ref<T>`] and [`Mut<T>`]. `Ref<str>`, `Ref<[T]>` and
//! `Mut<[T]>` take string and slice borrows.
//!
//! ## Example
//!
//! ```rust
//! use erased_delegate::{Delegate, Ref};
//! use std::{cell::RefCell, rc::Rc};
//!
//! #[derive(Default)]
//! struct Console {
//!     lines: RefCell<Vec<String>>,
//! }
//!
//! impl Console {
//!     fn print(&self, level: u8, message: &str) {
//!         self.lines.borrow_mut().push(format!("[{level}] {message}"));
//!     }
//! }
//!
//! let console = Rc::new(Console::default());
//! let mut delegate = Delegate::new();
//! delegate.connect::<(u8, Ref<str>), _, _>(&console, Console::print);
//!
//! delegate.call((1_u8, "ready"));
//!
//! // Doesn't match `(u8, &str)`, so it never reaches the console
//! delegate.call((1_u8,));
//!
//! assert_eq!(*console.lines.borrow(), ["[1] ready"]);
//!
//! // Once the console is gone, calls are no-ops
//! drop(console);
//! delegate.call((2_u8, "gone"));
//! ```
//!
//! ## Threads
//!
//! [`Delegate`] is single-threaded. [`SyncDelegate`] has the same interface for `Arc` receivers
//! and can be connected and called from any thread.
//!
//! ## Panics
//!
//! Panics raised by a receiver are caught at the delegate boundary, which requires the default
//! `panic = "unwind"` strategy.

mod any_mut;
mod any_ref;
mod any_slice_mut;
mod any_slice_ref;
mod arguments;
mod callback;
mod delegate;
mod error;
mod param;
mod receiver;
mod slot;
mod sync;

pub use any_mut::AnyMut;
pub use any_ref::AnyRef;
pub use any_slice_mut::AnySliceMut;
pub use any_slice_ref::AnySliceRef;
pub use arguments::{Arguments, IntoArguments, Params, Signature};
pub use callback::{BoundCallback, Dispatch, ErasedCallback, Method, Outcome};
pub use delegate::Delegate;
pub use error::{DispatchError, Mismatch};
pub use param::{Arg, Mut, Own, Param, Ref};
pub use receiver::{SharedHandle, WeakHandle};
pub use slot::{Category, Slot, SlotType};
pub use sync::SyncDelegate;
