use std::{
    ops::Deref,
    rc::{self, Rc},
    sync::{self, Arc},
};

/// An owning handle to a receiver, held by the application
pub trait SharedHandle {
    type Weak: WeakHandle;

    fn downgrade(&self) -> Self::Weak;
}

/// A non-owning handle to a receiver, held by a bound callback
pub trait WeakHandle: 'static {
    type Target: ?Sized;
    type Strong: Deref<Target = Self::Target>;

    /// Try to get an owning handle for the duration of one call
    fn upgrade(&self) -> Option<Self::Strong>;

    /// Has every owning handle been dropped already?
    fn is_dangling(&self) -> bool;
}

impl<T: ?Sized + 'static> SharedHandle for Rc<T> {
    type Weak = rc::Weak<T>;

    fn downgrade(&self) -> rc::Weak<T> {
        Rc::downgrade(self)
    }
}

impl<T: ?Sized + 'static> SharedHandle for Arc<T> {
    type Weak = sync::Weak<T>;

    fn downgrade(&self) -> sync::Weak<T> {
        Arc::downgrade(self)
    }
}

impl<T: ?Sized + 'static> WeakHandle for rc::Weak<T> {
    type Target = T;
    type Strong = Rc<T>;

    fn upgrade(&self) -> Option<Rc<T>> {
        rc::Weak::upgrade(self)
    }

    fn is_dangling(&self) -> bool {
        self.strong_count() == 0
    }
}

impl<T: ?Sized + 'static> WeakHandle for sync::Weak<T> {
    type Target = T;
    type Strong = Arc<T>;

    fn upgrade(&self) -> Option<Arc<T>> {
        sync::Weak::upgrade(self)
    }

    fn is_dangling(&self) -> bool {
        self.strong_count() == 0
    }
}
