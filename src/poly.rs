//! The polymorphic holder.

use std::any::{Any, TypeId};
use std::fmt;
use std::mem;

use crate::cell::StorageCell;
use crate::concept::{Concept, Implements};
use crate::erased::{ErasedMut, ErasedRef};
use crate::error::TakeError;
use crate::registry;

/// A value of concept `C`, backed by any concrete type satisfying it.
///
/// A holder pairs a [`StorageCell`] with the dispatch table built for the
/// cell's concrete type. The table reference is `None` exactly when the cell
/// is empty; whenever it is bound, it matches the stored type, which is what
/// makes unchecked dispatch through the concept's interface sound.
///
/// Holders are plain values: cloning one deep-copies owned contents (and
/// shares aliased contents), moving one transfers both halves at once, and
/// none of it synchronizes anything. The lifetime parameter only matters for
/// aliasing holders; owning holders can always be `Poly<'static, _>`.
///
/// ```
/// use polymorph::{concept, implement, Poly};
///
/// concept! {
///     pub concept Greet {
///         fn greet(&self) -> String;
///     }
/// }
///
/// #[derive(Clone)]
/// struct Terse;
///
/// implement! {
///     impl Greet for Terse {
///         fn greet(&self) -> String = |_: &Terse| String::from("hi");
///     }
/// }
///
/// let holder: Poly<dyn Greet> = Poly::new(Terse);
/// assert_eq!(holder.greet(), "hi");
/// ```
pub struct Poly<'a, C: Concept + ?Sized> {
    cell: StorageCell<'a>,
    table: Option<&'static C::Table>,
}

impl<'a, C: Concept + ?Sized> Poly<'a, C> {
    /// A holder with no contents and no table bound.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cell: StorageCell::empty(),
            table: None,
        }
    }

    /// A holder owning `value`, bound to the table for `T`.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Implements<C> + Clone,
    {
        Self {
            cell: StorageCell::owning(value),
            table: Some(registry::table_of::<C, T>()),
        }
    }

    /// A holder aliasing `value`, which stays owned by the caller.
    ///
    /// The borrow pins the referent for the holder's whole lifetime, so
    /// dropping the holder never touches it and the caller gets it back,
    /// mutations included, once the holder (and every clone of it) is gone.
    #[must_use]
    pub fn alias<T>(value: &'a mut T) -> Self
    where
        T: Implements<C>,
    {
        Self {
            cell: StorageCell::aliasing(value),
            table: Some(registry::table_of::<C, T>()),
        }
    }

    /// True when nothing is stored; no operations may be invoked then.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.table.is_none(), self.cell.is_empty());
        self.table.is_none()
    }

    /// Identity of the held concrete type, `None` when empty.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        self.cell.type_id()
    }

    /// Diagnostic name of the held concrete type, `None` when empty.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.cell.type_name()
    }

    /// Opaque pointer to the held value, null when empty.
    #[must_use]
    pub fn data(&self) -> *const () {
        self.cell.data()
    }

    /// Opaque mutable pointer to the held value, null when empty.
    pub fn data_mut(&mut self) -> *mut () {
        self.cell.data_mut()
    }

    /// The bound dispatch table, `None` when empty.
    ///
    /// Table identity doubles as a cheap "same concrete type under this
    /// concept" test, since exactly one table exists per (concept, type)
    /// pair for the lifetime of the process.
    #[must_use]
    pub fn table(&self) -> Option<&'static C::Table> {
        self.table
    }

    /// Drops the current contents and owns `value` instead, rebinding the
    /// table to `T`'s.
    pub fn emplace<T>(&mut self, value: T)
    where
        T: Implements<C> + Clone,
    {
        self.cell.emplace(value);
        self.table = Some(registry::table_of::<C, T>());
    }

    /// Moves the contents out, leaving this holder empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// A holder aliasing this holder's current contents, owned or not.
    ///
    /// The original keeps its contents and mode; it is only exclusively
    /// borrowed while the view is around. Reborrowing an empty holder
    /// yields an empty holder.
    #[must_use]
    pub fn reborrow(&mut self) -> Poly<'_, C> {
        Poly {
            table: self.table,
            cell: self.cell.reborrow(),
        }
    }

    /// Exchanges the contents and tables of two holders. No allocation,
    /// and both sides stay valid throughout.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Typed view of owned contents; `None` for empty, aliased, or
    /// differently-typed contents (see [`StorageCell::downcast_ref`]).
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.cell.downcast_ref()
    }

    /// Typed mutable view of owned contents.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.cell.downcast_mut()
    }

    /// Moves the owned value out, leaving the holder empty.
    ///
    /// # Errors
    ///
    /// Exactly the cases of [`StorageCell::try_take`]; the holder is
    /// unchanged on every error.
    pub fn try_take<T: Any>(&mut self) -> Result<T, TakeError> {
        let value = self.cell.try_take::<T>()?;
        self.table = None;
        Ok(value)
    }

    /// Erased receiver and table for a shared-receiver operation. Interface
    /// methods generated by [`concept!`](macro@crate::concept) call this; use it
    /// directly only for manual dispatch.
    ///
    /// # Panics
    ///
    /// When the holder is empty. An empty holder has no table, so there is
    /// nothing meaningful to dispatch against.
    #[must_use]
    pub fn dispatch_ref(&self) -> (ErasedRef<'_>, &'static C::Table) {
        match (self.cell.erased_ref(), self.table) {
            (Some(receiver), Some(table)) => (receiver, table),
            _ => panic!("concept operation invoked on an empty holder"),
        }
    }

    /// Erased receiver and table for an exclusive-receiver operation.
    ///
    /// # Panics
    ///
    /// When the holder is empty.
    #[must_use]
    pub fn dispatch_mut(&mut self) -> (ErasedMut<'_>, &'static C::Table) {
        let table = self.table;
        match (self.cell.erased_mut(), table) {
            (Some(receiver), Some(table)) => (receiver, table),
            _ => panic!("concept operation invoked on an empty holder"),
        }
    }
}

impl<C: Concept + ?Sized> Clone for Poly<'_, C> {
    /// Duplicates per the cell's copy contract: deep copy when owning,
    /// shared referent when aliasing. The table reference is copied as-is.
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            table: self.table,
        }
    }
}

impl<C: Concept + ?Sized> Default for Poly<'_, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: Concept + ?Sized> fmt::Debug for Poly<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly")
            .field("contents", &self.cell)
            .field("bound", &self.table.is_some())
            .finish()
    }
}
