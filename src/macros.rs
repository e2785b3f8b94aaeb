//! The `concept!` and `implement!` declaration macros.
//!
//! `concept!` turns an ordered list of operation signatures into everything
//! a concept needs: the interface trait itself, the erased table type (a
//! tuple of `unsafe fn` pointers, one entry per operation in declaration
//! order), and the forwarding impl that makes `Poly<dyn TheConcept>` usable
//! like a value of the interface. `implement!` supplies the matching
//! ordered list of implementation selectors for one concrete type and
//! synthesizes the adapters that un-erase the receiver and call them.
//!
//! Signature normalization is encoded in the macro grammars: a `&self`
//! receiver erases to [`ErasedRef`](crate::ErasedRef), `&mut self` to
//! [`ErasedMut`](crate::ErasedMut), and a receiverless operation gets an
//! `ErasedRef` its adapter ignores. Any other shape fails to parse at the
//! declaration site, and a selector that cannot be adapted to its
//! operation's erased signature fails to type-check at the `implement!`
//! site; neither ever surfaces at a call.

/// Declares a concept: an abstract, named set of operation signatures.
///
/// The concept's identity is the generated trait's `dyn` type, so holders
/// are spelled `Poly<dyn TheConcept>`. Operations may take `&self`,
/// `&mut self`, or no receiver at all; receiverless operations still appear
/// as `&self` methods on the interface, their adapters just never look at
/// the receiver.
///
/// ```
/// use polymorph::{concept, implement, Poly};
///
/// concept! {
///     /// Things with a measurable surface.
///     pub concept Surface {
///         fn area(&self) -> f64;
///         fn rescale(&mut self, factor: f64);
///     }
/// }
///
/// #[derive(Clone)]
/// struct Disc {
///     radius: f64,
/// }
///
/// implement! {
///     impl Surface for Disc {
///         fn area(&self) -> f64 = |d: &Disc| std::f64::consts::PI * d.radius * d.radius;
///         fn rescale(&mut self, factor: f64) = |d: &mut Disc, factor: f64| d.radius *= factor;
///     }
/// }
///
/// let mut surface: Poly<dyn Surface> = Poly::new(Disc { radius: 1.0 });
/// surface.rescale(2.0);
/// assert!((surface.area() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
/// ```
#[macro_export]
macro_rules! concept {
    (
        $(#[$meta:meta])*
        $vis:vis concept $name:ident { $($body:tt)* }
    ) => {
        $crate::__concept_parse! {
            meta [$(#[$meta])*]
            vis [$vis]
            name [$name]
            skip []
            ops []
            rest [$($body)*]
        }
    };
}

/// Maps a concrete type onto a concept, operation by operation.
///
/// Selectors must be listed in the concept's declaration order and there
/// must be one per operation; a missing, extra, or shape-mismatched entry
/// fails to compile at this site. Each selector is any expression callable
/// with the concrete receiver followed by the operation's arguments: a path
/// to an inherent method, or an adapter closure combining the type's own
/// primitives. Note that two same-shaped operations listed in the wrong
/// order will compile and dispatch swapped; the order is the contract.
///
/// ```
/// use polymorph::{concept, implement, Poly};
///
/// concept! {
///     pub concept Tick {
///         fn advance(&mut self);
///         fn now(&self) -> u64;
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct Clock {
///     at: u64,
/// }
///
/// impl Clock {
///     fn now(&self) -> u64 {
///         self.at
///     }
/// }
///
/// implement! {
///     impl Tick for Clock {
///         fn advance(&mut self) = |c: &mut Clock| c.at += 1;
///         fn now(&self) -> u64 = Clock::now;
///     }
/// }
///
/// let mut tick: Poly<dyn Tick> = Poly::new(Clock::default());
/// tick.advance();
/// assert_eq!(tick.now(), 1);
/// ```
#[macro_export]
macro_rules! implement {
    (
        impl $concept:ident for $ty:ty { $($body:tt)* }
    ) => {
        $crate::__implement_parse! {
            concept [$concept]
            ty [$ty]
            entries []
            rest [$($body)*]
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __concept_parse {
    // Exclusive receiver.
    (
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        skip [$($skip:tt)*]
        ops [$($ops:tt)*]
        rest [$(#[$om:meta])* fn $op:ident (&mut self $(, $arg:ident : $aty:ty)*) $(-> $ret:ty)? ; $($rest:tt)*]
    ) => {
        $crate::__concept_parse! {
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            skip [$($skip)* _,]
            ops [$($ops)* (meta [$(#[$om])*] op $op recv mut_recv args [$($arg : $aty),*] ret [$($ret)?] skip [$($skip)*])]
            rest [$($rest)*]
        }
    };
    // Shared receiver.
    (
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        skip [$($skip:tt)*]
        ops [$($ops:tt)*]
        rest [$(#[$om:meta])* fn $op:ident (&self $(, $arg:ident : $aty:ty)*) $(-> $ret:ty)? ; $($rest:tt)*]
    ) => {
        $crate::__concept_parse! {
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            skip [$($skip)* _,]
            ops [$($ops)* (meta [$(#[$om])*] op $op recv ref_recv args [$($arg : $aty),*] ret [$($ret)?] skip [$($skip)*])]
            rest [$($rest)*]
        }
    };
    // No receiver; the adapter ignores the erased one it is handed.
    (
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        skip [$($skip:tt)*]
        ops [$($ops:tt)*]
        rest [$(#[$om:meta])* fn $op:ident ($($arg:ident : $aty:ty),*) $(-> $ret:ty)? ; $($rest:tt)*]
    ) => {
        $crate::__concept_parse! {
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            skip [$($skip)* _,]
            ops [$($ops)* (meta [$(#[$om])*] op $op recv no_recv args [$($arg : $aty),*] ret [$($ret)?] skip [$($skip)*])]
            rest [$($rest)*]
        }
    };
    // All operations normalized; emit the trait, the descriptor, and the
    // forwarding impl.
    (
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        skip [$($skip:tt)*]
        ops [$($grp:tt)*]
        rest []
    ) => {
        $($meta)*
        $vis trait $name {
            $($crate::__concept_trait_method! $grp;)*
        }

        impl $crate::Concept for dyn $name {
            type Table = ($($crate::__concept_table_entry! $grp,)*);
        }

        impl<'a> $name for $crate::Poly<'a, dyn $name> {
            $($crate::__concept_forward_method! $grp;)*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __concept_trait_method {
    (meta [$($om:tt)*] op $op:ident recv mut_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        $($om)*
        fn $op(&mut self $(, $arg: $aty)*) $(-> $ret)?;
    };
    (meta [$($om:tt)*] op $op:ident recv ref_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        $($om)*
        fn $op(&self $(, $arg: $aty)*) $(-> $ret)?;
    };
    (meta [$($om:tt)*] op $op:ident recv no_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        $($om)*
        fn $op(&self $(, $arg: $aty)*) $(-> $ret)?;
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __concept_table_entry {
    (meta [$($om:tt)*] op $op:ident recv mut_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        unsafe fn($crate::ErasedMut<'_> $(, $aty)*) $(-> $ret)?
    };
    (meta [$($om:tt)*] op $op:ident recv ref_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        unsafe fn($crate::ErasedRef<'_> $(, $aty)*) $(-> $ret)?
    };
    (meta [$($om:tt)*] op $op:ident recv no_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        unsafe fn($crate::ErasedRef<'_> $(, $aty)*) $(-> $ret)?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __concept_forward_method {
    (meta [$($om:tt)*] op $op:ident recv mut_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        fn $op(&mut self $(, $arg: $aty)*) $(-> $ret)? {
            let (__receiver, __table) = self.dispatch_mut();
            let ($($skip)* __entry, ..) = *__table;
            // SAFETY: the bound table was built for the cell's concrete type.
            unsafe { __entry(__receiver $(, $arg)*) }
        }
    };
    (meta [$($om:tt)*] op $op:ident recv ref_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        fn $op(&self $(, $arg: $aty)*) $(-> $ret)? {
            let (__receiver, __table) = self.dispatch_ref();
            let ($($skip)* __entry, ..) = *__table;
            // SAFETY: the bound table was built for the cell's concrete type.
            unsafe { __entry(__receiver $(, $arg)*) }
        }
    };
    (meta [$($om:tt)*] op $op:ident recv no_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] skip [$($skip:tt)*]) => {
        fn $op(&self $(, $arg: $aty)*) $(-> $ret)? {
            let (__receiver, __table) = self.dispatch_ref();
            let ($($skip)* __entry, ..) = *__table;
            // SAFETY: the bound table was built for the cell's concrete type.
            unsafe { __entry(__receiver $(, $arg)*) }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __implement_parse {
    (
        concept [$concept:ident]
        ty [$ty:ty]
        entries [$($entries:tt)*]
        rest [fn $op:ident (&mut self $(, $arg:ident : $aty:ty)*) $(-> $ret:ty)? = $sel:expr ; $($rest:tt)*]
    ) => {
        $crate::__implement_parse! {
            concept [$concept]
            ty [$ty]
            entries [$($entries)* (ty [$ty] op $op recv mut_recv args [$($arg : $aty),*] ret [$($ret)?] sel [$sel])]
            rest [$($rest)*]
        }
    };
    (
        concept [$concept:ident]
        ty [$ty:ty]
        entries [$($entries:tt)*]
        rest [fn $op:ident (&self $(, $arg:ident : $aty:ty)*) $(-> $ret:ty)? = $sel:expr ; $($rest:tt)*]
    ) => {
        $crate::__implement_parse! {
            concept [$concept]
            ty [$ty]
            entries [$($entries)* (ty [$ty] op $op recv ref_recv args [$($arg : $aty),*] ret [$($ret)?] sel [$sel])]
            rest [$($rest)*]
        }
    };
    (
        concept [$concept:ident]
        ty [$ty:ty]
        entries [$($entries:tt)*]
        rest [fn $op:ident ($($arg:ident : $aty:ty),*) $(-> $ret:ty)? = $sel:expr ; $($rest:tt)*]
    ) => {
        $crate::__implement_parse! {
            concept [$concept]
            ty [$ty]
            entries [$($entries)* (ty [$ty] op $op recv no_recv args [$($arg : $aty),*] ret [$($ret)?] sel [$sel])]
            rest [$($rest)*]
        }
    };
    (
        concept [$concept:ident]
        ty [$ty:ty]
        entries [$($grp:tt)*]
        rest []
    ) => {
        impl $crate::Implements<dyn $concept> for $ty {
            fn dispatch_table() -> <dyn $concept as $crate::Concept>::Table {
                ($($crate::__implement_entry! $grp,)*)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __implement_entry {
    (ty [$ty:ty] op $op:ident recv mut_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] sel [$sel:expr]) => {{
        unsafe fn $op(__receiver: $crate::ErasedMut<'_> $(, $arg: $aty)*) $(-> $ret)? {
            // SAFETY: this adapter is only installed in the table selected
            // for cells holding the concrete type it was built for.
            let __this = unsafe { __receiver.downcast::<$ty>() };
            ($sel)(__this $(, $arg)*)
        }
        $op
    }};
    (ty [$ty:ty] op $op:ident recv ref_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] sel [$sel:expr]) => {{
        unsafe fn $op(__receiver: $crate::ErasedRef<'_> $(, $arg: $aty)*) $(-> $ret)? {
            // SAFETY: this adapter is only installed in the table selected
            // for cells holding the concrete type it was built for.
            let __this = unsafe { __receiver.downcast::<$ty>() };
            ($sel)(__this $(, $arg)*)
        }
        $op
    }};
    // Receiverless: the selector is installed as-is, no un-erasure.
    (ty [$ty:ty] op $op:ident recv no_recv args [$($arg:ident : $aty:ty),*] ret [$($ret:ty)?] sel [$sel:expr]) => {{
        unsafe fn $op(__receiver: $crate::ErasedRef<'_> $(, $arg: $aty)*) $(-> $ret)? {
            let _ = __receiver;
            ($sel)($($arg),*)
        }
        $op
    }};
}
