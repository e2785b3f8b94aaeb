#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
//! Runtime polymorphism without inheritance.
//!
//! Unrelated concrete types satisfy a shared capability set (a *concept*)
//! and are stored and invoked uniformly at runtime, without a common base
//! type and without knowing about the concept in advance. Instead of
//! trait-object dispatch baked into the types, a dispatch table is generated
//! once per (concept, type) pair and shared by every holder of that type;
//! the [`Poly`] holder pairs type-erased storage with a reference to the
//! matching table.
//!
//! A concept is declared once with [`concept!`], and each concrete type is
//! mapped onto it with [`implement!`], either by pointing operations at
//! same-shaped inherent methods, or with adapter closures that compose the
//! type's own primitives:
//!
//! ```
//! use polymorph::{concept, implement, Poly};
//!
//! concept! {
//!     /// Anything that can report and rescale a surface area.
//!     pub concept Shape {
//!         fn area(&self) -> f64;
//!         fn scale(&mut self, factor: f64);
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct Circle {
//!     radius: f64,
//! }
//!
//! #[derive(Clone)]
//! struct Square {
//!     side: f64,
//! }
//!
//! implement! {
//!     impl Shape for Circle {
//!         fn area(&self) -> f64 = |c: &Circle| std::f64::consts::PI * c.radius * c.radius;
//!         fn scale(&mut self, factor: f64) = |c: &mut Circle, factor: f64| c.radius *= factor;
//!     }
//! }
//!
//! implement! {
//!     impl Shape for Square {
//!         fn area(&self) -> f64 = |s: &Square| s.side * s.side;
//!         fn scale(&mut self, factor: f64) = |s: &mut Square, factor: f64| s.side *= factor;
//!     }
//! }
//!
//! let mut shape: Poly<dyn Shape> = Poly::new(Square { side: 2.0 });
//! assert!((shape.area() - 4.0).abs() < 1e-12);
//!
//! // Replacing the contents rebinds the holder to the new type's table.
//! shape.emplace(Circle { radius: 1.0 });
//! shape.scale(2.0);
//! assert!((shape.area() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
//! ```
//!
//! Holders can also *alias* a value owned elsewhere; mutations through the
//! holder land in the original:
//!
//! ```
//! # use polymorph::{concept, implement, Poly};
//! # concept! {
//! #     pub concept Shape {
//! #         fn area(&self) -> f64;
//! #         fn scale(&mut self, factor: f64);
//! #     }
//! # }
//! # #[derive(Clone)]
//! # struct Square {
//! #     side: f64,
//! # }
//! # implement! {
//! #     impl Shape for Square {
//! #         fn area(&self) -> f64 = |s: &Square| s.side * s.side;
//! #         fn scale(&mut self, factor: f64) = |s: &mut Square, factor: f64| s.side *= factor;
//! #     }
//! # }
//! let mut square = Square { side: 1.0 };
//! {
//!     let mut shape: Poly<dyn Shape> = Poly::alias(&mut square);
//!     shape.scale(3.0);
//! }
//! assert!((square.side - 3.0).abs() < 1e-12);
//! ```

mod cell;
mod concept;
mod erased;
mod error;
mod macros;
mod poly;
mod registry;

pub use cell::StorageCell;
pub use concept::{Concept, Implements};
pub use erased::{ErasedMut, ErasedRef};
pub use error::TakeError;
pub use poly::Poly;
pub use registry::table_of;
