//! Core terms of the Tessera elaborator.
//!
//! The term language is intentionally small: it only contains the shapes that the
//! constraint solver and instance search inspect directly (free variables, interval
//! endpoints, class and data calls, metavariable calls, ...). Terms do not contain
//! binders; the only bound variables are [Bound] references into an enclosing
//! telescope, which are introduced by [Substitutable::bind_tele] and eliminated by
//! [Substitutable::inst_tele].

pub mod ctx;
mod decls;
mod exp;
mod ident;
mod traits;

pub use ctx::LocalCtx;
pub use decls::*;
pub use exp::*;
pub use ident::*;
pub use traits::*;

pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;
pub type HashSet<V> = fxhash::FxHashSet<V>;
