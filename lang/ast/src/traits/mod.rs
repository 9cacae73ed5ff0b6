mod free_vars;
mod occurs;
mod subst;
mod zonk;

pub use free_vars::*;
pub use occurs::*;
pub use subst::*;
pub use zonk::*;
