//! Constraint solving and instance search for the Tessera elaborator.
//!
//! An elaboration session owns a [TyckState]. The type checker creates metavariables
//! through it, queues the equations it cannot decide immediately and finally calls
//! [TyckState::solve_metas]. Equations are decided by a [Unifier]; the
//! [SyntacticUnifier] is the reference implementation. Metavariables which must inhabit
//! a class type are solved by instance search ([TyckState::compute_solution]).

pub mod forest;
pub mod instances;
pub mod reporter;
pub mod result;
pub mod settings;
pub mod state;
pub mod unifier;

pub use forest::{DynamicForest, Handle};
pub use instances::{GlobalInstanceSet, Instance, InstanceSet, Instances};
pub use reporter::{LogReporter, Reporter};
pub use result::{ElabResult, InternalError, MetaVarError};
pub use settings::{ClassArgPolicy, ElabSettings};
pub use state::{ActiveMeta, Eqn, TyckState};
pub use unifier::{CompareMode, Comparison, Decision, Ordering, SyntacticUnifier, Unifier};
