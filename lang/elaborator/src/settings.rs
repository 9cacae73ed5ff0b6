use std::env;
use std::str::FromStr;

/// How the case tree compiler treats the arguments of a class call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassArgPolicy {
    /// Class calls only discriminate on the class itself.
    #[default]
    Opaque,
    /// The fixed fields of a class call are discriminated on as well.
    Discriminate,
}

impl FromStr for ClassArgPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opaque" => Ok(ClassArgPolicy::Opaque),
            "discriminate" => Ok(ClassArgPolicy::Discriminate),
            other => Err(format!("Unknown class argument policy: {other}")),
        }
    }
}

/// Settings of one elaboration session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElabSettings {
    pub class_args: ClassArgPolicy,
    /// Whether equations outside the pattern fragment are attempted with
    /// non-unique solutions once the safe fixpoint is reached.
    pub heuristic_fallback: bool,
}

impl Default for ElabSettings {
    fn default() -> Self {
        Self { class_args: ClassArgPolicy::default(), heuristic_fallback: true }
    }
}

impl ElabSettings {
    /// Read `TESSERA_CLASS_ARGS` and `TESSERA_HEURISTICS` from the environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Settings from the variables that `lookup` knows, with defaults for the others.
    /// Unknown class argument policies fall back to the default.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let class_args = lookup("TESSERA_CLASS_ARGS")
            .and_then(|var| ClassArgPolicy::from_str(&var).ok())
            .unwrap_or_default();

        let heuristic_fallback = lookup("TESSERA_HEURISTICS")
            .map(|var| !matches!(var.to_lowercase().as_str(), "off" | "false" | "0"))
            .unwrap_or(true);

        Self { class_args, heuristic_fallback }
    }
}
