pub mod policy;

pub use policy::{
    ConservativePolicy, FirstLegalPolicy, MoonShooterPolicy, PolicyKind, RandomPolicy,
    UnknownPolicyKind,
};
