//! Workspace tooling package. It exists to carry the `rusty-hook` pre-commit
//! configuration; the engine lives in `crates/unitmap-lib`.
