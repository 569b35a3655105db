pub mod attack;
pub mod config;
pub mod error;
pub mod key;
pub mod machine;
pub mod reporter;
pub mod rules;
pub mod scorer;
pub mod search;
pub mod simulation;
// cmd and reports belong to the binary (main.rs).
