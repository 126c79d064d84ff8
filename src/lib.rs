//! # State Algebra
//!
//! A propositional rule engine: facts and rules compile down to a single
//! *valid set* — a disjunction of ternary assignment patterns — against
//! which evidence can be checked without re-deriving anything from scratch.
//!
//! ## Pipeline
//!
//! ```text
//! Rule source text
//!     ↓
//! [parser]          → Expr (AST)
//!     ↓
//! [converter]       → StateVector (assignments satisfying the rule)
//!     ↓
//! [scheduler]       → one compiled StateVector ("valid set")
//!     ↓
//! [Engine::predict] → InferenceResult
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use state_algebra::Engine;
//!
//! let mut engine = Engine::new(vec!["rain".to_string(), "wet_grass".to_string()]).unwrap();
//! engine.add_rule("rain => wet_grass").unwrap();
//! engine.add_evidence(vec![("rain", true)]).unwrap();
//! engine.compile();
//!
//! assert_eq!(
//!     engine.get_variable_value("wet_grass").unwrap(),
//!     state_algebra::Ternary::True,
//! );
//! ```
//!
//! ## Module Organization
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `ternary` | The `{F, T, X}` value domain and its conjunction table |
//! | `tobject` | Bitset-backed single assignment over all variables |
//! | `state_vector` | Disjunction of TObjects, multiplication, simplification |
//! | `ast` | Parsed boolean expression tree and structural negation |
//! | `parser` | Hand-rolled recursive-descent parser for rule source text |
//! | `converter` | AST → StateVector, including complement computation |
//! | `scheduler` | Two-phase compilation heuristic (predator-prey, Jaccard) |
//! | `trace` | Structured record of scheduler progress |
//! | `inference` | Result wrapper returned by prediction and compilation |
//! | `config` | Hierarchical configuration loading |
//! | `error` | Crate-wide error type |

pub mod ast;
pub mod config;
pub mod converter;
mod engine;
pub mod error;
pub mod inference;
pub mod parser;
pub mod scheduler;
pub mod state_vector;
pub mod ternary;
pub mod tobject;
pub mod trace;

pub use config::{Config, LoggingConfig, SchedulerConfig};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use inference::InferenceResult;
pub use state_vector::StateVector;
pub use ternary::Ternary;
pub use tobject::TObject;
pub use trace::{CompilationTrace, Phase, SchedulerStep};
