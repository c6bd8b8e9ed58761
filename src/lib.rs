//! Dynabri is an incremental solver for Abstract Argumentation frameworks subject to structural changes.
//!
//! The [`ReasoningEngine`](solvers::ReasoningEngine) receives the framework through the operations of the
//! [`DynamicSolver`](dynamics::DynamicSolver) trait, and answers credulous and skeptical acceptance queries
//! under the admissible, complete, preferred, stable, semi-stable, stage and ideal semantics.
//! The SAT oracle built for a semantics is kept between queries as long as the structure changes can be
//! expressed by assumptions, which is the purpose of the dynamic encoding mode.

#![warn(missing_docs)]

pub mod aa;

pub mod dynamics;

pub mod encodings;

pub mod io;

pub mod sat;

pub mod solvers;
