//! Solvers answering acceptance queries on dynamic argumentation frameworks.

mod extension_cache;
pub use extension_cache::ExtensionCache;

mod grounded_assumptions;

mod ideal_extension_computer;

mod maximal_extension_computer;

mod oracle_session;

mod reasoning_engine;
pub use reasoning_engine::ReasoningEngine;

mod specs;
pub use specs::EngineOptions;
pub use specs::EngineState;
pub use specs::DEFAULT_CACHE_CAPACITY;
