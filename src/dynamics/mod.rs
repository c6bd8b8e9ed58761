//! The model of argumentation frameworks subject to structural changes.

mod dynamic_framework;
pub use dynamic_framework::DynamicFramework;
pub use dynamic_framework::StaticStructure;
pub use dynamic_framework::DEFAULT_BUFFER_CAPACITY;
pub use dynamic_framework::DEFAULT_DYNAMIC_THRESHOLD;

mod dynamic_solver;
pub use dynamic_solver::DynamicSolver;

mod variable_layout;
pub use variable_layout::FrameworkMode;
pub use variable_layout::VariableLayout;
