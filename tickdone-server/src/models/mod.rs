//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod deadline;
pub mod task_name;
pub mod todo;
pub mod validation;

pub use task_name::{TaskName, MIN_TASK_NAME_LEN};
pub use todo::{NewTodo, Todo};
pub use validation::ValidationError;
