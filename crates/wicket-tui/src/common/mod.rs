pub mod task;
pub mod text;
pub mod toast;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use toast::{Toast, ToastLevel, ToastState};
