mod user;
mod task;
mod forms;

pub use user::{User, UserView};
pub use task::{Task, SharedTaskView, Status, Priority, ChecklistItem};
pub use forms::{
    RegisterForm, LoginForm, UpdateUserForm, CreateTaskForm, UpdateTaskForm, MoveTaskForm,
    AssignBoardForm,
};
