mod user;
mod task;
mod share;

pub use user::{register, login, list_users, get_user, update_user};
pub use task::{
    create_task, list_tasks, get_analytics, get_task, delete_task, move_task, tasks_by_status,
    tasks_by_due_date, assign_board, update_task,
};
pub use share::{generate_share_link, view_shared_task};

// Service banner on the bare root path
pub async fn root() -> &'static str {
    "TASKBOARD API"
}
