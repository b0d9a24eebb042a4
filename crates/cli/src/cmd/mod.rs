mod batch;
mod check;
mod list;
mod run;

pub use batch::cmd_batch;
pub use check::cmd_check;
pub use list::cmd_list;
pub use run::{RunTarget, cmd_run};
