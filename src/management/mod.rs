mod job;

pub use job::JobManager;
pub use job::JobState;
pub use job::spawn_supervised;
