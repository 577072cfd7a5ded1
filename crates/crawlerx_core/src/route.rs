/// Which page the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Submission form and job list.
    #[default]
    Home,
    /// Detail page for one job id.
    Job(String),
}
