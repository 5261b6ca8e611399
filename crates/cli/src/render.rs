// Table rendering: a pure projection of the job list, rebuilt in full

use jobtracker_core::domain::{Job, JobId};
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub const TITLE: &str = "Jobs List";

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "Job ID")]
    id: JobId,
    #[tabled(rename = "Client Name")]
    name: String,
    #[tabled(rename = "Job Details")]
    details: String,
    #[tabled(rename = "Job Price")]
    price: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Completed")]
    completed: &'static str,
    #[tabled(rename = "Paid")]
    paid: &'static str,
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id(),
            name: job.name().to_string(),
            details: job.details().to_string(),
            price: format!("{:.2}", job.price()),
            date: job.date().to_string(),
            completed: yes_no(job.is_completed()),
            paid: yes_no(job.is_paid()),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render the jobs as a table, headers included even when empty
pub fn render_table(jobs: &[Job]) -> String {
    let mut table = Table::new(jobs.iter().map(JobRow::from));
    table.with(Style::rounded());
    table.to_string()
}
