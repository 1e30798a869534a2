use clap::ValueEnum;

/// Built-in user stories for trying the generator without writing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleStory {
    Login,
    CsvExport,
}

impl SampleStory {
    pub fn title(&self) -> &'static str {
        match self {
            SampleStory::Login => "Login functionality",
            SampleStory::CsvExport => "CSV export functionality",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            SampleStory::Login => {
                "As a user, I want to log in to the application using my email and password
so that I can access my personal dashboard.

Acceptance Criteria:
- User can enter email and password
- System validates credentials
- Successful login redirects to dashboard
- Failed login shows error message
- Account locks after 3 failed attempts"
            }
            SampleStory::CsvExport => {
                "As an admin, I want to export user data to CSV format
so that I can analyze user activity offline.

Acceptance Criteria:
- Export button is visible only to admins
- CSV includes all user fields (name, email, registration date, last login)
- File downloads with timestamp in filename
- Maximum 10,000 records per export"
            }
        }
    }
}
