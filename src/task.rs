use std::fmt;

use chrono::{Local, NaiveDate};

use crate::error::ParseError;

/// Date format used for parsing and displaying dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub username: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// Creates an open task assigned today.
    pub fn new(username: String, title: String, description: String, due_date: NaiveDate) -> Self {
        Self {
            username,
            title,
            description,
            due_date,
            assigned_date: Local::now().date_naive(),
            completed: false,
        }
    }

    /// Decodes one semicolon-delimited store line. Exactly six fields:
    /// username, title, description, due date, assigned date, completed flag.
    pub fn from_line(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 6 {
            return Err(ParseError::FieldCount {
                expected: 6,
                found: fields.len(),
            });
        }
        Ok(Self {
            username: fields[0].to_string(),
            title: fields[1].to_string(),
            description: fields[2].to_string(),
            due_date: parse_date(fields[3])?,
            assigned_date: parse_date(fields[4])?,
            completed: fields[5] == "Yes",
        })
    }

    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{};{};{}",
            self.username,
            self.title,
            self.description,
            self.due_date.format(DATE_FORMAT),
            self.assigned_date.format(DATE_FORMAT),
            if self.completed { "Yes" } else { "No" },
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task: {}\nAssigned to: {}\nDate Assigned: {}\nDue Date: {}\nTask Description:\n{}",
            self.title,
            self.username,
            self.assigned_date.format(DATE_FORMAT),
            self.due_date.format(DATE_FORMAT),
            self.description,
        )
    }
}

/// Validates a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        value: value.to_string(),
    })
}
