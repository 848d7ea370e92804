use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

// Workflow column a task sits in. Any value can move to any other value;
// validation is membership only.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Todo,
    Backlog,
    Progress,
    Done,
}

impl Status {
    // Parses the wire value used in route params and move payloads.
    // Returns None for anything outside the four-value set.
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "TODO" => Some(Status::Todo),
            "BACKLOG" => Some(Status::Backlog),
            "PROGRESS" => Some(Status::Progress),
            "DONE" => Some(Status::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::Backlog => "BACKLOG",
            Status::Progress => "PROGRESS",
            Status::Done => "DONE",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Moderate,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Moderate => "MODERATE",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: Status,
    pub creator: String,            // user id, set once at creation
    pub assign_to: Option<String>,  // user id, may be unset
    pub assigned_email: Option<String>,
    pub checklist: Vec<ChecklistItem>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Read view returned for a shared link. Carries everything except the
// fields that identify who owns or works on the task.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SharedTaskView {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: Status,
    pub checklist: Vec<ChecklistItem>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(Status::parse("TODO"), Some(Status::Todo));
        assert_eq!(Status::parse("BACKLOG"), Some(Status::Backlog));
        assert_eq!(Status::parse("PROGRESS"), Some(Status::Progress));
        assert_eq!(Status::parse("DONE"), Some(Status::Done));

        assert_eq!(Status::parse("todo"), None);
        assert_eq!(Status::parse("IN-PROGRESS"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_status_wire_format_round_trip() {
        let json = serde_json::to_string(&Status::Todo).unwrap();
        assert_eq!(json, "\"TODO\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::Todo);
    }

    #[test]
    fn test_priority_wire_format() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"HIGH\"");
        assert_eq!(serde_json::to_string(&Priority::Moderate).unwrap(), "\"MODERATE\"");
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"LOW\"");
    }
}
