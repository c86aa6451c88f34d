use std::fmt;

/// The analysis tasks served over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Summarize,
    Keywords,
    Topic,
}

impl Task {
    pub const ALL: [Task; 3] = [Task::Summarize, Task::Keywords, Task::Topic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Summarize => "summarize",
            Task::Keywords => "keywords",
            Task::Topic => "classify-topic",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
