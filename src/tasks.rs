use crate::models::{TaskMap, TaskRecord};

/// Result of a transition attempt. Every operation is a validated no-op
/// when its precondition fails; `Ignored` tells the caller to skip the
/// persistence write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Ignored,
}

impl Applied {
    pub fn changed(self) -> bool {
        self == Applied::Changed
    }
}

/// Replace the draft text for `day`. Locked once the record is saved.
pub fn update_text(tasks: &mut TaskMap, day: u32, text: String) -> Applied {
    match tasks.get(&day) {
        Some(record) if record.is_saved() => Applied::Ignored,
        _ => {
            tasks.insert(day, TaskRecord::Drafted { text });
            Applied::Changed
        }
    }
}

/// Lock the draft for `day`. Requires non-empty text; irreversible.
pub fn save(tasks: &mut TaskMap, day: u32) -> Applied {
    match tasks.get(&day) {
        Some(TaskRecord::Drafted { text }) if !text.is_empty() => {
            let text = text.clone();
            tasks.insert(day, TaskRecord::Saved { text });
            Applied::Changed
        }
        _ => Applied::Ignored,
    }
}

/// Mark `day` complete. Only today's saved task qualifies; past and
/// future days are rejected, and completing twice is a no-op so the
/// congratulations signal fires once per task.
pub fn mark_complete(tasks: &mut TaskMap, day: u32, today: u32) -> Applied {
    if day != today {
        return Applied::Ignored;
    }
    match tasks.get(&day) {
        Some(TaskRecord::Saved { text }) => {
            let text = text.clone();
            tasks.insert(day, TaskRecord::Completed { text });
            Applied::Changed
        }
        _ => Applied::Ignored,
    }
}
