//! "Plan my next 25" summarizer.

use crate::task::Task;

/// Minutes handed to the first, second and third pending task.
const SLOT_MINUTES: [u32; 3] = [15, 7, 3];

/// Returned when there is nothing pending to plan.
pub const EMPTY_PLAN: &str = "Add 1–3 tasks first, then I’ll plan your next 25.";

/// Turn up to three pending tasks into a one-line plan.
pub fn plan<'a, I>(tasks: I) -> String
where
    I: IntoIterator<Item = &'a Task>,
{
    let pending: Vec<&str> = tasks
        .into_iter()
        .filter(|t| !t.done)
        .take(SLOT_MINUTES.len())
        .map(|t| t.text.as_str())
        .collect();

    if pending.is_empty() {
        return EMPTY_PLAN.to_string();
    }

    pending
        .iter()
        .zip(SLOT_MINUTES)
        .enumerate()
        .map(|(i, (text, minutes))| {
            let lead = if i == 0 { "Next 25:" } else { "Then" };
            format!("{lead} “{text}” for {minutes} min.")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(specs: &[(&str, bool)]) -> Vec<Task> {
        specs
            .iter()
            .enumerate()
            .map(|(i, (text, done))| Task {
                id: i.to_string(),
                text: text.to_string(),
                done: *done,
            })
            .collect()
    }

    #[test]
    fn empty_list_asks_for_tasks() {
        assert_eq!(plan(&tasks(&[])), EMPTY_PLAN);
    }

    #[test]
    fn all_done_asks_for_tasks() {
        assert_eq!(plan(&tasks(&[("A", true), ("B", true)])), EMPTY_PLAN);
    }

    #[test]
    fn single_task_gets_fifteen_minutes() {
        assert_eq!(plan(&tasks(&[("A", false)])), "Next 25: “A” for 15 min.");
    }

    #[test]
    fn two_tasks() {
        assert_eq!(
            plan(&tasks(&[("A", false), ("B", false)])),
            "Next 25: “A” for 15 min. Then “B” for 7 min."
        );
    }

    #[test]
    fn fourth_task_is_left_out() {
        let p = plan(&tasks(&[("A", false), ("B", false), ("C", false), ("D", false)]));
        assert_eq!(
            p,
            "Next 25: “A” for 15 min. Then “B” for 7 min. Then “C” for 3 min."
        );
        assert!(!p.contains("“D”"));
    }

    #[test]
    fn done_tasks_are_skipped() {
        assert_eq!(
            plan(&tasks(&[("A", true), ("B", false), ("C", true), ("D", false)])),
            "Next 25: “B” for 15 min. Then “D” for 7 min."
        );
    }
}
