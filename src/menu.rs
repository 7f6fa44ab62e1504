//! Interactive menu loop.
//!
//! The primary interface: a blocking read-eval loop over five numbered
//! actions (add, delete, complete, view, save-and-exit). Every action loads
//! the task file fresh and writes it back after mutating, so the file stays
//! the single source of truth across actions.
//!
//! The loop functions are generic over a `BufRead` input and a `Write`
//! output; the binary passes locked stdin/stdout and tests drive them with
//! in-memory buffers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::db::{format_line, parse_priority, Database, DbError};
use crate::fields::Priority;
use crate::task::Task;

/// Outcome of classifying raw task-number input.
#[derive(Debug, PartialEq, Eq)]
enum Selection {
    /// Zero-based index into the listing.
    Valid(usize),
    NotANumber,
    OutOfRange,
}

/// Run the interactive menu against the task file at `db_path`.
///
/// Blocks until the user picks "Save and Exit" (or stdin closes). Storage
/// failures are fatal and propagate to the caller.
pub fn run_menu(db_path: &Path) -> Result<(), DbError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    menu_loop(&mut stdin.lock(), &mut stdout.lock(), db_path)
}

fn menu_loop<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    db_path: &Path,
) -> Result<(), DbError> {
    loop {
        writeln!(output)?;
        writeln!(output, "To-Do List Menu:")?;
        writeln!(output, "1. Add tasks")?;
        writeln!(output, "2. Delete task")?;
        writeln!(output, "3. Mark task as completed")?;
        writeln!(output, "4. View tasks")?;
        writeln!(output, "5. Save and Exit")?;

        let Some(choice) = prompt(input, output, "What would you like to do? ")? else {
            // stdin closed; mutations are already on disk, so just stop.
            return Ok(());
        };
        match choice.as_str() {
            "1" => add_tasks(input, output, db_path)?,
            "2" => delete_task(input, output, db_path)?,
            "3" => complete_task(input, output, db_path)?,
            "4" => view_tasks(output, db_path)?,
            "5" => {
                writeln!(output, "Tasks saved. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid input. Please enter a number between 1 and 5.")?,
        }
    }
}

/// Write `message`, flush, and read one trimmed line.
///
/// Returns `None` once the input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Menu choice 1: collect new tasks interactively, then merge and save.
fn add_tasks<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    db_path: &Path,
) -> Result<(), DbError> {
    let entered = collect_tasks(input, output)?;
    if entered.is_empty() {
        return Ok(());
    }
    let mut db = Database::load(db_path)?;
    for (description, priority) in entered {
        let id = db.next_id();
        db.tasks.push(Task::new(id, description, priority));
    }
    db.save(db_path)?;
    Ok(())
}

/// Prompt for description/priority pairs until the user declines to
/// continue. The new tasks are not yet persisted; the caller merges them
/// with the stored list.
fn collect_tasks<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Vec<(String, Priority)>> {
    let mut entries = Vec::new();
    loop {
        let Some(description) = prompt(input, output, "Enter task: ")? else {
            break;
        };
        let mut priority = None;
        while priority.is_none() {
            let Some(raw) = prompt(input, output, "Enter priority (high, medium, low): ")? else {
                // Input ended mid-entry; drop the unfinished task.
                return Ok(entries);
            };
            priority = parse_priority(&raw);
            if priority.is_none() {
                writeln!(output, "Invalid priority. Please enter high, medium, or low.")?;
            }
        }
        entries.push((description, priority.unwrap()));

        match prompt(input, output, "Would you like to add another task? (yes/no): ")? {
            Some(answer) if answer.eq_ignore_ascii_case("yes") => continue,
            _ => break,
        }
    }
    Ok(entries)
}

/// Menu choice 2: select a task and delete it.
fn delete_task<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    db_path: &Path,
) -> Result<(), DbError> {
    let mut db = Database::load(db_path)?;
    let Some(id) = select_task(input, output, &db.tasks)? else {
        return Ok(());
    };
    db.remove(id);
    db.save(db_path)?;
    writeln!(output, "Task deleted successfully.")?;
    Ok(())
}

/// Menu choice 3: select a task and mark it completed.
fn complete_task<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    db_path: &Path,
) -> Result<(), DbError> {
    let mut db = Database::load(db_path)?;
    let Some(id) = select_task(input, output, &db.tasks)? else {
        return Ok(());
    };
    if let Some(task) = db.get_mut(id) {
        task.set_completed(true);
    }
    db.save(db_path)?;
    writeln!(output, "Task marked as completed!")?;
    Ok(())
}

/// Menu choice 4: print the current checklist.
fn view_tasks<W: Write>(output: &mut W, db_path: &Path) -> Result<(), DbError> {
    let db = Database::load(db_path)?;
    display_tasks(output, &db.tasks)?;
    Ok(())
}

/// Write the numbered checklist, or the placeholder when there is nothing
/// to show.
fn display_tasks<W: Write>(output: &mut W, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(output, "No tasks available.")?;
        return Ok(());
    }
    writeln!(output, "\nYour Tasks:")?;
    for (i, task) in tasks.iter().enumerate() {
        writeln!(output, "{}", format_line(i + 1, task))?;
    }
    Ok(())
}

/// Present the checklist and resolve user input to a task id.
///
/// Re-prompts on anything that is not a 1-based position into the listing.
/// Returns `None` when the list is empty or the input ends.
fn select_task<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    tasks: &[Task],
) -> io::Result<Option<u64>> {
    if tasks.is_empty() {
        writeln!(output, "No tasks available.")?;
        return Ok(None);
    }
    display_tasks(output, tasks)?;

    loop {
        let Some(raw) = prompt(input, output, "\nEnter the task number: ")? else {
            return Ok(None);
        };
        match resolve_selection(&raw, tasks.len()) {
            Selection::Valid(idx) => return Ok(Some(tasks[idx].id)),
            Selection::NotANumber => {
                writeln!(output, "Invalid input. Please enter a valid task number.")?
            }
            Selection::OutOfRange => {
                writeln!(output, "Invalid task number. Please choose a valid task.")?
            }
        }
    }
}

/// Classify raw selection input against a listing of `len` tasks.
///
/// Only unsigned digit strings count as numbers; anything that parses but
/// falls outside `1..=len` (including 0 and overflow) is out of range.
fn resolve_selection(raw: &str, len: usize) -> Selection {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Selection::NotANumber;
    }
    match raw.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Selection::Valid(n - 1),
        _ => Selection::OutOfRange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn menu_over(db_path: &Path, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        menu_loop(&mut input, &mut output, db_path).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn selection_resolves_every_position_in_range() {
        for len in 1..=5 {
            for n in 1..=len {
                assert_eq!(resolve_selection(&n.to_string(), len), Selection::Valid(n - 1));
            }
        }
    }

    #[test]
    fn selection_rejects_bad_input_without_crashing() {
        assert_eq!(resolve_selection("0", 3), Selection::OutOfRange);
        assert_eq!(resolve_selection("4", 3), Selection::OutOfRange);
        assert_eq!(resolve_selection("99999999999999999999999", 3), Selection::OutOfRange);
        assert_eq!(resolve_selection("abc", 3), Selection::NotANumber);
        assert_eq!(resolve_selection("1.5", 3), Selection::NotANumber);
        assert_eq!(resolve_selection("-1", 3), Selection::NotANumber);
        assert_eq!(resolve_selection("", 3), Selection::NotANumber);
    }

    #[test]
    fn collect_tasks_loops_until_declined() {
        let mut input = Cursor::new("Buy milk\nlow\nyes\nCall Bob\nhigh\nno\n");
        let mut output = Vec::new();
        let entries = collect_tasks(&mut input, &mut output).unwrap();
        assert_eq!(
            entries,
            vec![
                ("Buy milk".to_string(), Priority::Low),
                ("Call Bob".to_string(), Priority::High),
            ]
        );
    }

    #[test]
    fn collect_tasks_reprompts_on_bad_priority() {
        let mut input = Cursor::new("Buy milk\nurgent\nLOW\nno\n");
        let mut output = Vec::new();
        let entries = collect_tasks(&mut input, &mut output).unwrap();
        assert_eq!(entries, vec![("Buy milk".to_string(), Priority::Low)]);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Invalid priority. Please enter high, medium, or low."));
    }

    #[test]
    fn add_view_complete_delete_through_the_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        // Add two tasks, then exit.
        menu_over(&path, "1\nBuy milk\nlow\nyes\nCall Bob\nhigh\nno\n5\n");
        let db = Database::load(&path).unwrap();
        assert_eq!(db.tasks.len(), 2);
        assert!(!db.tasks[0].completed);

        // View shows the numbered checklist in insertion order.
        let transcript = menu_over(&path, "4\n5\n");
        assert!(transcript.contains("Your Tasks:"));
        assert!(transcript.contains("1. [✗] Buy milk (Priority: low)"));
        assert!(transcript.contains("2. [✗] Call Bob (Priority: high)"));

        // Complete task 2; task 1 stays pending.
        let transcript = menu_over(&path, "3\n2\n5\n");
        assert!(transcript.contains("Task marked as completed!"));
        let db = Database::load(&path).unwrap();
        assert!(db.tasks[1].completed);
        assert!(!db.tasks[0].completed);
        let transcript = menu_over(&path, "4\n5\n");
        assert!(transcript.contains("2. [✓] Call Bob (Priority: high)"));

        // Delete task 1; only Call Bob remains.
        let transcript = menu_over(&path, "2\n1\n5\n");
        assert!(transcript.contains("Task deleted successfully."));
        let db = Database::load(&path).unwrap();
        assert_eq!(db.tasks.len(), 1);
        assert_eq!(db.tasks[0].description, "Call Bob");
    }

    #[test]
    fn delete_removes_one_of_two_identical_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        menu_over(&path, "1\nBuy milk\nlow\nyes\nBuy milk\nlow\nno\n5\n");

        menu_over(&path, "2\n1\n5\n");
        let db = Database::load(&path).unwrap();
        assert_eq!(db.tasks.len(), 1, "only the selected instance is deleted");
        assert_eq!(db.tasks[0].description, "Buy milk");
    }

    #[test]
    fn selection_reprompts_until_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        menu_over(&path, "1\nBuy milk\nlow\nno\n5\n");

        let transcript = menu_over(&path, "3\nabc\n0\n9\n1\n5\n");
        assert!(transcript.contains("Invalid input. Please enter a valid task number."));
        assert!(transcript.contains("Invalid task number. Please choose a valid task."));
        assert!(transcript.contains("Task marked as completed!"));
    }

    #[test]
    fn empty_list_short_circuits_mutations_and_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let transcript = menu_over(&path, "4\n2\n3\n5\n");
        assert_eq!(transcript.matches("No tasks available.").count(), 3);
        assert!(!path.exists(), "no mutation means nothing is written");
    }

    #[test]
    fn unrecognized_menu_choice_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let transcript = menu_over(&path, "7\nbanana\n5\n");
        assert_eq!(
            transcript
                .matches("Invalid input. Please enter a number between 1 and 5.")
                .count(),
            2
        );
        assert!(transcript.contains("Tasks saved. Goodbye!"));
    }

    #[test]
    fn closed_input_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        // No trailing "5": the script just runs out.
        let transcript = menu_over(&path, "4\n");
        assert!(transcript.contains("No tasks available."));
    }

    #[test]
    fn view_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        menu_over(&path, "1\nBuy milk\nlow\nno\n5\n");

        let first = menu_over(&path, "4\n5\n");
        let second = menu_over(&path, "4\n5\n");
        assert_eq!(first, second);
    }
}
