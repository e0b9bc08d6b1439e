use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{TaskStore, UserStore};
use crate::task::{parse_date, Task};
use crate::user::User;

const MENU: &str = "\
Select one of the following Options below:
r - Registering a user
a - Adding a task
va - View all tasks
vm - View my task
ds - Display statistics
e - Exit
: ";

/// The interactive command loop over arbitrary input and output streams.
pub struct Menu<R, W> {
    tasks: TaskStore,
    users: UserStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(tasks: TaskStore, users: UserStore, input: R, output: W) -> Self {
        Self {
            tasks,
            users,
            input,
            output,
        }
    }

    /// Runs the loop until the exit command or end of input.
    pub fn run(&mut self) -> Result<()> {
        match self.menu_loop() {
            Err(Error::InputClosed) => {
                debug!("input stream closed, ending session");
                Ok(())
            }
            result => result,
        }
    }

    fn menu_loop(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            let choice = self.prompt(MENU)?.to_lowercase();
            match choice.as_str() {
                "r" => self.register_user()?,
                "a" => self.add_task()?,
                "va" => self.view_all_tasks()?,
                "vm" => self.view_my_tasks()?,
                "ds" => self.display_statistics()?,
                "e" => {
                    writeln!(self.output, "Goodbye!!!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "You have made a wrong choice. Please try again.")?;
                }
            }
        }
    }

    fn register_user(&mut self) -> Result<()> {
        let username = self.prompt("New Username: ")?;
        if self.users.contains(&username)? {
            writeln!(
                self.output,
                "Username already exists. Please choose another username."
            )?;
            return Ok(());
        }
        let password = self.prompt("New Password: ")?;
        let confirmed = self.prompt("Confirm Password: ")?;
        if password != confirmed {
            writeln!(self.output, "Passwords do not match.")?;
            return Ok(());
        }
        self.users.add(User::new(username, password))?;
        writeln!(self.output, "New user added.")?;
        Ok(())
    }

    fn add_task(&mut self) -> Result<()> {
        let username = self.prompt("Name of person assigned to task: ")?;
        let title = self.prompt("Title of Task: ")?;
        let description = self.prompt("Description of Task: ")?;
        let due_date = loop {
            let entered = self.prompt("Due date of task (YYYY-MM-DD): ")?;
            match parse_date(&entered) {
                Ok(date) => break date,
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid datetime format. Please use the format specified"
                    )?;
                }
            }
        };
        self.tasks.add(Task::new(username, title, description, due_date))?;
        writeln!(self.output, "Task successfully added.")?;
        Ok(())
    }

    fn view_all_tasks(&mut self) -> Result<()> {
        for task in self.tasks.load_all()? {
            self.print_task(&task)?;
        }
        Ok(())
    }

    fn view_my_tasks(&mut self) -> Result<()> {
        let username = self.prompt("Username: ")?;
        let mine: Vec<Task> = self
            .tasks
            .load_all()?
            .into_iter()
            .filter(|t| t.username == username)
            .collect();
        if mine.is_empty() {
            writeln!(self.output, "No tasks assigned to '{username}'.")?;
            return Ok(());
        }
        for task in &mine {
            self.print_task(task)?;
        }
        Ok(())
    }

    fn display_statistics(&mut self) -> Result<()> {
        let users = self.users.count()?;
        let tasks = self.tasks.load_all()?;
        let completed = tasks.iter().filter(|t| t.completed).count();
        writeln!(self.output, "-----------------------------------")?;
        writeln!(self.output, "Number of users: {users}")?;
        writeln!(self.output, "Number of tasks: {}", tasks.len())?;
        writeln!(self.output, "Completed tasks: {completed}")?;
        writeln!(self.output, "Outstanding tasks: {}", tasks.len() - completed)?;
        writeln!(self.output, "-----------------------------------")?;
        Ok(())
    }

    fn print_task(&mut self, task: &Task) -> Result<()> {
        writeln!(self.output, "{task}")?;
        writeln!(self.output)?;
        Ok(())
    }

    /// Writes the message without a trailing newline and reads one trimmed
    /// line. End of input surfaces as [`Error::InputClosed`].
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
