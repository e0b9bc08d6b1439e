//! File-backed stores for tasks and users.
//!
//! Each store owns one flat text file, one record per line. Every operation
//! reads the whole file and every mutation rewrites it completely. A missing
//! file is materialized with default contents on first use.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::task::Task;
use crate::user::User;

const DEFAULT_TASKS: &str = "admin;Add functionality to task manager;Add additional options and refactor the code.;2022-12-01;2022-11-22;No";
const DEFAULT_USERS: &str = "admin;password";

pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads every task in file order, skipping blank lines. Line numbers in
    /// errors refer to physical file lines.
    pub fn load_all(&self) -> Result<Vec<Task>> {
        let text = read_or_seed(&self.path, DEFAULT_TASKS, "task store")?;
        let mut tasks = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let task = Task::from_line(line).map_err(|source| Error::Malformed {
                path: self.path.clone(),
                line: number + 1,
                source,
            })?;
            tasks.push(task);
        }
        debug!(count = tasks.len(), path = %self.path.display(), "loaded tasks");
        Ok(tasks)
    }

    /// Overwrites the backing file with the given tasks.
    pub fn save_all(&self, tasks: &[Task]) -> Result<()> {
        let lines: Vec<String> = tasks.iter().map(Task::to_line).collect();
        write_text(&self.path, &lines.join("\n"))?;
        debug!(count = tasks.len(), path = %self.path.display(), "saved tasks");
        Ok(())
    }

    pub fn add(&self, task: Task) -> Result<()> {
        let mut tasks = self.load_all()?;
        tasks.push(task);
        self.save_all(&tasks)
    }
}

pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_all(&self) -> Result<Vec<User>> {
        let text = read_or_seed(&self.path, DEFAULT_USERS, "user store")?;
        let mut users = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let user = User::from_line(line).map_err(|source| Error::Malformed {
                path: self.path.clone(),
                line: number + 1,
                source,
            })?;
            users.push(user);
        }
        debug!(count = users.len(), path = %self.path.display(), "loaded users");
        Ok(users)
    }

    pub fn save_all(&self, users: &[User]) -> Result<()> {
        let lines: Vec<String> = users.iter().map(User::to_line).collect();
        write_text(&self.path, &lines.join("\n"))?;
        debug!(count = users.len(), path = %self.path.display(), "saved users");
        Ok(())
    }

    pub fn add(&self, user: User) -> Result<()> {
        let mut users = self.load_all()?;
        users.push(user);
        self.save_all(&users)
    }

    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.load_all()?.iter().any(|u| u.username == username))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }
}

fn read_or_seed(path: &Path, default: &str, kind: &str) -> Result<String> {
    if !path.exists() {
        info!(path = %path.display(), "creating {kind} with default contents");
        write_text(path, default)?;
        return Ok(default.to_string());
    }
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use tempfile::TempDir;

    fn task_store() -> (TempDir, PathBuf, TaskStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        let store = TaskStore::new(&path);
        (dir, path, store)
    }

    fn user_store() -> (TempDir, PathBuf, UserStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.txt");
        let store = UserStore::new(&path);
        (dir, path, store)
    }

    #[test]
    fn first_use_seeds_the_default_task() {
        let (_dir, path, store) = task_store();
        let tasks = store.load_all().unwrap();
        assert_eq!(tasks.len(), 1);

        let task = &tasks[0];
        assert_eq!(task.username, "admin");
        assert_eq!(task.title, "Add functionality to task manager");
        assert_eq!(task.due_date.to_string(), "2022-12-01");
        assert_eq!(task.assigned_date.to_string(), "2022-11-22");
        assert!(!task.completed);

        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_TASKS);
    }

    #[test]
    fn save_after_load_is_byte_identical() {
        let (_dir, path, store) = task_store();
        store.load_all().unwrap();
        let first = fs::read_to_string(&path).unwrap();

        store.save_all(&store.load_all().unwrap()).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        store.save_all(&store.load_all().unwrap()).unwrap();
        let third = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn keeps_tasks_in_file_order() {
        let (_dir, path, store) = task_store();
        fs::write(
            &path,
            "zed;Z;Last in the alphabet.;2023-03-01;2023-01-01;No\n\
             ann;A;First in the alphabet.;2023-01-01;2023-01-02;Yes\n\
             mid;M;Middle of the alphabet.;2023-02-01;2023-01-03;No",
        )
        .unwrap();

        let tasks = store.load_all().unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Z", "A", "M"]);

        store.save_all(&tasks).unwrap();
        let reloaded = store.load_all().unwrap();
        let titles: Vec<&str> = reloaded.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Z", "A", "M"]);
    }

    #[test]
    fn add_appends_at_the_end() {
        let (_dir, _path, store) = task_store();
        let mut task = store.load_all().unwrap().remove(0);
        task.username = "bob".to_string();
        task.title = "Second task".to_string();
        store.add(task.clone()).unwrap();

        let tasks = store.load_all().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1], task);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (_dir, path, store) = task_store();
        fs::write(
            &path,
            "\na;First;x.;2023-01-01;2023-01-01;No\n\n\nb;Second;y.;2023-01-02;2023-01-02;No\n",
        )
        .unwrap();

        let tasks = store.load_all().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "First");
        assert_eq!(tasks[1].title, "Second");
    }

    #[test]
    fn malformed_line_reports_its_position() {
        let (_dir, path, store) = task_store();
        fs::write(
            &path,
            "admin;Fine;All good.;2022-12-01;2022-11-22;No\n\nbroken;line",
        )
        .unwrap();

        match store.load_all().unwrap_err() {
            Error::Malformed { line, source, .. } => {
                assert_eq!(line, 3);
                assert_eq!(
                    source,
                    ParseError::FieldCount {
                        expected: 6,
                        found: 2
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("missing").join("tasks.txt"));
        assert!(matches!(store.load_all(), Err(Error::Write { .. })));
    }

    #[test]
    fn first_use_seeds_the_admin_account() {
        let (_dir, path, store) = user_store();
        let users = store.load_all().unwrap();
        assert_eq!(users, [User::new("admin".to_string(), "password".to_string())]);
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_USERS);
    }

    #[test]
    fn contains_and_count_reflect_the_store() {
        let (_dir, _path, store) = user_store();
        store
            .add(User::new("bob".to_string(), "hunter2".to_string()))
            .unwrap();

        assert!(store.contains("admin").unwrap());
        assert!(store.contains("bob").unwrap());
        assert!(!store.contains("eve").unwrap());
        assert_eq!(store.count().unwrap(), 2);
    }
}
