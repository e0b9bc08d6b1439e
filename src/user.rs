use crate::error::ParseError;

/// A registered account. Stored as `username;password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn from_line(line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 2 {
            return Err(ParseError::FieldCount {
                expected: 2,
                found: fields.len(),
            });
        }
        Ok(Self {
            username: fields[0].to_string(),
            password: fields[1].to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        format!("{};{}", self.username, self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_fields() {
        let user = User::new("bob".to_string(), "hunter2".to_string());
        assert_eq!(User::from_line(&user.to_line()).unwrap(), user);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = User::from_line("bob").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCount {
                expected: 2,
                found: 1
            }
        );

        let err = User::from_line("bob;pw;extra").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldCount {
                expected: 2,
                found: 3
            }
        );
    }
}
