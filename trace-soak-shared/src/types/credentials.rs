/// Username/password/role triple for one collector account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    /// Sign-up email derived from the username.
    pub fn email(&self) -> String {
        format!("{}@email.com", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_derivation() {
        let creds = Credentials::new("tempdev1", "dev", "developer");
        assert_eq!(creds.email(), "tempdev1@email.com");
    }
}
