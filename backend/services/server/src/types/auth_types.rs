use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct RegisterUserInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub password_confirmation: String,
}

impl RegisterUserInput {
    /// Validation rules apply to what gets stored, so trim first.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct LoginUserInput {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> RegisterUserInput {
        RegisterUserInput {
            name: name.into(),
            email: " ada@example.com ".into(),
            password: "supersecret".into(),
            password_confirmation: "supersecret".into(),
        }
    }

    #[test]
    fn padding_does_not_count_towards_the_name_length() {
        assert!(input("  a ").trimmed().validate().is_err());
        assert!(input("    ").trimmed().validate().is_err());

        let ok = input(" Ada ").trimmed();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.name, "Ada");
        assert_eq!(ok.email, "ada@example.com");
    }
}
