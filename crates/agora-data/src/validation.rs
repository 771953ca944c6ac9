use thiserror::Error as ThisError;

/// Input errors, raised before anything is sent to the record store
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("Please fill in both fields.")]
    MissingCredentials,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("All fields are required!")]
    MissingFields,
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Title cannot be empty.")]
    EmptyTitle,
    #[error("Please provide both start and end times.")]
    MissingTimes,
    #[error("End time must be after start time.")]
    EndNotAfterStart,
    #[error("No user logged in!")]
    NotLoggedIn,
    #[error("Invalid user data.")]
    MissingIdentifier,
    #[error("The member list has not been loaded.")]
    NotLoaded,
}

/// Check for the `local@domain.tld` shape: one `@`, something before
/// it, a dot inside the domain with something on both sides, and no
/// whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
