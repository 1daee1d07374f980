mod forms;
mod general;
mod tokens;
mod users;

pub use forms::FormErrors;
pub use general::{
    ErrorResponse, SuccessResponse, INTERNAL_SERVER_ERROR_MESSAGE, USER_EMAIL_KEY, USER_ID_KEY,
};
pub use tokens::{ConfirmationToken, TokenPurpose};
pub use users::{AccountStatus, UserVisible};
