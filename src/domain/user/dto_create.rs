/// Profile data for a new user. Credentials are set separately, through
/// `UserServicePort::update_user_password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserDto {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
