/// Profile fields a user may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserDto {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
