#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateDto {
    pub email: String,
    pub password: String,
}
