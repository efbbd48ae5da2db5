pub mod change_password;
pub mod delete_user;
pub mod edit_user;
pub mod get_current_user;
pub mod login_user;
pub mod register_user;

pub use change_password::{ChangePasswordCommand, ChangePasswordUseCase};
pub use delete_user::{DeleteUserCommand, DeleteUserUseCase};
pub use edit_user::{EditUserCommand, EditUserUseCase};
pub use get_current_user::GetCurrentUserUseCase;
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase, UserProfileResponse};
