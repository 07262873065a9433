mod home;
pub use home::Home;

mod community;
pub use community::Community;

mod login;
pub use login::Login;

mod register;
pub use register::Register;
