mod recipe;
mod user;

pub use recipe::{Category, Recipe};
pub use user::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, User, UserResponse,
};
