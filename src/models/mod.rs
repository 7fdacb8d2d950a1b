//! 数据模型模块
//! 数据库行结构、请求/响应 DTO 与统一响应信封

pub mod account;
pub mod person;
pub mod publisher;
pub mod response;

pub use account::{Account, ChangePasswordRequest, LoginRequest, LoginResponse};
pub use person::{
    CreatePersonRequest, Gender, Person, PersonFilter, PersonResponse, ProfileResponse,
    UpdatePersonRequest,
};
pub use publisher::{CreatePublisherRequest, Publisher, PublisherResponse};
pub use response::ApiResponse;
