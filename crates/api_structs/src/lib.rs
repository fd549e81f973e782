mod message_template;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::message_template::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::message_template::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
