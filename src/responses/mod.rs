pub mod errors;
pub mod html;
pub mod json;
pub mod redirect;
pub mod text;

pub use crate::errors::ResultResp;
pub use errors::error_response;
pub use html::html_response;
pub use json::json_response;
pub use redirect::{redirect, redirect_with_cookie};
pub use text::text_response;
