mod extractor;
pub mod password;
mod token;

pub use extractor::{bearer_token, resolve, CurrentUser};
pub use token::{Claims, TokenCodec};
